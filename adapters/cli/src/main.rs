#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays an Asari STG run headlessly.

mod autopilot;
mod overlap;

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use asari_stg_core::Difficulty;
use asari_stg_hud::Hud;
use asari_stg_session::{GameConfig, Scene, SceneFlow, Session, TOUCH_AUTOFIRE_INTERVAL_MS};
use asari_stg_world::query;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::autopilot::Autopilot;

/// Mixed into the run seed so the autopilot's choices do not mirror the spawns.
const AUTOPILOT_SEED_SALT: u64 = 0xa5a1_0000_0000_0001;

/// Headless autoplay of the Asari STG gameplay core.
#[derive(Debug, Parser)]
#[command(name = "asari-stg", version)]
struct Args {
    /// Difficulty preset: Easy, Normal or Hard.
    #[arg(long, default_value = "Normal")]
    difficulty: String,

    /// Seed overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds before the run is abandoned.
    #[arg(long, default_value_t = 120.0)]
    duration: f32,

    /// Length of one simulated frame in milliseconds.
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fire automatically, as on touch devices.
    #[arg(long)]
    autofire: bool,

    /// Print the HUD every N frames.
    #[arg(long = "report-every", default_value_t = 60)]
    report_every: u32,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }
        if self.autofire {
            config.autofire_interval_ms = Some(TOUCH_AUTOFIRE_INTERVAL_MS);
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn difficulty(&self) -> Difficulty {
        let difficulty = Difficulty::from_name(&self.difficulty);
        if difficulty.name() != self.difficulty {
            warn!(requested = %self.difficulty, "unknown difficulty, using Normal");
        }
        difficulty
    }
}

/// Entry point for the Asari STG command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.frame_ms > 0, "--frame-ms must be greater than zero");
    ensure!(
        args.duration.is_finite() && args.duration > 0.0,
        "--duration must be a positive number of seconds"
    );

    let config = args.game_config()?;
    let difficulty = args.difficulty();
    let frame = Duration::from_millis(args.frame_ms);
    let frames = (f64::from(args.duration) * 1_000.0 / args.frame_ms as f64).ceil() as u64;

    play(&config, difficulty, frame, frames, args.report_every.max(1));
    Ok(())
}

fn play(config: &GameConfig, difficulty: Difficulty, frame: Duration, frames: u64, report_every: u32) {
    let mut session = Session::new(config, difficulty);
    let mut flow = SceneFlow::new();
    let _ = flow.start(difficulty);
    let arena = query::arena(session.world());
    let mut hud = Hud::new(arena.width(), arena.height());
    let mut pilot = Autopilot::new(config.rng_seed ^ AUTOPILOT_SEED_SALT);

    for index in 0..frames {
        let collisions = overlap::detect(session.world());
        let input = pilot.decide(session.world());
        let events = session.step(frame, &input, &collisions);
        hud.observe(&events);
        flow.observe(&events);

        if index % u64::from(report_every) == 0 {
            let now = query::now(session.world()).as_secs_f32();
            println!("[{now:>7.2}s] {}", hud.lines().join(" | "));
        }
        if query::is_over(session.world()) {
            break;
        }
    }

    match flow.scene() {
        Scene::GameClear { final_score } | Scene::GameOver { final_score } => {
            for line in hud.lines() {
                println!("{line}");
            }
            info!(final_score, "run finished");
        }
        _ => {
            println!("Time up. {}", hud.score_label().text);
            info!(score = query::score(session.world()), "run abandoned at time limit");
        }
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration for a single Asari STG run.
//!
//! A [`Session`] owns the world together with every gameplay system and
//! drives them in a fixed order each frame: pause toggle, player input,
//! tick, spawn director, boss attack, collision batch, special weapon and
//! finally the cooldown report. The events of the whole frame are returned
//! to the caller, which forwards the notifications to its presentation layer.

use std::time::Duration;

use asari_stg_core::{Collision, Command, Difficulty, Event, MoveIntent, WorldPoint};
use asari_stg_system_boss_attack::{AttackView, BossAttack, Config as BossAttackConfig};
use asari_stg_system_cooldown::CooldownReporter;
use asari_stg_system_spawning::{Config as SpawnConfig, RunView, SpawnDirector};
use asari_stg_world::{self as world, query, World};
use tracing::{debug, info};

mod config;
mod flow;

pub use config::{ConfigError, GameConfig, DEFAULT_RNG_SEED, TOUCH_AUTOFIRE_INTERVAL_MS};
pub use flow::{Scene, SceneFlow};

/// Mixed into the run seed so the boss attack draws from its own stream,
/// independent of the spawn director's.
const BOSS_ATTACK_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Player input sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Directions currently held.
    pub movement: MoveIntent,
    /// Fire was pressed this frame.
    pub fire: bool,
    /// The special weapon was requested this frame.
    pub special: bool,
    /// The pause key was pressed this frame.
    pub toggle_pause: bool,
    /// Pointer position while dragging, which warps the player.
    pub pointer: Option<WorldPoint>,
}

/// A running game: the world plus the systems that feed it.
#[derive(Debug)]
pub struct Session {
    world: World,
    spawner: SpawnDirector,
    boss_attack: BossAttack,
    cooldown: CooldownReporter,
    autofire: Option<Autofire>,
    commands: Vec<Command>,
}

impl Session {
    /// Starts a run at `difficulty` using the provided configuration.
    #[must_use]
    pub fn new(config: &GameConfig, difficulty: Difficulty) -> Self {
        let world = World::new(config.world_config(difficulty));
        let profile = query::profile(&world);
        info!(
            difficulty = difficulty.name(),
            seed = config.rng_seed,
            "run started"
        );

        Self {
            world,
            spawner: SpawnDirector::new(SpawnConfig::from_profile(
                &profile,
                config.boss_spawn_score,
                config.rng_seed,
            )),
            boss_attack: BossAttack::new(BossAttackConfig::new(
                profile.boss_attack_delay,
                difficulty,
                config.rng_seed.rotate_left(32) ^ BOSS_ATTACK_SEED_SALT,
            )),
            cooldown: CooldownReporter::new(),
            autofire: config.autofire_interval().map(Autofire::new),
            commands: Vec::new(),
        }
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the run by one frame and returns every event it produced.
    ///
    /// Collisions are resolved boss hits first, then grunt hits, then player
    /// hazards, keeping the engine's order within each group.
    pub fn step(&mut self, dt: Duration, input: &FrameInput, collisions: &[Collision]) -> Vec<Event> {
        let mut events = Vec::new();

        if input.toggle_pause {
            let paused = !query::is_paused(&self.world);
            world::apply(&mut self.world, Command::SetPaused { paused }, &mut events);
        }

        world::apply(
            &mut self.world,
            Command::SteerPlayer {
                intent: input.movement,
            },
            &mut events,
        );
        if let Some(position) = input.pointer {
            world::apply(&mut self.world, Command::WarpPlayer { position }, &mut events);
        }
        if input.fire {
            world::apply(&mut self.world, Command::FirePlayerShot, &mut events);
        }

        let tick_start = events.len();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        if let Some(autofire) = self.autofire.as_mut() {
            autofire.handle(&events[tick_start..], &mut self.commands);
        }
        self.flush(&mut events);

        let view = RunView {
            phase: query::phase(&self.world),
            score: query::score(&self.world),
            is_over: query::is_over(&self.world),
            arena_height: query::arena(&self.world).height(),
        };
        self.spawner.handle(&events, view, &mut self.commands);
        self.flush(&mut events);

        let view = AttackView {
            boss: query::boss(&self.world).map(|boss| boss.position),
            player: query::player_position(&self.world),
        };
        self.boss_attack.handle(&events, view, &mut self.commands);
        self.flush(&mut events);

        if !collisions.is_empty() {
            let mut ordered = collisions.to_vec();
            ordered.sort_by_key(Collision::resolution_rank);
            debug!(count = ordered.len(), "resolving collisions");
            self.commands.extend(
                ordered
                    .into_iter()
                    .map(|collision| Command::ResolveCollision { collision }),
            );
            self.flush(&mut events);
        }

        if input.special {
            world::apply(&mut self.world, Command::ActivateSpecial, &mut events);
        }

        let remaining = query::special_cooldown_remaining(&self.world);
        let mut published = Vec::new();
        self.cooldown.handle(&events, remaining, &mut published);
        events.extend(published);

        events
    }

    fn flush(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Autofire {
    interval: Duration,
    accumulator: Duration,
}

impl Autofire {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
        }
    }

    fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if self.interval.is_zero() {
            return;
        }
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.accumulator = self.accumulator.saturating_add(*dt);
            }
        }
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            out.push(Command::FirePlayerShot);
        }
    }
}

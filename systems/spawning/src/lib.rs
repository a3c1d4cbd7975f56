#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn director that feeds grunts into the swarm and hands over to the boss.

use std::time::Duration;

use asari_stg_core::{Command, DifficultyProfile, Event, Phase, SPAWN_EDGE_MARGIN};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawn director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_delay: Duration,
    boss_threshold: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, threshold and seed.
    #[must_use]
    pub const fn new(spawn_delay: Duration, boss_threshold: u32, rng_seed: u64) -> Self {
        Self {
            spawn_delay,
            boss_threshold,
            rng_seed,
        }
    }

    /// Creates a configuration using the spawn cadence of a difficulty profile.
    #[must_use]
    pub const fn from_profile(
        profile: &DifficultyProfile,
        boss_threshold: u32,
        rng_seed: u64,
    ) -> Self {
        Self::new(profile.spawn_delay, boss_threshold, rng_seed)
    }
}

/// Run state consulted by the director on every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunView {
    /// Current gameplay phase.
    pub phase: Phase,
    /// Current score.
    pub score: u32,
    /// Whether the run already ended.
    pub is_over: bool,
    /// Height of the arena, bounding spawn positions.
    pub arena_height: f32,
}

/// System that emits grunt spawns on a fixed cadence until the boss arrives.
#[derive(Debug)]
pub struct SpawnDirector {
    spawn_delay: Duration,
    boss_threshold: u32,
    accumulator: Duration,
    enabled: bool,
    finished: bool,
    rng: ChaCha8Rng,
}

impl SpawnDirector {
    /// Creates a new director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_delay: config.spawn_delay,
            boss_threshold: config.boss_threshold,
            accumulator: Duration::ZERO,
            enabled: true,
            finished: false,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Reports whether grunt spawning is still active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Consumes events and the run view to emit spawn or phase commands.
    ///
    /// The boss threshold is checked before any spawn, so the frame that
    /// crosses it never adds grunts that would be cleared right away. The
    /// boss request repeats on every frame until the world reports the boss
    /// phase, so a request dropped by a paused world is not lost.
    pub fn handle(&mut self, events: &[Event], view: RunView, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::BossPhaseStarted { .. } | Event::RunEnded { .. } => self.finished = true,
                _ => {}
            }
        }

        if view.is_over || view.phase == Phase::Boss {
            self.finished = true;
        }

        if self.finished {
            self.enabled = false;
            return;
        }

        if view.score >= self.boss_threshold {
            self.enter_boss_phase(out);
            return;
        }

        self.on_tick(elapsed, view.arena_height, out);
    }

    /// Accumulates elapsed time and emits one spawn per whole spawn delay.
    pub fn on_tick(&mut self, elapsed: Duration, arena_height: f32, out: &mut Vec<Command>) {
        if !self.enabled || self.spawn_delay.is_zero() || elapsed.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        while self.accumulator >= self.spawn_delay {
            self.accumulator -= self.spawn_delay;
            let y = self.spawn_height(arena_height);
            out.push(Command::SpawnGrunt { y });
        }
    }

    /// Stops grunt spawning and requests the boss encounter.
    ///
    /// The world starts the boss phase at most once, so repeated requests
    /// are harmless.
    pub fn enter_boss_phase(&mut self, out: &mut Vec<Command>) {
        self.enabled = false;
        self.accumulator = Duration::ZERO;
        out.push(Command::EnterBossPhase);
    }

    fn spawn_height(&mut self, arena_height: f32) -> f32 {
        let low = SPAWN_EDGE_MARGIN;
        let high = arena_height - SPAWN_EDGE_MARGIN;
        if high <= low {
            return arena_height / 2.0;
        }
        self.rng.gen_range(low..=high)
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that times the boss's volleys and aims them at the player.

use std::time::Duration;

use asari_stg_core::{
    AttackPattern, Command, Difficulty, DifficultyProfile, Event, Velocity, WorldPoint,
    BOSS_PROJECTILE_SPEED,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Configuration parameters required to construct the boss attack system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    fire_interval: Duration,
    difficulty: Difficulty,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from an explicit interval and difficulty.
    #[must_use]
    pub const fn new(fire_interval: Duration, difficulty: Difficulty, rng_seed: u64) -> Self {
        Self {
            fire_interval,
            difficulty,
            rng_seed,
        }
    }

    /// Creates a configuration using the attack cadence of the difficulty's profile.
    #[must_use]
    pub const fn for_difficulty(difficulty: Difficulty, rng_seed: u64) -> Self {
        let profile: DifficultyProfile = difficulty.profile();
        Self::new(profile.boss_attack_delay, difficulty, rng_seed)
    }
}

/// Positions consulted when a volley is due.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackView {
    /// Position of the boss, absent when no boss is in play.
    pub boss: Option<WorldPoint>,
    /// Position of the player ship.
    pub player: WorldPoint,
}

/// Boss attack timer that is armed when the boss arrives and disarmed when the run ends.
#[derive(Debug)]
pub struct BossAttack {
    fire_interval: Duration,
    difficulty: Difficulty,
    armed: bool,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl BossAttack {
    /// Creates a new, disarmed attack system.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            fire_interval: config.fire_interval,
            difficulty: config.difficulty,
            armed: false,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Reports whether the attack timer is running.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consumes world events and emits one `FireBossVolley` per elapsed interval.
    ///
    /// Time observed before the boss arrived in the same batch does not count
    /// towards the first volley.
    pub fn handle(&mut self, events: &[Event], view: AttackView, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::BossPhaseStarted { .. } => {
                    self.armed = true;
                    self.accumulator = Duration::ZERO;
                    elapsed = Duration::ZERO;
                }
                Event::RunEnded { .. } => self.armed = false,
                Event::TimeAdvanced { dt } if self.armed => {
                    elapsed = elapsed.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if !self.armed || self.fire_interval.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        while self.accumulator >= self.fire_interval {
            self.accumulator -= self.fire_interval;
            self.on_boss_attack_tick(view, out);
        }
    }

    /// Fires a single volley at the player. Does nothing when no boss is present.
    pub fn on_boss_attack_tick(&mut self, view: AttackView, out: &mut Vec<Command>) {
        let Some(boss) = view.boss else {
            return;
        };

        let pattern = select_pattern(self.difficulty, &mut self.rng);
        trace!(?pattern, "boss volley");
        out.push(Command::FireBossVolley {
            velocities: aim_volley(pattern, boss, view.player),
        });
    }
}

/// Chooses the shot layout for the next volley.
///
/// Only [`AttackPattern::Single`] is eligible on difficulties that forbid the
/// triple spread; otherwise both layouts are equally likely.
pub fn select_pattern<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> AttackPattern {
    if difficulty.allows_triple_attack() && rng.gen_bool(0.5) {
        AttackPattern::Triple
    } else {
        AttackPattern::Single
    }
}

/// Computes the initial velocity of every shot in a volley fired from `boss` at `player`.
#[must_use]
pub fn aim_volley(pattern: AttackPattern, boss: WorldPoint, player: WorldPoint) -> Vec<Velocity> {
    let aim = boss.angle_to(player);
    pattern
        .angle_offsets()
        .iter()
        .map(|offset| Velocity::from_angle(aim + offset, BOSS_PROJECTILE_SPEED))
        .collect()
}

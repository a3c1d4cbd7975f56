//! Cooldown-gated special weapon.

use std::time::Duration;

use asari_stg_core::{DespawnReason, Event, FlashTint, Phase, SCORE_PER_GRUNT};
use tracing::debug;

use super::{combat, World};

/// Tracks when the special weapon was last used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecialCooldown {
    cooldown: Duration,
    last_activation: Option<Duration>,
}

impl SpecialCooldown {
    /// Creates a cooldown that is ready immediately.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_activation: None,
        }
    }

    /// Length of the cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Logical time of the last successful activation.
    #[must_use]
    pub const fn last_activation(&self) -> Option<Duration> {
        self.last_activation
    }

    /// Reports whether an activation at `now` would succeed.
    ///
    /// The cooldown must have strictly elapsed: an activation exactly
    /// `cooldown` after the previous one is still rejected.
    #[must_use]
    pub fn is_ready(&self, now: Duration) -> bool {
        match self.last_activation {
            None => true,
            Some(last) => now > last.saturating_add(self.cooldown),
        }
    }

    /// Records an activation at `now` if the cooldown elapsed.
    pub fn try_activate(&mut self, now: Duration) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_activation = Some(now);
        true
    }

    /// Time left before the weapon is ready, zero once elapsed.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.last_activation.map_or(Duration::ZERO, |last| {
            last.saturating_add(self.cooldown).saturating_sub(now)
        })
    }
}

pub(crate) fn activate(world: &mut World, out_events: &mut Vec<Event>) {
    let now = world.clock;
    if !world.special.try_activate(now) {
        return;
    }

    debug!(grunts = world.grunts.len(), "special weapon activated");
    out_events.push(Event::SpecialActivated { at: now });

    let cleared: Vec<_> = world.grunts.drain(..).map(|grunt| grunt.id).collect();
    for grunt in cleared {
        out_events.push(Event::GruntDespawned {
            grunt,
            reason: DespawnReason::Special,
        });
        world.award(SCORE_PER_GRUNT, out_events);
    }

    if world.phase == Phase::Boss {
        let damage = world.special_boss_damage;
        combat::damage_boss(world, damage, FlashTint::Special, out_events);
    }
}

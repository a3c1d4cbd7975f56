//! Scripted pilot that plays the run in place of a human.

use asari_stg_core::{MoveIntent, ProjectileOwner, WorldPoint};
use asari_stg_session::FrameInput;
use asari_stg_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ALIGN_TOLERANCE: f32 = 12.0;
const FIRE_WINDOW: f32 = 40.0;
const DODGE_RADIUS: f32 = 140.0;
const HOME_X: f32 = 160.0;
const FIRE_CHANCE: f64 = 0.3;
const WANDER_CHANCE: f64 = 0.05;
const CROWD_FOR_SPECIAL: usize = 4;

/// Steers towards the closest target, dodges boss shots and fires when aligned.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
}

impl Autopilot {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub(crate) fn decide(&mut self, world: &World) -> FrameInput {
        let player = query::player_position(world);
        let target = pick_target(world);
        let mut movement = MoveIntent::default();

        if let Some(threat) = closest_boss_shot(world, player) {
            movement.up = threat.y >= player.y;
            movement.down = !movement.up;
        } else if let Some(target) = target {
            movement.up = target.y < player.y - ALIGN_TOLERANCE;
            movement.down = target.y > player.y + ALIGN_TOLERANCE;
        }

        if player.x > HOME_X + ALIGN_TOLERANCE {
            movement.left = true;
        } else if player.x < HOME_X - ALIGN_TOLERANCE {
            movement.right = true;
        }

        if self.rng.gen_bool(WANDER_CHANCE) {
            movement.up = !movement.up;
            movement.down = !movement.up;
        }

        let aligned = target.is_some_and(|target| (target.y - player.y).abs() < FIRE_WINDOW);
        let fire = aligned && self.rng.gen_bool(FIRE_CHANCE);
        let special = query::special_ready(world)
            && (query::boss(world).is_some() || query::grunt_count(world) >= CROWD_FOR_SPECIAL);

        FrameInput {
            movement,
            fire,
            special,
            ..FrameInput::default()
        }
    }
}

fn pick_target(world: &World) -> Option<WorldPoint> {
    if let Some(boss) = query::boss(world) {
        return Some(boss.position);
    }
    query::grunt_view(world)
        .into_iter()
        .map(|grunt| grunt.position)
        .min_by(|a, b| a.x.total_cmp(&b.x))
}

fn closest_boss_shot(world: &World, player: WorldPoint) -> Option<WorldPoint> {
    query::projectile_view(world)
        .into_iter()
        .filter(|shot| shot.owner == ProjectileOwner::Boss)
        .map(|shot| shot.position)
        .filter(|position| position.distance(player) < DODGE_RADIUS)
        .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
}

//! Naive circle overlap test standing in for the engine's physics.

use asari_stg_core::{Collision, Hazard, ProjectileOwner, WorldPoint};
use asari_stg_world::{query, World};
use glam::Vec2;

const PLAYER_RADIUS: f32 = 16.0;
const GRUNT_RADIUS: f32 = 24.0;
const BOSS_RADIUS: f32 = 80.0;
const SHOT_RADIUS: f32 = 6.0;

fn vec(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

fn overlaps(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance_squared(b) <= (radius_a + radius_b).powi(2)
}

/// Reports every overlap in the current world state, in engine order.
pub(crate) fn detect(world: &World) -> Vec<Collision> {
    let grunts = query::grunt_view(world);
    let shots = query::projectile_view(world);
    let boss = query::boss(world).map(|boss| vec(boss.position));
    let player = vec(query::player_position(world));
    let mut collisions = Vec::new();

    for shot in shots.iter().filter(|shot| shot.owner == ProjectileOwner::Player) {
        let position = vec(shot.position);
        if let Some(grunt) = grunts
            .iter()
            .find(|grunt| overlaps(position, SHOT_RADIUS, vec(grunt.position), GRUNT_RADIUS))
        {
            collisions.push(Collision::ProjectileHitGrunt {
                projectile: shot.id,
                grunt: grunt.id,
            });
        } else if boss.is_some_and(|boss| overlaps(position, SHOT_RADIUS, boss, BOSS_RADIUS)) {
            collisions.push(Collision::ProjectileHitBoss { projectile: shot.id });
        }
    }

    let hazards = grunts
        .iter()
        .filter(|grunt| overlaps(player, PLAYER_RADIUS, vec(grunt.position), GRUNT_RADIUS))
        .map(|grunt| Hazard::Grunt(grunt.id))
        .chain(
            boss.filter(|boss| overlaps(player, PLAYER_RADIUS, *boss, BOSS_RADIUS))
                .map(|_| Hazard::Boss),
        )
        .chain(
            shots
                .iter()
                .filter(|shot| shot.owner == ProjectileOwner::Boss)
                .filter(|shot| overlaps(player, PLAYER_RADIUS, vec(shot.position), SHOT_RADIUS))
                .map(|shot| Hazard::Projectile(shot.id)),
        );
    collisions.extend(hazards.map(|hazard| Collision::PlayerHitHazard { hazard }));

    collisions
}

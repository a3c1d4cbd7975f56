//! Resolution of overlap facts reported by the engine.

use asari_stg_core::{
    Collision, DespawnReason, Event, FlashTint, GruntId, Hazard, ProjectileId, ProjectileOwner,
    BOSS_FLASH_DURATION, CLEAR_BONUS, SCORE_PER_GRUNT,
};
use tracing::info;

use super::{Flash, RunOutcome, World};

/// Dispatches a single collision to its handler.
///
/// Facts that no longer match the world (a consumed projectile, a grunt that
/// already left, a boss that is gone) are ignored.
pub(crate) fn resolve(world: &mut World, collision: Collision, out_events: &mut Vec<Event>) {
    match collision {
        Collision::ProjectileHitGrunt { projectile, grunt } => {
            projectile_hits_grunt(world, projectile, grunt, out_events)
        }
        Collision::ProjectileHitBoss { projectile } => {
            projectile_hits_boss(world, projectile, out_events)
        }
        Collision::PlayerHitHazard { hazard } => player_hit_by_hazard(world, hazard, out_events),
    }
}

fn projectile_hits_grunt(
    world: &mut World,
    projectile: ProjectileId,
    grunt: GruntId,
    out_events: &mut Vec<Event>,
) {
    let Some(projectile_index) = world.projectile_index(projectile, ProjectileOwner::Player)
    else {
        return;
    };
    let Some(grunt_index) = world.grunt_index(grunt) else {
        return;
    };

    let _ = world.projectiles.remove(projectile_index);
    out_events.push(Event::ProjectileDeactivated { projectile });
    let _ = world.grunts.remove(grunt_index);
    out_events.push(Event::GruntDespawned {
        grunt,
        reason: DespawnReason::Shot,
    });
    world.award(SCORE_PER_GRUNT, out_events);
}

fn projectile_hits_boss(world: &mut World, projectile: ProjectileId, out_events: &mut Vec<Event>) {
    if world.boss.is_none() {
        return;
    }
    let Some(projectile_index) = world.projectile_index(projectile, ProjectileOwner::Player)
    else {
        return;
    };

    let _ = world.projectiles.remove(projectile_index);
    out_events.push(Event::ProjectileDeactivated { projectile });
    damage_boss(world, 1, FlashTint::Hit, out_events);
}

/// Removes `damage` hit points from the boss and defeats it once none remain.
pub(crate) fn damage_boss(
    world: &mut World,
    damage: u32,
    tint: FlashTint,
    out_events: &mut Vec<Event>,
) {
    let Some(boss) = world.boss.as_mut() else {
        return;
    };

    boss.hp = boss.hp.saturating_sub(damage);
    let hp = boss.hp;
    out_events.push(Event::BossHpChanged { hp });

    if hp == 0 {
        defeat_boss(world, out_events);
        return;
    }

    boss.flash = Some(Flash {
        tint,
        remaining: BOSS_FLASH_DURATION,
    });
    out_events.push(Event::BossFlashStarted { tint });
}

fn defeat_boss(world: &mut World, out_events: &mut Vec<Event>) {
    world.boss = None;
    end_run(world, true, out_events);
}

fn player_hit_by_hazard(world: &mut World, hazard: Hazard, out_events: &mut Vec<Event>) {
    let present = match hazard {
        Hazard::Grunt(grunt) => world.grunt_index(grunt).is_some(),
        Hazard::Boss => world.boss.is_some(),
        Hazard::Projectile(projectile) => world
            .projectile_index(projectile, ProjectileOwner::Boss)
            .is_some(),
    };
    if !present {
        return;
    }

    world.boss = None;
    end_run(world, false, out_events);
}

fn end_run(world: &mut World, victory: bool, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    let final_score = if victory {
        world.score.saturating_add(CLEAR_BONUS)
    } else {
        world.score
    };
    world.outcome = Some(RunOutcome {
        victory,
        final_score,
    });
    info!(victory, final_score, "run ended");
    out_events.push(Event::RunEnded {
        victory,
        final_score,
    });
}

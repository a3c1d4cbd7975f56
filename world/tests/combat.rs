use std::time::Duration;

use asari_stg_core::{
    Collision, Command, DespawnReason, Difficulty, Event, FlashTint, GruntId, Hazard, Phase,
    ProjectileId, CLEAR_BONUS,
};
use asari_stg_world::{self as world, query, World, WorldConfig};

fn new_world(difficulty: Difficulty) -> World {
    World::new(WorldConfig::new(Default::default(), difficulty))
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn fire(world: &mut World) -> ProjectileId {
    let events = run(world, Command::FirePlayerShot);
    match events.as_slice() {
        [Event::ProjectileFired { projectile, .. }] => *projectile,
        other => panic!("expected a single shot, got {other:?}"),
    }
}

fn spawn(world: &mut World, y: f32) -> GruntId {
    let events = run(world, Command::SpawnGrunt { y });
    match events.as_slice() {
        [Event::GruntSpawned { grunt, .. }] => *grunt,
        other => panic!("expected a single spawn, got {other:?}"),
    }
}

fn hit_boss(world: &mut World) -> Vec<Event> {
    let projectile = fire(world);
    run(
        world,
        Command::ResolveCollision {
            collision: Collision::ProjectileHitBoss { projectile },
        },
    )
}

#[test]
fn shot_grunt_awards_score_once() {
    let mut world = new_world(Difficulty::Normal);
    let grunt = spawn(&mut world, 300.0);
    let first = fire(&mut world);
    let second = fire(&mut world);

    let events = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::ProjectileHitGrunt {
                projectile: first,
                grunt,
            },
        },
    );
    assert_eq!(
        events,
        vec![
            Event::ProjectileDeactivated { projectile: first },
            Event::GruntDespawned {
                grunt,
                reason: DespawnReason::Shot,
            },
            Event::ScoreDelta { points: 10 },
        ]
    );

    let repeated = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::ProjectileHitGrunt {
                projectile: second,
                grunt,
            },
        },
    );
    assert!(repeated.is_empty(), "grunt already destroyed");
    assert_eq!(query::score(&world), 10);
    assert_eq!(query::projectile_view(&world).len(), 1);
}

#[test]
fn boss_defeat_ends_run_with_clear_bonus() {
    let mut world = new_world(Difficulty::Normal);
    let _ = run(&mut world, Command::EnterBossPhase);
    let score = query::score(&world);

    let mut run_ended = Vec::new();
    for hit in 1..=30u32 {
        let events = hit_boss(&mut world);
        assert!(events.contains(&Event::BossHpChanged { hp: 30 - hit }));
        run_ended.extend(
            events
                .into_iter()
                .filter(|event| matches!(event, Event::RunEnded { .. })),
        );
    }

    assert_eq!(
        run_ended,
        vec![Event::RunEnded {
            victory: true,
            final_score: score + CLEAR_BONUS,
        }]
    );
    assert!(query::is_over(&world));
    assert!(query::boss(&world).is_none());

    let after = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::ProjectileHitBoss {
                projectile: ProjectileId::new(0),
            },
        },
    );
    assert!(after.is_empty(), "no boss hits after defeat");
}

#[test]
fn boss_hit_starts_and_clears_flash() {
    let mut world = new_world(Difficulty::Hard);
    let _ = run(&mut world, Command::EnterBossPhase);
    let events = hit_boss(&mut world);
    assert!(events.contains(&Event::BossFlashStarted {
        tint: FlashTint::Hit
    }));
    assert_eq!(query::boss(&world).and_then(|boss| boss.flash), Some(FlashTint::Hit));

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(60),
        },
    );
    assert!(!events.contains(&Event::BossFlashCleared));

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(40),
        },
    );
    assert!(events.contains(&Event::BossFlashCleared));
    assert_eq!(query::boss(&world).and_then(|boss| boss.flash), None);
}

#[test]
fn fatal_hit_leaves_no_flash_behind() {
    let mut world = new_world(Difficulty::Normal);
    let _ = run(&mut world, Command::EnterBossPhase);
    for _ in 1..30 {
        let _ = hit_boss(&mut world);
    }

    let events = hit_boss(&mut world);
    assert!(events.contains(&Event::BossHpChanged { hp: 0 }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::BossFlashStarted { .. })));
    assert!(query::is_over(&world));
}

#[test]
fn hazard_ends_run_once() {
    let mut world = new_world(Difficulty::Normal);
    let grunt = spawn(&mut world, 360.0);
    let _ = run(&mut world, Command::SpawnGrunt { y: 120.0 });

    let events = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::PlayerHitHazard {
                hazard: Hazard::Grunt(grunt),
            },
        },
    );
    assert_eq!(
        events,
        vec![Event::RunEnded {
            victory: false,
            final_score: 0,
        }]
    );

    let repeated = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::PlayerHitHazard {
                hazard: Hazard::Grunt(GruntId::new(1)),
            },
        },
    );
    assert!(repeated.is_empty());

    for command in [
        Command::Tick {
            dt: Duration::from_secs(1),
        },
        Command::SpawnGrunt { y: 200.0 },
        Command::ActivateSpecial,
        Command::EnterBossPhase,
    ] {
        assert!(run(&mut world, command).is_empty());
    }
    assert_eq!(query::now(&world), Duration::ZERO);
    assert_eq!(query::grunt_count(&world), 2);
    assert_eq!(query::phase(&world), Phase::Swarm);
}

#[test]
fn stale_hazards_are_ignored() {
    let mut world = new_world(Difficulty::Normal);
    let events = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::PlayerHitHazard {
                hazard: Hazard::Boss,
            },
        },
    );
    assert!(events.is_empty());
    assert!(!query::is_over(&world));
}

#[test]
fn defeat_after_victory_is_absorbed() {
    let mut world = new_world(Difficulty::Easy);
    let _ = run(&mut world, Command::EnterBossPhase);
    for _ in 0..15 {
        let _ = hit_boss(&mut world);
    }
    let outcome = query::outcome(&world).expect("run ended");
    assert!(outcome.victory);

    let events = run(
        &mut world,
        Command::ResolveCollision {
            collision: Collision::PlayerHitHazard {
                hazard: Hazard::Boss,
            },
        },
    );
    assert!(events.is_empty());
    assert_eq!(query::outcome(&world), Some(outcome));
}

#[test]
fn boss_phase_clears_grunts_without_score() {
    let mut world = new_world(Difficulty::Normal);
    let first = spawn(&mut world, 100.0);
    let second = spawn(&mut world, 200.0);

    let events = run(&mut world, Command::EnterBossPhase);
    assert_eq!(
        events,
        vec![
            Event::GruntDespawned {
                grunt: first,
                reason: DespawnReason::BossArrival,
            },
            Event::GruntDespawned {
                grunt: second,
                reason: DespawnReason::BossArrival,
            },
            Event::BossPhaseStarted { max_hp: 30 },
        ]
    );
    assert_eq!(query::score(&world), 0);
    assert_eq!(query::phase(&world), Phase::Boss);

    assert!(run(&mut world, Command::EnterBossPhase).is_empty());
    assert!(run(&mut world, Command::SpawnGrunt { y: 100.0 }).is_empty());
}

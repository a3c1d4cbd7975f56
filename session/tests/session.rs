use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use asari_stg_core::{
    Collision, Difficulty, Event, Hazard, Phase, ProjectileOwner, CLEAR_BONUS,
};
use asari_stg_session::{FrameInput, GameConfig, Scene, SceneFlow, Session};
use asari_stg_world::{query, World};

const FRAME: Duration = Duration::from_millis(50);

fn autofire_config() -> GameConfig {
    GameConfig {
        autofire_interval_ms: Some(200),
        ..GameConfig::default()
    }
}

/// Pairs every player shot with a grunt, and leftover shots with the boss.
fn perfect_aim(world: &World) -> Vec<Collision> {
    let mut grunts = query::grunt_view(world).into_iter();
    let boss_present = query::boss(world).is_some();
    let mut collisions = Vec::new();
    for projectile in query::projectile_view(world) {
        if projectile.owner != ProjectileOwner::Player {
            continue;
        }
        if let Some(grunt) = grunts.next() {
            collisions.push(Collision::ProjectileHitGrunt {
                projectile: projectile.id,
                grunt: grunt.id,
            });
        } else if boss_present {
            collisions.push(Collision::ProjectileHitBoss {
                projectile: projectile.id,
            });
        }
    }
    collisions
}

fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[test]
fn perfect_play_clears_the_run() {
    let mut session = Session::new(&autofire_config(), Difficulty::Normal);
    let mut flow = SceneFlow::new();
    assert!(flow.start(Difficulty::Normal));
    let mut log = Vec::new();

    for _ in 0..5_000 {
        let collisions = perfect_aim(session.world());
        let events = session.step(FRAME, &FrameInput::default(), &collisions);
        flow.observe(&events);
        log.extend(events);
        if query::is_over(session.world()) {
            break;
        }
    }

    let score = query::score(session.world());
    assert!(score >= 500);
    assert_eq!(
        count(&log, |event| matches!(event, Event::BossPhaseStarted { .. })),
        1
    );
    let endings: Vec<&Event> = log
        .iter()
        .filter(|event| matches!(event, Event::RunEnded { .. }))
        .collect();
    assert_eq!(
        endings,
        vec![&Event::RunEnded {
            victory: true,
            final_score: score + CLEAR_BONUS,
        }]
    );
    assert_eq!(
        flow.scene(),
        Scene::GameClear {
            final_score: score + CLEAR_BONUS
        }
    );

    let after = session.step(FRAME, &FrameInput::default(), &[]);
    assert!(after.is_empty(), "nothing happens once the run is over");
}

#[test]
fn pause_freezes_every_timer() {
    let mut session = Session::new(&GameConfig::default(), Difficulty::Hard);
    let _ = session.step(FRAME, &FrameInput::default(), &[]);
    let pause = FrameInput {
        toggle_pause: true,
        ..FrameInput::default()
    };

    let events = session.step(FRAME, &pause, &[]);
    assert_eq!(events, vec![Event::PauseChanged { paused: true }]);
    let frozen_at = query::now(session.world());

    for _ in 0..200 {
        let events = session.step(
            FRAME,
            &FrameInput {
                fire: true,
                special: true,
                ..FrameInput::default()
            },
            &[],
        );
        assert!(events.is_empty(), "{events:?}");
    }
    assert_eq!(query::now(session.world()), frozen_at);
    assert_eq!(query::grunt_count(session.world()), 0);
    assert!(query::projectile_view(session.world()).is_empty());

    let resumed = session.step(Duration::from_millis(100), &pause, &[]);
    assert_eq!(resumed[0], Event::PauseChanged { paused: false });
    assert_eq!(
        count(&resumed, |event| matches!(event, Event::GruntSpawned { .. })),
        0,
        "no backlog after resuming"
    );
}

#[test]
fn pausing_right_after_the_threshold_still_reaches_the_boss() {
    let config = GameConfig {
        boss_spawn_score: 10,
        ..autofire_config()
    };
    let mut session = Session::new(&config, Difficulty::Normal);

    // Kills resolve after the spawn director, so it first sees the new score
    // on the following frame.
    while query::score(session.world()) < 10 {
        let collisions = perfect_aim(session.world());
        let _ = session.step(FRAME, &FrameInput::default(), &collisions);
    }
    assert_eq!(query::phase(session.world()), Phase::Swarm);

    let pause = FrameInput {
        toggle_pause: true,
        ..FrameInput::default()
    };
    let paused = session.step(FRAME, &pause, &[]);
    assert_eq!(paused, vec![Event::PauseChanged { paused: true }]);
    assert_eq!(query::phase(session.world()), Phase::Swarm);

    let mut log = session.step(FRAME, &pause, &[]);
    for _ in 0..10 {
        log.extend(session.step(FRAME, &FrameInput::default(), &[]));
    }

    assert_eq!(query::phase(session.world()), Phase::Boss);
    assert_eq!(
        count(&log, |event| matches!(event, Event::BossPhaseStarted { .. })),
        1
    );
    assert!(query::boss(session.world()).is_some());
}

#[test]
fn boss_kill_wins_over_same_frame_hazard() {
    let config = GameConfig {
        boss_spawn_score: 10,
        ..autofire_config()
    };
    let mut session = Session::new(&config, Difficulty::Easy);

    while query::phase(session.world()) != Phase::Boss {
        let collisions = perfect_aim(session.world());
        let _ = session.step(FRAME, &FrameInput::default(), &collisions);
    }
    while query::boss(session.world()).map(|boss| boss.hp) != Some(1) {
        let mut collisions = perfect_aim(session.world());
        collisions.truncate(1);
        let _ = session.step(FRAME, &FrameInput::default(), &collisions);
    }

    let mut batch = vec![Collision::PlayerHitHazard {
        hazard: Hazard::Boss,
    }];
    loop {
        // The newest shot is the furthest from leaving the arena during the tick.
        let shots = perfect_aim(session.world());
        if let Some(hit) = shots.into_iter().last() {
            batch.push(hit);
            break;
        }
        let _ = session.step(FRAME, &FrameInput::default(), &[]);
    }

    let score = query::score(session.world());
    let events = session.step(FRAME, &FrameInput::default(), &batch);
    let endings: Vec<&Event> = events
        .iter()
        .filter(|event| matches!(event, Event::RunEnded { .. }))
        .collect();
    assert_eq!(
        endings,
        vec![&Event::RunEnded {
            victory: true,
            final_score: score + CLEAR_BONUS,
        }]
    );
}

#[test]
fn special_input_respects_cooldown() {
    let mut session = Session::new(&GameConfig::default(), Difficulty::Normal);
    let special = FrameInput {
        special: true,
        ..FrameInput::default()
    };
    let mut activations = Vec::new();

    for _ in 0..500 {
        for event in session.step(FRAME, &special, &[]) {
            if let Event::SpecialActivated { at } = event {
                activations.push(at);
            }
        }
    }

    assert!(activations.len() >= 2);
    for pair in activations.windows(2) {
        assert!(pair[1] - pair[0] > Duration::from_secs(10));
    }
}

#[test]
fn cooldown_notification_closes_every_live_frame() {
    let mut session = Session::new(&GameConfig::default(), Difficulty::Normal);
    for _ in 0..20 {
        let events = session.step(FRAME, &FrameInput::default(), &[]);
        assert!(matches!(
            events.last(),
            Some(Event::CooldownRemaining { .. })
        ));
    }
}

#[test]
fn replay_is_deterministic() {
    let first = replay(7);
    let second = replay(7);
    assert_eq!(first, second, "replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

fn replay(seed: u64) -> ReplayOutcome {
    let config = GameConfig {
        rng_seed: seed,
        ..autofire_config()
    };
    let mut session = Session::new(&config, Difficulty::Hard);
    let mut notifications = Vec::new();

    for frame in 0..3_000u32 {
        let collisions = perfect_aim(session.world());
        let input = FrameInput {
            special: frame % 40 == 0,
            ..FrameInput::default()
        };
        for event in session.step(FRAME, &input, &collisions) {
            if event.is_notification() {
                notifications.push(format!("{event:?}"));
            }
        }
        if query::is_over(session.world()) {
            break;
        }
    }

    ReplayOutcome {
        notifications,
        score: query::score(session.world()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    notifications: Vec<String>,
    score: u32,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

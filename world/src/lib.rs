#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative run state management for Asari STG.
//!
//! The [`World`] owns every piece of per-run state: score, phase, the
//! terminal flag, the pause flag, the logical clock and all live entities.
//! It is only ever mutated through [`apply`], and read through [`query`].

use std::time::Duration;

use asari_stg_core::{
    Arena, Command, DespawnReason, Difficulty, DifficultyProfile, Event, FlashTint, GruntId,
    MoveIntent, Phase, ProjectileId, ProjectileOwner, Velocity, WorldPoint, SPECIAL_BOSS_DAMAGE,
    SPECIAL_COOLDOWN,
};
use tracing::{debug, info, trace};

mod boss_path;
mod combat;
mod special;

pub use special::SpecialCooldown;

/// Speed of the player ship along each axis, in arena units per second.
pub const PLAYER_SPEED: f32 = 300.0;

const PLAYER_START_X: f32 = 100.0;
const PLAYER_SHOT_SPEED: f32 = 500.0;
const PLAYER_SHOT_OFFSET: f32 = 50.0;
const PLAYER_SHOT_POOL: usize = 30;
const BOSS_SHOT_POOL: usize = 100;
const PROJECTILE_BOUNDS_MARGIN: f32 = 10.0;
const GRUNT_EDGE_OFFSET: f32 = 50.0;

/// Parameters fixed when a run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    arena: Arena,
    difficulty: Difficulty,
    special_cooldown: Duration,
    special_boss_damage: u32,
}

impl WorldConfig {
    /// Creates a configuration with the default special weapon tuning.
    #[must_use]
    pub const fn new(arena: Arena, difficulty: Difficulty) -> Self {
        Self {
            arena,
            difficulty,
            special_cooldown: SPECIAL_COOLDOWN,
            special_boss_damage: SPECIAL_BOSS_DAMAGE,
        }
    }

    /// Overrides the special weapon cooldown.
    #[must_use]
    pub const fn with_special_cooldown(mut self, cooldown: Duration) -> Self {
        self.special_cooldown = cooldown;
        self
    }

    /// Overrides the damage the special weapon deals to the boss.
    #[must_use]
    pub const fn with_special_boss_damage(mut self, damage: u32) -> Self {
        self.special_boss_damage = damage;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(Arena::default(), Difficulty::default())
    }
}

/// How a finished run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Whether the boss was defeated.
    pub victory: bool,
    /// Score shown on the result screen, clear bonus included.
    pub final_score: u32,
}

/// Represents the authoritative state of a single run.
#[derive(Debug)]
pub struct World {
    arena: Arena,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    clock: Duration,
    score: u32,
    phase: Phase,
    outcome: Option<RunOutcome>,
    paused: bool,
    player: Player,
    grunts: Vec<Grunt>,
    boss: Option<Boss>,
    projectiles: Vec<Projectile>,
    special: SpecialCooldown,
    special_boss_damage: u32,
    next_grunt: u32,
    next_projectile: u32,
}

impl World {
    /// Creates a fresh run using the provided configuration.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let arena = config.arena;
        Self {
            arena,
            difficulty: config.difficulty,
            profile: config.difficulty.profile(),
            clock: Duration::ZERO,
            score: 0,
            phase: Phase::Swarm,
            outcome: None,
            paused: false,
            player: Player {
                position: WorldPoint::new(PLAYER_START_X, arena.height() / 2.0),
                intent: MoveIntent::default(),
            },
            grunts: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            special: SpecialCooldown::new(config.special_cooldown),
            special_boss_damage: config.special_boss_damage,
            next_grunt: 0,
            next_projectile: 0,
        }
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let (horizontal, vertical) = self.player.intent.axes();
        let velocity = Velocity::new(horizontal * PLAYER_SPEED, vertical * PLAYER_SPEED);
        self.player.position = self
            .arena
            .clamp(self.player.position.advanced(velocity, dt));

        let mut index = 0;
        while index < self.grunts.len() {
            let grunt = &mut self.grunts[index];
            grunt.position = grunt.position.advanced(grunt.velocity, dt);
            if grunt.position.x < -GRUNT_EDGE_OFFSET {
                let grunt = self.grunts.remove(index);
                out_events.push(Event::GruntDespawned {
                    grunt: grunt.id,
                    reason: DespawnReason::OffScreen,
                });
            } else {
                index += 1;
            }
        }

        let arena = self.arena;
        self.projectiles.retain_mut(|projectile| {
            projectile.position = projectile.position.advanced(projectile.velocity, dt);
            let inside = arena.contains_with_margin(projectile.position, PROJECTILE_BOUNDS_MARGIN);
            if !inside {
                out_events.push(Event::ProjectileDeactivated {
                    projectile: projectile.id,
                });
            }
            inside
        });

        if let Some(boss) = self.boss.as_mut() {
            boss.elapsed = boss.elapsed.saturating_add(dt);
            boss.position = boss_path::position(boss.elapsed, &arena);
            if let Some(flash) = boss.flash.as_mut() {
                flash.remaining = flash.remaining.saturating_sub(dt);
                if flash.remaining.is_zero() {
                    boss.flash = None;
                    out_events.push(Event::BossFlashCleared);
                }
            }
        }
    }

    fn spawn_grunt(&mut self, y: f32, out_events: &mut Vec<Event>) {
        let id = GruntId::new(self.next_grunt);
        self.next_grunt = self.next_grunt.wrapping_add(1);
        let position = WorldPoint::new(self.arena.width() + GRUNT_EDGE_OFFSET, y);
        self.grunts.push(Grunt {
            id,
            position,
            velocity: Velocity::new(-self.profile.enemy_speed, 0.0),
        });
        trace!(grunt = id.get(), y, "grunt spawned");
        out_events.push(Event::GruntSpawned {
            grunt: id,
            position,
        });
    }

    fn enter_boss_phase(&mut self, out_events: &mut Vec<Event>) {
        self.phase = Phase::Boss;
        for grunt in self.grunts.drain(..) {
            out_events.push(Event::GruntDespawned {
                grunt: grunt.id,
                reason: DespawnReason::BossArrival,
            });
        }

        let max_hp = self.profile.boss_hp;
        self.boss = Some(Boss {
            position: boss_path::position(Duration::ZERO, &self.arena),
            elapsed: Duration::ZERO,
            hp: max_hp,
            max_hp,
            flash: None,
        });
        info!(score = self.score, max_hp, "boss phase started");
        out_events.push(Event::BossPhaseStarted { max_hp });
    }

    fn fire_player_shot(&mut self, out_events: &mut Vec<Event>) {
        if self.live_projectiles(ProjectileOwner::Player) >= PLAYER_SHOT_POOL {
            return;
        }
        let origin = WorldPoint::new(
            self.player.position.x + PLAYER_SHOT_OFFSET,
            self.player.position.y,
        );
        self.launch(
            ProjectileOwner::Player,
            origin,
            Velocity::new(PLAYER_SHOT_SPEED, 0.0),
            out_events,
        );
    }

    fn fire_boss_volley(&mut self, velocities: Vec<Velocity>, out_events: &mut Vec<Event>) {
        let Some(origin) = self.boss.as_ref().map(|boss| boss.position) else {
            return;
        };
        for velocity in velocities {
            if self.live_projectiles(ProjectileOwner::Boss) >= BOSS_SHOT_POOL {
                break;
            }
            self.launch(ProjectileOwner::Boss, origin, velocity, out_events);
        }
    }

    fn launch(
        &mut self,
        owner: ProjectileOwner,
        position: WorldPoint,
        velocity: Velocity,
        out_events: &mut Vec<Event>,
    ) {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        self.projectiles.push(Projectile {
            id,
            owner,
            position,
            velocity,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            owner,
            position,
            velocity,
        });
    }

    fn live_projectiles(&self, owner: ProjectileOwner) -> usize {
        self.projectiles
            .iter()
            .filter(|projectile| projectile.owner == owner)
            .count()
    }

    fn projectile_index(&self, projectile: ProjectileId, owner: ProjectileOwner) -> Option<usize> {
        self.projectiles
            .iter()
            .position(|candidate| candidate.id == projectile && candidate.owner == owner)
    }

    fn grunt_index(&self, grunt: GruntId) -> Option<usize> {
        self.grunts.iter().position(|candidate| candidate.id == grunt)
    }

    fn award(&mut self, points: u32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(points);
        out_events.push(Event::ScoreDelta { points });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the run has ended every command is absorbed without effect. While the
/// run is paused only [`Command::SetPaused`] is honoured, so no timer advances
/// and no producer fires until the run resumes.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    if let Command::SetPaused { paused } = command {
        if world.paused != paused {
            world.paused = paused;
            debug!(paused, "pause state changed");
            out_events.push(Event::PauseChanged { paused });
        }
        return;
    }

    if world.paused {
        return;
    }

    match command {
        Command::SetPaused { .. } => {}
        Command::Tick { dt } => world.advance(dt, out_events),
        Command::SteerPlayer { intent } => world.player.intent = intent,
        Command::WarpPlayer { position } => world.player.position = world.arena.clamp(position),
        Command::FirePlayerShot => world.fire_player_shot(out_events),
        Command::SpawnGrunt { y } => {
            if world.phase == Phase::Swarm {
                world.spawn_grunt(y, out_events);
            }
        }
        Command::EnterBossPhase => {
            if world.phase == Phase::Swarm {
                world.enter_boss_phase(out_events);
            }
        }
        Command::FireBossVolley { velocities } => world.fire_boss_volley(velocities, out_events),
        Command::ResolveCollision { collision } => combat::resolve(world, collision, out_events),
        Command::ActivateSpecial => special::activate(world, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{RunOutcome, World};
    use asari_stg_core::{
        Arena, Difficulty, DifficultyProfile, FlashTint, GruntId, Phase, ProjectileId,
        ProjectileOwner, Velocity, WorldPoint,
    };

    /// Current score, clear bonus excluded.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Current gameplay phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Reports whether the run reached its terminal state.
    #[must_use]
    pub fn is_over(world: &World) -> bool {
        world.outcome.is_some()
    }

    /// Outcome of the run, once it ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<RunOutcome> {
        world.outcome
    }

    /// Reports whether the logical clock is suspended.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Logical time elapsed since the run started, pauses excluded.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.clock
    }

    /// Difficulty selected for the run.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Tuning parameters in effect for the run.
    #[must_use]
    pub fn profile(world: &World) -> DifficultyProfile {
        world.profile
    }

    /// Dimensions of the arena.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Current position of the player ship.
    #[must_use]
    pub fn player_position(world: &World) -> WorldPoint {
        world.player.position
    }

    /// Number of grunts currently in play.
    #[must_use]
    pub fn grunt_count(world: &World) -> usize {
        world.grunts.len()
    }

    /// Captures the grunts currently in play, ordered by identifier.
    #[must_use]
    pub fn grunt_view(world: &World) -> Vec<GruntSnapshot> {
        let mut snapshots: Vec<GruntSnapshot> = world
            .grunts
            .iter()
            .map(|grunt| GruntSnapshot {
                id: grunt.id,
                position: grunt.position,
                velocity: grunt.velocity,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Captures the projectiles currently in flight, ordered by identifier.
    #[must_use]
    pub fn projectile_view(world: &World) -> Vec<ProjectileSnapshot> {
        let mut snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                owner: projectile.owner,
                position: projectile.position,
                velocity: projectile.velocity,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Captures the boss, if one is present.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossSnapshot> {
        world.boss.as_ref().map(|boss| BossSnapshot {
            position: boss.position,
            hp: boss.hp,
            max_hp: boss.max_hp,
            flash: boss.flash.map(|flash| flash.tint),
        })
    }

    /// Time left until the special weapon may be activated again.
    #[must_use]
    pub fn special_cooldown_remaining(world: &World) -> Duration {
        world.special.remaining(world.clock)
    }

    /// Reports whether activating the special weapon now would succeed.
    #[must_use]
    pub fn special_ready(world: &World) -> bool {
        world.special.is_ready(world.clock)
    }

    /// Immutable representation of a grunt.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct GruntSnapshot {
        /// Identifier assigned to the grunt.
        pub id: GruntId,
        /// Current position.
        pub position: WorldPoint,
        /// Current velocity.
        pub velocity: Velocity,
    }

    /// Immutable representation of a projectile in flight.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ProjectileSnapshot {
        /// Identifier assigned to the projectile.
        pub id: ProjectileId,
        /// Side that fired the projectile.
        pub owner: ProjectileOwner,
        /// Current position.
        pub position: WorldPoint,
        /// Current velocity.
        pub velocity: Velocity,
    }

    /// Immutable representation of the boss.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BossSnapshot {
        /// Current position.
        pub position: WorldPoint,
        /// Remaining hit points.
        pub hp: u32,
        /// Hit points the boss started with.
        pub max_hp: u32,
        /// Damage tint currently applied, if any.
        pub flash: Option<FlashTint>,
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: WorldPoint,
    intent: MoveIntent,
}

#[derive(Clone, Copy, Debug)]
struct Grunt {
    id: GruntId,
    position: WorldPoint,
    velocity: Velocity,
}

#[derive(Clone, Copy, Debug)]
struct Boss {
    position: WorldPoint,
    elapsed: Duration,
    hp: u32,
    max_hp: u32,
    flash: Option<Flash>,
}

#[derive(Clone, Copy, Debug)]
struct Flash {
    tint: FlashTint,
    remaining: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    id: ProjectileId,
    owner: ProjectileOwner,
    position: WorldPoint,
    velocity: Velocity,
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Asari STG gameplay crates.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values.
//! Systems react to the event stream deterministically, while presentation
//! layers only ever read the subset flagged by [`Event::is_notification`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod difficulty;

pub use difficulty::{resolve_profile, Difficulty, DifficultyProfile};

/// Points awarded for every grunt destroyed by a shot or the special weapon.
pub const SCORE_PER_GRUNT: u32 = 10;

/// Fixed bonus added to the final score when the boss is defeated.
pub const CLEAR_BONUS: u32 = 1_000;

/// Score at which the swarm ends and the boss encounter begins.
pub const DEFAULT_BOSS_SPAWN_SCORE: u32 = 500;

/// Minimum time that must pass between two special weapon activations.
pub const SPECIAL_COOLDOWN: Duration = Duration::from_secs(10);

/// Damage dealt to the boss by a single special weapon activation.
pub const SPECIAL_BOSS_DAMAGE: u32 = 5;

/// Speed of every projectile fired by the boss, in world units per second.
pub const BOSS_PROJECTILE_SPEED: f32 = 200.0;

/// Angular offset between the shots of a triple volley, in radians.
pub const TRIPLE_SPREAD_RADIANS: f32 = 0.3;

/// Length of the tint applied to the boss after it takes damage.
pub const BOSS_FLASH_DURATION: Duration = Duration::from_millis(100);

/// Distance kept between spawned grunts and the top or bottom arena edge.
pub const SPAWN_EDGE_MARGIN: f32 = 50.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the logical clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Suspends or resumes the logical clock.
    SetPaused {
        /// Whether the run should be paused after the command.
        paused: bool,
    },
    /// Replaces the player's current movement intent.
    SteerPlayer {
        /// Directions currently held by the player.
        intent: MoveIntent,
    },
    /// Moves the player directly to a position, as touch dragging does.
    WarpPlayer {
        /// Requested position, clamped to the arena by the world.
        position: WorldPoint,
    },
    /// Requests a player shot from the front of the ship.
    FirePlayerShot,
    /// Requests that a grunt enter the arena at the right edge.
    SpawnGrunt {
        /// Vertical coordinate of the spawned grunt.
        y: f32,
    },
    /// Requests the irreversible transition from the swarm to the boss.
    EnterBossPhase,
    /// Requests that the boss fire one projectile per provided velocity.
    FireBossVolley {
        /// Initial velocity of each projectile in the volley.
        velocities: Vec<Velocity>,
    },
    /// Delivers an overlap fact detected by the engine.
    ResolveCollision {
        /// Overlap that occurred.
        collision: Collision,
    },
    /// Requests activation of the special weapon.
    ActivateSpecial,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the logical clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the run was paused or resumed.
    PauseChanged {
        /// Whether the run is paused after the change.
        paused: bool,
    },
    /// Confirms that a grunt entered the arena.
    GruntSpawned {
        /// Identifier assigned to the grunt.
        grunt: GruntId,
        /// Position the grunt spawned at.
        position: WorldPoint,
    },
    /// Confirms that a grunt left play.
    GruntDespawned {
        /// Identifier of the removed grunt.
        grunt: GruntId,
        /// Why the grunt was removed.
        reason: DespawnReason,
    },
    /// Confirms that a projectile was fired.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Side that fired the projectile.
        owner: ProjectileOwner,
        /// Position the projectile was fired from.
        position: WorldPoint,
        /// Initial velocity of the projectile.
        velocity: Velocity,
    },
    /// Confirms that a projectile hit something or left the arena.
    ProjectileDeactivated {
        /// Identifier of the deactivated projectile.
        projectile: ProjectileId,
    },
    /// Notifies the presentation layer that the score increased.
    ScoreDelta {
        /// Points added to the score.
        points: u32,
    },
    /// Notifies the presentation layer that the boss encounter began.
    BossPhaseStarted {
        /// Hit points the boss starts with.
        max_hp: u32,
    },
    /// Notifies the presentation layer of the boss's remaining hit points.
    BossHpChanged {
        /// Hit points left after the change.
        hp: u32,
    },
    /// Signals the start of the transient damage tint on the boss.
    BossFlashStarted {
        /// Tint the presentation layer should apply.
        tint: FlashTint,
    },
    /// Signals that the damage tint elapsed.
    BossFlashCleared,
    /// Confirms a successful special weapon activation.
    SpecialActivated {
        /// Logical time of the activation.
        at: Duration,
    },
    /// Notifies the presentation layer of the special weapon cooldown.
    CooldownRemaining {
        /// Seconds left until the special weapon is ready again.
        seconds: f32,
    },
    /// Notifies the presentation layer that the run ended.
    RunEnded {
        /// Whether the boss was defeated.
        victory: bool,
        /// Score carried to the result screen, clear bonus included.
        final_score: u32,
    },
}

impl Event {
    /// Reports whether the event belongs to the one-way UI notification channel.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(
            self,
            Self::ScoreDelta { .. }
                | Self::BossHpChanged { .. }
                | Self::BossPhaseStarted { .. }
                | Self::CooldownRemaining { .. }
                | Self::RunEnded { .. }
        )
    }
}

/// Gameplay phase of a run. Advances from `Swarm` to `Boss` at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Grunts spawn on a timer until the score threshold is reached.
    #[default]
    Swarm,
    /// A single boss is present and grunt spawning is disabled.
    Boss,
}

/// Unique identifier assigned to a grunt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GruntId(u32);

impl GruntId {
    /// Creates a new grunt identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Side that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    /// Shot fired by the player; hurts grunts and the boss.
    Player,
    /// Shot fired by the boss; hurts the player.
    Boss,
}

/// Anything that ends the run when it touches the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    /// Body contact with a grunt.
    Grunt(GruntId),
    /// Body contact with the boss.
    Boss,
    /// A projectile fired by the boss.
    Projectile(ProjectileId),
}

/// Overlap facts delivered by the engine's collision detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collision {
    /// A player shot overlapped a grunt.
    ProjectileHitGrunt {
        /// Shot involved in the overlap.
        projectile: ProjectileId,
        /// Grunt involved in the overlap.
        grunt: GruntId,
    },
    /// A player shot overlapped the boss.
    ProjectileHitBoss {
        /// Shot involved in the overlap.
        projectile: ProjectileId,
    },
    /// The player overlapped a hazard.
    PlayerHitHazard {
        /// Hazard the player touched.
        hazard: Hazard,
    },
}

impl Collision {
    /// Order in which collisions from the same batch are resolved.
    ///
    /// Boss hits resolve first so that a victory produced in the same frame as
    /// a hazard overlap is not overwritten by the defeat.
    #[must_use]
    pub const fn resolution_rank(&self) -> u8 {
        match self {
            Self::ProjectileHitBoss { .. } => 0,
            Self::ProjectileHitGrunt { .. } => 1,
            Self::PlayerHitHazard { .. } => 2,
        }
    }
}

/// Why a grunt was removed from play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DespawnReason {
    /// Destroyed by a player shot.
    Shot,
    /// Scrolled past the left edge of the arena.
    OffScreen,
    /// Cleared when the boss arrived.
    BossArrival,
    /// Destroyed by the special weapon.
    Special,
}

/// Tint applied to the boss while it flashes after damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlashTint {
    /// Red tint applied after a player shot.
    Hit,
    /// Orange tint applied after the special weapon.
    Special,
}

/// Shot layouts available to the boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPattern {
    /// One shot aimed straight at the player.
    Single,
    /// Three shots fanned around the aim direction.
    Triple,
}

impl AttackPattern {
    /// Angular offsets of each shot relative to the aim direction.
    #[must_use]
    pub fn angle_offsets(self) -> &'static [f32] {
        match self {
            Self::Single => &SINGLE_OFFSETS,
            Self::Triple => &TRIPLE_OFFSETS,
        }
    }
}

static SINGLE_OFFSETS: [f32; 1] = [0.0];
static TRIPLE_OFFSETS: [f32; 3] = [-TRIPLE_SPREAD_RADIANS, 0.0, TRIPLE_SPREAD_RADIANS];

/// Directions currently held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
    /// Up is held.
    pub up: bool,
    /// Down is held.
    pub down: bool,
}

impl MoveIntent {
    /// Resolves the held directions into a unit step per axis.
    ///
    /// Left takes precedence over right and up over down, so opposing keys
    /// never cancel out.
    #[must_use]
    pub const fn axes(self) -> (f32, f32) {
        let horizontal = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let vertical = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        (horizontal, vertical)
    }
}

/// Position expressed in arena units, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the point displaced by `velocity` over `dt`.
    #[must_use]
    pub fn advanced(self, velocity: Velocity, dt: Duration) -> Self {
        let seconds = dt.as_secs_f32();
        Self {
            x: self.x + velocity.dx * seconds,
            y: self.y + velocity.dy * seconds,
        }
    }

    /// Angle of the vector pointing from `self` towards `other`, in radians.
    #[must_use]
    pub fn angle_to(self, other: WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Velocity expressed in arena units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal component.
    pub dx: f32,
    /// Vertical component.
    pub dy: f32,
}

impl Velocity {
    /// Creates a new velocity from its components.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Creates a velocity of magnitude `speed` pointing along `angle`.
    #[must_use]
    pub fn from_angle(angle: f32, speed: f32) -> Self {
        Self {
            dx: angle.cos() * speed,
            dy: angle.sin() * speed,
        }
    }

    /// Magnitude of the velocity.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.dx.hypot(self.dy)
    }
}

/// Dimensions of the playable arena.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    /// Creates a new arena description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the arena.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the arena.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies inside the arena grown by `margin` on every side.
    #[must_use]
    pub fn contains_with_margin(&self, point: WorldPoint, margin: f32) -> bool {
        point.x > -margin
            && point.x < self.width + margin
            && point.y > -margin
            && point.y < self.height + margin
    }

    /// Clamps the point so it lies inside the arena.
    #[must_use]
    pub fn clamp(&self, point: WorldPoint) -> WorldPoint {
        WorldPoint {
            x: point.x.clamp(0.0, self.width),
            y: point.y.clamp(0.0, self.height),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1_280.0, 720.0)
    }
}

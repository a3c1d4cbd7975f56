//! Static difficulty presets selected on the title screen.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Named difficulty presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Slow spawns, weak boss, single-shot attacks only.
    Easy,
    /// Default preset.
    #[default]
    Normal,
    /// Fast spawns and a sturdy, aggressive boss.
    Hard,
}

impl Difficulty {
    /// Every preset in menu order.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Resolves a preset from its name, falling back to [`Difficulty::Normal`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Easy" => Self::Easy,
            "Normal" => Self::Normal,
            "Hard" => Self::Hard,
            _ => Self::Normal,
        }
    }

    /// Canonical name of the preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// Tuning parameters for the preset.
    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                spawn_delay: Duration::from_millis(1_500),
                enemy_speed: 80.0,
                boss_hp: 15,
                boss_attack_delay: Duration::from_millis(2_000),
            },
            Self::Normal => DifficultyProfile {
                spawn_delay: Duration::from_millis(1_000),
                enemy_speed: 100.0,
                boss_hp: 30,
                boss_attack_delay: Duration::from_millis(1_500),
            },
            Self::Hard => DifficultyProfile {
                spawn_delay: Duration::from_millis(500),
                enemy_speed: 150.0,
                boss_hp: 50,
                boss_attack_delay: Duration::from_millis(1_000),
            },
        }
    }

    /// Whether the boss may fire the triple volley at this difficulty.
    #[must_use]
    pub const fn allows_triple_attack(self) -> bool {
        !matches!(self, Self::Easy)
    }
}

/// Tunable parameters fixed for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Time between two grunt spawns.
    pub spawn_delay: Duration,
    /// Leftward speed of every grunt, in arena units per second.
    pub enemy_speed: f32,
    /// Hit points the boss starts with.
    pub boss_hp: u32,
    /// Time between two boss volleys.
    pub boss_attack_delay: Duration,
}

/// Resolves the profile for a difficulty name. Unknown names yield the Normal profile.
#[must_use]
pub fn resolve_profile(name: &str) -> DifficultyProfile {
    Difficulty::from_name(name).profile()
}

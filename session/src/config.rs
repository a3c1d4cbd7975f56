//! Run configuration loaded from TOML.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use asari_stg_core::{Arena, Difficulty, DEFAULT_BOSS_SPAWN_SCORE, SPECIAL_BOSS_DAMAGE};
use asari_stg_world::WorldConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when the configuration does not provide one.
pub const DEFAULT_RNG_SEED: u64 = 0x5eed_a5a1;

/// Autofire cadence used by touch controls.
pub const TOUCH_AUTOFIRE_INTERVAL_MS: u64 = 200;

/// Tunables for a single run. Every key is optional in the TOML form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Width of the arena in world units.
    pub arena_width: f32,
    /// Height of the arena in world units.
    pub arena_height: f32,
    /// Score at which the boss encounter begins.
    pub boss_spawn_score: u32,
    /// Minimum time between two special weapon activations, in milliseconds.
    pub special_cooldown_ms: u64,
    /// Damage the special weapon deals to the boss.
    pub special_boss_damage: u32,
    /// Seed for every random draw made during the run.
    pub rng_seed: u64,
    /// Interval of the automatic player fire, in milliseconds. Disabled when absent.
    pub autofire_interval_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let arena = Arena::default();
        Self {
            arena_width: arena.width(),
            arena_height: arena.height(),
            boss_spawn_score: DEFAULT_BOSS_SPAWN_SCORE,
            special_cooldown_ms: 10_000,
            special_boss_damage: SPECIAL_BOSS_DAMAGE,
            rng_seed: DEFAULT_RNG_SEED,
            autofire_interval_ms: None,
        }
    }
}

impl GameConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(ConfigError::Arena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.boss_spawn_score == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.special_cooldown_ms == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if self.autofire_interval_ms == Some(0) {
            return Err(ConfigError::ZeroAutofire);
        }
        Ok(())
    }

    /// Arena described by the configuration.
    #[must_use]
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Special weapon cooldown.
    #[must_use]
    pub fn special_cooldown(&self) -> Duration {
        Duration::from_millis(self.special_cooldown_ms)
    }

    /// Autofire cadence, if enabled.
    #[must_use]
    pub fn autofire_interval(&self) -> Option<Duration> {
        self.autofire_interval_ms.map(Duration::from_millis)
    }

    /// Builds the world parameters for a run at `difficulty`.
    #[must_use]
    pub fn world_config(&self, difficulty: Difficulty) -> WorldConfig {
        WorldConfig::new(self.arena(), difficulty)
            .with_special_cooldown(self.special_cooldown())
            .with_special_boss_damage(self.special_boss_damage)
    }
}

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config at {}", .path.display())]
    Read {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or contains unknown keys.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The arena has a non-positive dimension.
    #[error("arena dimensions must be positive, got {width}x{height}")]
    Arena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The boss would arrive before any grunt was shot.
    #[error("boss_spawn_score must be greater than zero")]
    ZeroThreshold,
    /// The special weapon would have no cooldown.
    #[error("special_cooldown_ms must be greater than zero")]
    ZeroCooldown,
    /// Autofire would fire without pause.
    #[error("autofire_interval_ms must be greater than zero")]
    ZeroAutofire,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("defaults are valid");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.special_cooldown(), Duration::from_secs(10));
        assert_eq!(config.autofire_interval(), None);
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let config = GameConfig::from_toml_str(
            "boss_spawn_score = 200\nautofire_interval_ms = 200\nrng_seed = 7\n",
        )
        .expect("valid config");
        assert_eq!(config.boss_spawn_score, 200);
        assert_eq!(config.autofire_interval(), Some(Duration::from_millis(200)));
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.arena(), Arena::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = GameConfig::from_toml_str("boss_hp = 3\n").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            ("arena_width = 0.0", "arena"),
            ("arena_height = -5.0", "arena"),
            ("boss_spawn_score = 0", "boss_spawn_score"),
            ("special_cooldown_ms = 0", "special_cooldown_ms"),
            ("autofire_interval_ms = 0", "autofire_interval_ms"),
        ];
        for (document, needle) in cases {
            let error = GameConfig::from_toml_str(document).unwrap_err();
            assert!(error.to_string().contains(needle), "{document}: {error}");
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let error = GameConfig::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("does/not/exist.toml"));
    }
}

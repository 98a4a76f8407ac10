//! Game configuration
//!
//! Loaded from an optional JSON file; every field falls back to the
//! built-in defaults in [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Field ===
    /// Render canvas width
    pub field_width: i32,
    /// Render canvas height
    pub field_height: i32,
    /// Spawn positions are drawn from [0, field - spawn_margin)
    pub spawn_margin: i32,

    // === Entities ===
    /// Side of the player's bounding square (also the enemy and pickup reach)
    pub entity_size: i32,
    /// Number of pickups placed at session start
    pub pickup_count: usize,
    /// Number of enemies placed at session start
    pub enemy_count: usize,
    /// Player start position
    pub player_start: (i32, i32),
    /// Player displacement per move command
    pub move_step: i32,

    // === Timing ===
    /// Target updates per second
    pub tick_rate_hz: u32,
    /// Minimum gap between two collection passes, in milliseconds
    pub collection_cooldown_ms: u64,

    // === Session ===
    /// RNG seed (random if unset)
    pub seed: Option<u64>,
    /// Abort the session after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            spawn_margin: SPAWN_MARGIN,

            entity_size: ENTITY_SIZE,
            pickup_count: PICKUP_COUNT,
            enemy_count: ENEMY_COUNT,
            player_start: PLAYER_START,
            move_step: MOVE_STEP,

            tick_rate_hz: TICK_RATE_HZ,
            collection_cooldown_ms: COLLECTION_COOLDOWN_MS,

            seed: None,
            max_ticks: None,
        }
    }
}

impl Config {
    /// Load a config from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.entity_size <= 0 {
            return invalid(format!("entity_size must be positive, got {}", self.entity_size));
        }
        if self.field_width <= self.entity_size || self.field_height <= self.entity_size {
            return invalid(format!(
                "field {}x{} must be larger than entity_size {}",
                self.field_width, self.field_height, self.entity_size
            ));
        }
        if self.spawn_margin < 0
            || self.field_width <= self.spawn_margin
            || self.field_height <= self.spawn_margin
        {
            return invalid(format!(
                "spawn_margin {} does not fit field {}x{}",
                self.spawn_margin, self.field_width, self.field_height
            ));
        }
        // Spawns must land inside the wrap window, which stops entity_size short
        if self.spawn_margin < self.entity_size {
            return invalid(format!(
                "spawn_margin {} must be at least entity_size {}",
                self.spawn_margin, self.entity_size
            ));
        }
        if self.pickup_count == 0 {
            return invalid("pickup_count must be at least 1".to_string());
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz must be positive".to_string());
        }
        Ok(())
    }

    /// Upper corner of the wrap window (lower corner is the origin)
    pub fn wrap_bounds(&self) -> IVec2 {
        IVec2::new(
            self.field_width - self.entity_size,
            self.field_height - self.entity_size,
        )
    }

    /// Exclusive upper corner of the spawn area
    pub fn spawn_extent(&self) -> IVec2 {
        IVec2::new(
            self.field_width - self.spawn_margin,
            self.field_height - self.spawn_margin,
        )
    }

    /// Time between two update+render cycles
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }

    pub fn collection_cooldown(&self) -> Duration {
        Duration::from_millis(self.collection_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_layout() {
        let config = Config::default();
        assert_eq!(config.wrap_bounds(), IVec2::new(770, 570));
        assert_eq!(config.spawn_extent(), IVec2::new(750, 550));
        assert_eq!(config.collection_cooldown(), Duration::from_millis(200));
        assert_eq!(config.pickup_count, 9);
        assert_eq!(config.enemy_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "pickup_count": 3, "seed": 7 }"#).unwrap();
        assert_eq!(config.pickup_count, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.enemy_count, ENEMY_COUNT);
        assert_eq!(config.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_validate_rejects_empty_pickups() {
        let config = Config {
            pickup_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_tiny_field() {
        let config = Config {
            field_width: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_spawns_past_wrap_bounds() {
        let config = Config {
            spawn_margin: 10,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // Margin equal to the entity size puts the last spawn cell on the bound
        let config = Config {
            spawn_margin: ENTITY_SIZE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_extent(), config.wrap_bounds());
    }

    #[test]
    fn test_sixty_hz_interval() {
        let micros = Config::default().tick_interval().as_micros();
        assert!((16_666..=16_667).contains(&micros));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/coin-dash.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("coin-dash-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "enemy_count": 2, "tick_rate_hz": 30 }"#).unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.enemy_count, 2);
        assert_eq!(config.tick_rate_hz, 30);

        let bad = std::env::temp_dir().join(format!("coin-dash-bad-{}.json", std::process::id()));
        std::fs::write(&bad, "{ not json").unwrap();
        let err = Config::load(&bad).unwrap_err();
        std::fs::remove_file(&bad).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

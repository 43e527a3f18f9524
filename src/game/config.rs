use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the cubic grid
    pub grid_size: u32,
    pub min_grid_size: u32,
    pub max_grid_size: u32,

    /// Ticks per second
    pub speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Speed change per settings adjustment
    pub speed_step: f64,

    /// Score awarded per food eaten
    pub points_per_food: u32,
    /// Seconds between eating and the replacement food appearing
    pub food_respawn_delay: f64,
    /// Rejection-sampling cap before placement is declared exhausted
    pub max_placement_attempts: u32,

    /// Start with the autopilot steering
    pub autopilot: bool,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 14,
            min_grid_size: 10,
            max_grid_size: 24,
            speed: 3.0,
            min_speed: 1.0,
            max_speed: 6.0,
            speed_step: 0.5,
            points_per_food: 10,
            food_respawn_delay: 0.3,
            max_placement_attempts: 100_000,
            autopilot: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Fixed seed and instant food respawn; handy for deterministic runs
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            food_respawn_delay: 0.0,
            ..Default::default()
        }
    }

    /// Read a JSON config file. Missing fields take their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn clamp_grid_size(&self, grid_size: i64) -> u32 {
        grid_size.clamp(i64::from(self.min_grid_size), i64::from(self.max_grid_size)) as u32
    }

    pub fn clamp_speed(&self, speed: f64) -> f64 {
        speed.clamp(self.min_speed, self.max_speed)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_grid_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_grid_size must be at least 2, got {}",
                self.min_grid_size
            )));
        }

        if self.min_grid_size > self.max_grid_size {
            return Err(ConfigError::Invalid(format!(
                "min_grid_size ({}) cannot exceed max_grid_size ({})",
                self.min_grid_size, self.max_grid_size
            )));
        }

        if !(self.min_grid_size..=self.max_grid_size).contains(&self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be in [{}, {}], got {}",
                self.min_grid_size, self.max_grid_size, self.grid_size
            )));
        }

        if !(self.min_speed > 0.0 && self.min_speed <= self.max_speed) {
            return Err(ConfigError::Invalid(format!(
                "speed range must satisfy 0 < min_speed <= max_speed, got [{}, {}]",
                self.min_speed, self.max_speed
            )));
        }

        if !(self.min_speed..=self.max_speed).contains(&self.speed) {
            return Err(ConfigError::Invalid(format!(
                "speed must be in [{}, {}], got {}",
                self.min_speed, self.max_speed, self.speed
            )));
        }

        if self.speed_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "speed_step must be positive, got {}",
                self.speed_step
            )));
        }

        if self.food_respawn_delay < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "food_respawn_delay must be non-negative, got {}",
                self.food_respawn_delay
            )));
        }

        if self.max_placement_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_placement_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 14);
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.points_per_food, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.min_grid_size, 10);
    }

    #[test]
    fn test_clamping() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_grid_size(3), 10);
        assert_eq!(config.clamp_grid_size(99), 24);
        assert_eq!(config.clamp_grid_size(17), 17);
        assert_eq!(config.clamp_speed(0.5), 1.0);
        assert_eq!(config.clamp_speed(9.0), 6.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::new(30);
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.speed = 0.0;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.max_placement_attempts = 0;
        assert!(config.validate().is_err());

        config = GameConfig::default();
        config.min_grid_size = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 12, "seed": 42 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_grid_size, 24);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

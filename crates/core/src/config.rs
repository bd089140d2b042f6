//! Game configuration.
//!
//! Every tunable constant of the simulation lives here. Values can be
//! overridden from a TOML file; any field left out keeps its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::WorldBounds;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// World constants and gameplay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ========================================================================
    // World
    // ========================================================================
    /// World width in world units.
    pub world_width: f32,

    /// World height in world units.
    pub world_height: f32,

    /// Number of food items spawned at session start.
    pub food_count: usize,

    /// Number of AI agents spawned at session start.
    pub ai_count: usize,

    // ========================================================================
    // Agents
    // ========================================================================
    /// Size every agent starts from and resets to.
    pub base_size: f32,

    /// Radius of a food item (drawing only; eating uses the eater's size).
    pub food_size: f32,

    /// Speed of a base-size agent before scaling.
    pub max_speed: f32,

    /// Multiplier applied to every agent's speed.
    pub player_speed_scale: f32,

    /// Extra multiplier applied to AI speed on top of `player_speed_scale`.
    pub ai_speed_factor: f32,

    /// Player stops moving when the pointer is closer than this.
    pub stop_distance: f32,

    /// Initial AI sizes are `base_size + U[0, ai_size_jitter)`.
    pub ai_size_jitter: f32,

    /// Respawned AI sizes are `base_size + U[0, ai_respawn_jitter)`.
    pub ai_respawn_jitter: f32,

    // ========================================================================
    // Growth
    // ========================================================================
    /// Size gained by the player per food item.
    pub growth_rate: f32,

    /// Fraction of `growth_rate` an AI gains per food item.
    pub ai_growth_factor: f32,

    /// Fraction of the victim's size gained by eating another agent.
    pub eat_growth_fraction: f32,

    /// An agent must be this many times larger than another to eat it.
    pub eat_ratio: f32,

    // ========================================================================
    // AI behaviour
    // ========================================================================
    /// AI chases the player only inside this radius.
    pub chase_distance: f32,

    /// AI flees the player only inside this radius.
    pub flee_distance: f32,

    /// AI chases when `player_size < ai_size * chase_size_ratio`.
    pub chase_size_ratio: f32,

    /// AI flees when `player_size > ai_size * flee_size_ratio`.
    pub flee_size_ratio: f32,

    // ========================================================================
    // Timing
    // ========================================================================
    /// Delay between a food item being eaten and reappearing (ms).
    pub food_respawn_delay_ms: u64,

    /// Mirrors not refreshed for longer than this are evicted (ms).
    pub peer_stale_timeout_ms: u64,

    // ========================================================================
    // Session
    // ========================================================================
    /// Length of the random alphanumeric peer identifier.
    pub peer_id_length: usize,

    /// Viewport width used to derive the camera offset.
    pub viewport_width: f32,

    /// Viewport height used to derive the camera offset.
    pub viewport_height: f32,

    /// Pointer position (screen coordinates) before any input arrives.
    pub initial_pointer: [f32; 2],

    /// Where eaten food waits until it respawns.
    pub off_world: [f32; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 2000.0,
            world_height: 2000.0,
            food_count: 200,
            ai_count: 5,
            base_size: 20.0,
            food_size: 8.0,
            max_speed: 5.0,
            player_speed_scale: 1.5,
            ai_speed_factor: 0.8,
            stop_distance: 5.0,
            ai_size_jitter: 20.0,
            ai_respawn_jitter: 10.0,
            growth_rate: 0.5,
            ai_growth_factor: 0.5,
            eat_growth_fraction: 0.3,
            eat_ratio: 1.1,
            chase_distance: 300.0,
            flee_distance: 200.0,
            chase_size_ratio: 0.9,
            flee_size_ratio: 1.1,
            food_respawn_delay_ms: 2000,
            peer_stale_timeout_ms: 3000,
            peer_id_length: 8,
            viewport_width: 800.0,
            viewport_height: 600.0,
            initial_pointer: [400.0, 300.0],
            off_world: [-1000.0, -1000.0],
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("base_size", self.base_size),
            ("max_speed", self.max_speed),
            ("player_speed_scale", self.player_speed_scale),
            ("ai_speed_factor", self.ai_speed_factor),
            ("eat_ratio", self.eat_ratio),
            ("chase_size_ratio", self.chase_size_ratio),
            ("flee_size_ratio", self.flee_size_ratio),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        // Sizes only ever grow, and respawned AIs never start below base size.
        let non_negative = [
            ("growth_rate", self.growth_rate),
            ("ai_growth_factor", self.ai_growth_factor),
            ("eat_growth_fraction", self.eat_growth_fraction),
            ("ai_size_jitter", self.ai_size_jitter),
            ("ai_respawn_jitter", self.ai_respawn_jitter),
            ("stop_distance", self.stop_distance),
            ("chase_distance", self.chase_distance),
            ("flee_distance", self.flee_distance),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        let min_dimension = self.base_size * 2.0;
        if !(self.world_width >= min_dimension && self.world_height >= min_dimension) {
            return Err(ConfigError::Invalid(format!(
                "world {}x{} is smaller than two base sizes ({min_dimension})",
                self.world_width, self.world_height
            )));
        }

        if self.peer_id_length == 0 {
            return Err(ConfigError::Invalid("peer_id_length must be at least 1".into()));
        }

        Ok(())
    }

    /// Playable area as bounds.
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(0.0, 0.0, self.world_width, self.world_height)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn off_world_position(&self) -> Vec2 {
        Vec2::from(self.off_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_world_constants() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, 2000.0);
        assert_eq!(config.food_count, 200);
        assert_eq!(config.ai_count, 5);
        assert_eq!(config.food_respawn_delay_ms, 2000);
        assert_eq!(config.peer_stale_timeout_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("ai_count = 12\nworld_width = 500.0\n").unwrap();
        assert_eq!(config.ai_count, 12);
        assert_eq!(config.world_width, 500.0);
        assert_eq!(config.world_height, 2000.0);
        assert_eq!(config.base_size, 20.0);
    }

    #[test]
    fn example_config_is_the_default() {
        let text = include_str!("../../../config/agarium.example.toml");
        assert_eq!(GameConfig::from_toml_str(text).unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_tiny_world() {
        let err = GameConfig::from_toml_str("world_width = 30.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_growth() {
        for text in [
            "growth_rate = -5.0",
            "eat_growth_fraction = -0.3",
            "ai_respawn_jitter = -10.0",
            "flee_distance = -1.0",
        ] {
            let err = GameConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text} was accepted");
        }
    }

    #[test]
    fn rejects_nan_world() {
        let err = GameConfig::from_toml_str("world_width = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_size_ratio() {
        let err = GameConfig::from_toml_str("chase_size_ratio = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_toml() {
        let err = GameConfig::from_toml_str("ai_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

//! Gameplay configuration.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! changes:
//!
//! ```
//! use keyfall_logic::config::GameConfig;
//!
//! let config = GameConfig::from_json(r#"{ "words_per_level": 5, "helper": { "jitter_secs": 0.0 } }"#).unwrap();
//! assert_eq!(config.words_per_level, 5);
//! assert_eq!(config.helper.base_wait_secs, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Dimensions of the area words fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Columns available for placing words.
    pub width: u16,
    /// Row of the failure line.
    pub height: u16,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 30,
        }
    }
}

/// Helper wake scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Wake interval before speed upgrades.
    pub base_wait_secs: f64,
    /// Upper bound of the random delay added to each wake.
    pub jitter_secs: f64,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            base_wait_secs: 0.5,
            jitter_secs: 0.15,
        }
    }
}

/// Garbage-collection cadence and stall length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Seconds between collection rolls.
    pub check_interval_secs: f64,
    pub base_pause_secs: f64,
    pub pause_per_garbage_secs: f64,
    pub max_pause_secs: f64,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: 1.0,
            base_pause_secs: 0.25,
            pause_per_garbage_secs: 0.02,
            max_pause_secs: 3.0,
        }
    }
}

/// Top-level gameplay parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    /// Rows per second.
    pub fall_speed: f32,
    /// Fall time added to a word by a wrong keystroke.
    pub wrong_key_penalty_secs: f64,
    pub spawn_interval_secs: f64,
    /// Words that must be cleared to win a level.
    pub words_per_level: u32,
    pub level_reward: u64,
    /// Reward multiplier per completed level; 1.0 keeps the reward fixed.
    pub reward_growth: f64,
    pub helper: HelperConfig,
    pub hazard: HazardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: PlayfieldConfig::default(),
            fall_speed: 2.0,
            wrong_key_penalty_secs: 1.0,
            spawn_interval_secs: 1.5,
            words_per_level: 20,
            level_reward: 1500,
            reward_growth: 1.0,
            helper: HelperConfig::default(),
            hazard: HazardConfig::default(),
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playfield.width == 0 {
            return Err(invalid("playfield.width", "must be at least 1"));
        }
        if self.playfield.height == 0 {
            return Err(invalid("playfield.height", "must be at least 1"));
        }
        if !positive(f64::from(self.fall_speed)) {
            return Err(invalid("fall_speed", "must be a positive number"));
        }
        if !non_negative(self.wrong_key_penalty_secs) {
            return Err(invalid("wrong_key_penalty_secs", "must not be negative"));
        }
        if !positive(self.spawn_interval_secs) {
            return Err(invalid("spawn_interval_secs", "must be a positive number"));
        }
        if self.words_per_level == 0 {
            return Err(invalid("words_per_level", "must be at least 1"));
        }
        if !(self.reward_growth.is_finite() && self.reward_growth >= 1.0) {
            return Err(invalid("reward_growth", "must be at least 1.0"));
        }
        if !positive(self.helper.base_wait_secs) {
            return Err(invalid("helper.base_wait_secs", "must be a positive number"));
        }
        if !non_negative(self.helper.jitter_secs) {
            return Err(invalid("helper.jitter_secs", "must not be negative"));
        }
        let hazard = &self.hazard;
        if !positive(hazard.check_interval_secs) {
            return Err(invalid(
                "hazard.check_interval_secs",
                "must be a positive number",
            ));
        }
        if !non_negative(hazard.base_pause_secs) {
            return Err(invalid("hazard.base_pause_secs", "must not be negative"));
        }
        if !non_negative(hazard.pause_per_garbage_secs) {
            return Err(invalid(
                "hazard.pause_per_garbage_secs",
                "must not be negative",
            ));
        }
        if !(hazard.max_pause_secs.is_finite() && hazard.max_pause_secs >= hazard.base_pause_secs)
        {
            return Err(invalid(
                "hazard.max_pause_secs",
                "must be at least hazard.base_pause_secs",
            ));
        }
        Ok(())
    }

    /// Row at which an unfinished word is lost.
    pub fn failure_row(&self) -> i32 {
        i32::from(self.playfield.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_nested_override() {
        let config =
            GameConfig::from_json(r#"{ "playfield": { "height": 12 }, "fall_speed": 1.0 }"#)
                .unwrap();
        assert_eq!(config.playfield.height, 12);
        assert_eq!(config.playfield.width, 80);
        assert_eq!(config.fall_speed, 1.0);
        assert_eq!(config.failure_row(), 12);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let cases = [
            (r#"{ "playfield": { "width": 0 } }"#, "playfield.width"),
            (r#"{ "fall_speed": 0.0 }"#, "fall_speed"),
            (r#"{ "words_per_level": 0 }"#, "words_per_level"),
            (r#"{ "spawn_interval_secs": -1.0 }"#, "spawn_interval_secs"),
            (r#"{ "reward_growth": 0.5 }"#, "reward_growth"),
            (r#"{ "helper": { "jitter_secs": -0.1 } }"#, "helper.jitter_secs"),
            (
                r#"{ "hazard": { "base_pause_secs": 2.0, "max_pause_secs": 1.0 } }"#,
                "hazard.max_pause_secs",
            ),
        ];
        for (json, expected) in cases {
            match GameConfig::from_json(json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }
}

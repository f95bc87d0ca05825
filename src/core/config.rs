//! Game tuning.
//!
//! Every tunable lives in [`RunnerConfig`] (the t-rex's own physics in the
//! nested [`TrexConfig`]). Configs are plain values: runtime tuning derives a
//! new config with [`RunnerConfig::with_setting`] instead of mutating one in
//! place. A partial JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Physics and sprite geometry of the player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TrexConfig {
    pub drop_velocity: f64,
    pub gravity: f64,
    pub height: f64,
    pub initial_jump_velocity: f64,
    pub intro_duration: f64,
    pub max_jump_height: f64,
    pub min_jump_height: f64,
    pub speed_drop_coefficient: f64,
    pub start_x_pos: f64,
    pub width: f64,
}

impl Default for TrexConfig {
    fn default() -> Self {
        Self {
            drop_velocity: -5.0,
            gravity: 0.6,
            height: 47.0,
            initial_jump_velocity: -10.0,
            intro_duration: 1500.0,
            max_jump_height: 30.0,
            min_jump_height: 30.0,
            speed_drop_coefficient: 3.0,
            start_x_pos: 50.0,
            width: 44.0,
        }
    }
}

impl TrexConfig {
    /// Set the jump strength. The drop velocity follows at half of it.
    pub fn with_jump_velocity(self, velocity: f64) -> Self {
        Self {
            initial_jump_velocity: -velocity,
            drop_velocity: -velocity / 2.0,
            ..self
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RunnerConfig {
    /// Speed gained per frame while running.
    pub acceleration: f64,
    pub bg_cloud_speed: f64,
    pub bottom_pad: f64,
    /// Horizon segments re-roll bumpy when a random draw exceeds this.
    pub bump_threshold: f64,
    /// Grace period (ms) before obstacles appear.
    pub clear_time: f64,
    pub cloud_frequency: f64,
    /// Time (ms) after a crash before the jump key may restart.
    pub gameover_clear_time: f64,
    pub gap_coefficient: f64,
    pub max_clouds: usize,
    pub max_obstacle_length: u32,
    pub max_speed: f64,
    pub mobile_speed_coefficient: f64,
    pub speed: f64,
    pub trex: TrexConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.001,
            bg_cloud_speed: 0.2,
            bottom_pad: 10.0,
            bump_threshold: 0.5,
            clear_time: 3000.0,
            cloud_frequency: 0.5,
            gameover_clear_time: 750.0,
            gap_coefficient: 0.6,
            max_clouds: 6,
            max_obstacle_length: 3,
            max_speed: 12.0,
            mobile_speed_coefficient: 1.2,
            speed: 6.0,
            trex: TrexConfig::default(),
        }
    }
}

/// Settings that can be tuned while a game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSetting {
    Acceleration,
    BgCloudSpeed,
    ClearTime,
    CloudFrequency,
    GapCoefficient,
    Gravity,
    InitialJumpVelocity,
    MaxSpeed,
    MinJumpHeight,
    Speed,
    SpeedDropCoefficient,
}

impl ConfigSetting {
    pub const ALL: [ConfigSetting; 11] = [
        ConfigSetting::Acceleration,
        ConfigSetting::BgCloudSpeed,
        ConfigSetting::ClearTime,
        ConfigSetting::CloudFrequency,
        ConfigSetting::GapCoefficient,
        ConfigSetting::Gravity,
        ConfigSetting::InitialJumpVelocity,
        ConfigSetting::MaxSpeed,
        ConfigSetting::MinJumpHeight,
        ConfigSetting::Speed,
        ConfigSetting::SpeedDropCoefficient,
    ];

    /// Name as written in config files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Acceleration => "ACCELERATION",
            Self::BgCloudSpeed => "BG_CLOUD_SPEED",
            Self::ClearTime => "CLEAR_TIME",
            Self::CloudFrequency => "CLOUD_FREQUENCY",
            Self::GapCoefficient => "GAP_COEFFICIENT",
            Self::Gravity => "GRAVITY",
            Self::InitialJumpVelocity => "INITIAL_JUMP_VELOCITY",
            Self::MaxSpeed => "MAX_SPEED",
            Self::MinJumpHeight => "MIN_JUMP_HEIGHT",
            Self::Speed => "SPEED",
            Self::SpeedDropCoefficient => "SPEED_DROP_COEFFICIENT",
        }
    }

    /// Settings whose value may not go below zero.
    pub fn is_non_negative(&self) -> bool {
        matches!(self, Self::GapCoefficient | Self::MaxSpeed | Self::Speed)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

impl RunnerConfig {
    /// Derive a config with one setting replaced.
    ///
    /// Non-finite values, and negative values for settings that must not be
    /// negative, are ignored and the config is returned unchanged.
    pub fn with_setting(&self, setting: ConfigSetting, value: f64) -> Self {
        if !value.is_finite() || (value < 0.0 && setting.is_non_negative()) {
            return *self;
        }
        let mut next = *self;
        match setting {
            ConfigSetting::Acceleration => next.acceleration = value,
            ConfigSetting::BgCloudSpeed => next.bg_cloud_speed = value,
            ConfigSetting::ClearTime => next.clear_time = value,
            ConfigSetting::CloudFrequency => next.cloud_frequency = value,
            ConfigSetting::GapCoefficient => next.gap_coefficient = value,
            ConfigSetting::Gravity => next.trex.gravity = value,
            ConfigSetting::InitialJumpVelocity => {
                next.trex = next.trex.with_jump_velocity(value);
            }
            ConfigSetting::MaxSpeed => next.max_speed = value,
            ConfigSetting::MinJumpHeight => next.trex.min_jump_height = value,
            ConfigSetting::Speed => next.speed = value,
            ConfigSetting::SpeedDropCoefficient => next.trex.speed_drop_coefficient = value,
        }
        next
    }

    /// Parse a (possibly partial) JSON config. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> io::Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        match config.negative_field() {
            Some(key) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} must not be negative", key),
            )),
            None => Ok(config),
        }
    }

    /// First field, by key, holding a value that would break obstacle
    /// generation or scrolling.
    fn negative_field(&self) -> Option<&'static str> {
        [
            (ConfigSetting::GapCoefficient, self.gap_coefficient),
            (ConfigSetting::MaxSpeed, self.max_speed),
            (ConfigSetting::Speed, self.speed),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(setting, _)| setting.key())
    }

    /// Load a JSON config override file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert!((config.speed - 6.0).abs() < f64::EPSILON);
        assert!((config.max_speed - 12.0).abs() < f64::EPSILON);
        assert!((config.clear_time - 3000.0).abs() < f64::EPSILON);
        assert_eq!(config.max_clouds, 6);
        assert_eq!(config.max_obstacle_length, 3);
        assert!((config.trex.initial_jump_velocity - (-10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_setting_leaves_original_untouched() {
        let base = RunnerConfig::default();
        let faster = base.with_setting(ConfigSetting::Speed, 9.0);
        assert!((faster.speed - 9.0).abs() < f64::EPSILON);
        assert!((base.speed - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trex_settings_route_to_nested_config() {
        let config = RunnerConfig::default()
            .with_setting(ConfigSetting::Gravity, 0.8)
            .with_setting(ConfigSetting::MinJumpHeight, 40.0)
            .with_setting(ConfigSetting::SpeedDropCoefficient, 4.0);
        assert!((config.trex.gravity - 0.8).abs() < f64::EPSILON);
        assert!((config.trex.min_jump_height - 40.0).abs() < f64::EPSILON);
        assert!((config.trex.speed_drop_coefficient - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jump_velocity_sets_drop_velocity() {
        let config = RunnerConfig::default().with_setting(ConfigSetting::InitialJumpVelocity, 12.0);
        assert!((config.trex.initial_jump_velocity - (-12.0)).abs() < f64::EPSILON);
        assert!((config.trex.drop_velocity - (-6.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_setting_ignored() {
        let base = RunnerConfig::default();
        assert_eq!(base.with_setting(ConfigSetting::Speed, f64::NAN), base);
    }

    #[test]
    fn test_negative_setting_ignored_where_disallowed() {
        let base = RunnerConfig::default();
        assert_eq!(base.with_setting(ConfigSetting::GapCoefficient, -2.0), base);
        assert_eq!(base.with_setting(ConfigSetting::Speed, -1.0), base);
        assert_eq!(base.with_setting(ConfigSetting::MaxSpeed, -13.0), base);
        // Negative jump velocity is still a setting change
        let flipped = base.with_setting(ConfigSetting::InitialJumpVelocity, -4.0);
        assert_ne!(flipped, base);
    }

    #[test]
    fn test_setting_keys_roundtrip() {
        for setting in ConfigSetting::ALL {
            assert_eq!(ConfigSetting::from_key(setting.key()), Some(setting));
        }
        assert_eq!(ConfigSetting::from_key("NOT_A_SETTING"), None);
    }

    #[test]
    fn test_partial_json_override() {
        let config =
            RunnerConfig::from_json_str(r#"{ "SPEED": 8.5, "TREX": { "GRAVITY": 0.5 } }"#)
                .expect("valid config");
        assert!((config.speed - 8.5).abs() < f64::EPSILON);
        assert!((config.trex.gravity - 0.5).abs() < f64::EPSILON);
        // Untouched fields keep their defaults
        assert!((config.max_speed - 12.0).abs() < f64::EPSILON);
        assert!((config.trex.width - 44.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_json_is_invalid_data() {
        let err = RunnerConfig::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = RunnerConfig::load(Path::new("/nonexistent/trex_runner_config.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

//! Tuning files and live setting changes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use trex_runner::core::{ConfigSetting, Dimensions, InputEvent, Runner, RunnerConfig};

fn temp_config(name: &str, json: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "trex_runner_{}_{}.json",
        name,
        std::process::id()
    ));
    fs::write(&path, json).expect("write temp config");
    path
}

#[test]
fn test_partial_file_keeps_defaults() {
    let path = temp_config(
        "partial",
        r#"{ "SPEED": 8.0, "CLEAR_TIME": 1000.0, "TREX": { "GRAVITY": 0.8 } }"#,
    );
    let config = RunnerConfig::load(&path).expect("load config");
    fs::remove_file(&path).ok();

    assert_eq!(config.speed, 8.0);
    assert_eq!(config.clear_time, 1000.0);
    assert_eq!(config.trex.gravity, 0.8);
    assert_eq!(config.max_speed, RunnerConfig::default().max_speed);
    assert_eq!(config.trex.width, 44.0);
}

#[test]
fn test_bad_file_is_an_error() {
    let path = temp_config("bad", "{ not json");
    let result = RunnerConfig::load(&path);
    fs::remove_file(&path).ok();
    assert_eq!(
        result.map_err(|e| e.kind()),
        Err(std::io::ErrorKind::InvalidData)
    );

    let missing = std::env::temp_dir().join("trex_runner_does_not_exist.json");
    assert!(RunnerConfig::load(&missing).is_err());
}

#[test]
fn test_loaded_config_drives_runner() {
    let config = RunnerConfig::from_json_str(r#"{ "SPEED": 9.0 }"#).expect("parse");
    let runner = Runner::with_rng(config, Dimensions::default(), ChaCha8Rng::seed_from_u64(12345));
    assert_eq!(runner.current_speed, 9.0);
}

#[test]
fn test_setting_keys_round_trip() {
    for setting in ConfigSetting::ALL {
        assert_eq!(ConfigSetting::from_key(setting.key()), Some(setting));
    }
    assert_eq!(ConfigSetting::from_key("NOT_A_SETTING"), None);
}

#[test]
fn test_gravity_change_mid_game_shortens_jump() {
    let jump_frames = |gravity: Option<f64>| {
        let mut runner = Runner::with_rng(
            RunnerConfig::default(),
            Dimensions::default(),
            ChaCha8Rng::seed_from_u64(12345),
        );
        if let Some(gravity) = gravity {
            runner.update_config_setting(ConfigSetting::Gravity, gravity);
        }
        runner.handle_input(InputEvent::JumpPressed, 0.0);
        let mut frames = 0;
        while runner.trex.jumping && frames < 500 {
            runner.tick(16.0);
            frames += 1;
        }
        frames
    };
    assert!(jump_frames(Some(1.2)) < jump_frames(None));
}

#[test]
fn test_negative_tuning_in_file_is_invalid_data() {
    for json in [
        r#"{ "GAP_COEFFICIENT": -2.0 }"#,
        r#"{ "SPEED": -1.0 }"#,
        r#"{ "MAX_SPEED": -13.0 }"#,
    ] {
        let result = RunnerConfig::from_json_str(json);
        assert_eq!(
            result.map_err(|e| e.kind()),
            Err(std::io::ErrorKind::InvalidData),
            "{}",
            json
        );
    }
    // Negative obstacle lengths never parse into the unsigned field
    assert!(RunnerConfig::from_json_str(r#"{ "MAX_OBSTACLE_LENGTH": -1 }"#).is_err());
}

fn play_out(runner: &mut Runner<ChaCha8Rng>) {
    runner.handle_input(InputEvent::JumpPressed, 0.0);
    runner.handle_input(InputEvent::JumpReleased, 0.0);
    for _ in 0..1000 {
        runner.tick(16.0);
    }
}

#[test]
fn test_negative_gap_setting_is_ignored_at_runtime() {
    let mut runner = Runner::with_rng(
        RunnerConfig::default(),
        Dimensions::default(),
        ChaCha8Rng::seed_from_u64(12345),
    );
    runner.update_config_setting(ConfigSetting::GapCoefficient, -2.0);
    runner.update_config_setting(ConfigSetting::Speed, -1.0);
    assert_eq!(runner.config.gap_coefficient, 0.6);
    assert_eq!(runner.current_speed, 6.0);

    play_out(&mut runner);
    assert!(runner.distance() > 0);
}

#[test]
fn test_negative_gap_in_built_config_still_plays() {
    let config = RunnerConfig {
        gap_coefficient: -2.0,
        ..RunnerConfig::default()
    };
    let mut runner = Runner::with_rng(config, Dimensions::default(), ChaCha8Rng::seed_from_u64(12345));

    play_out(&mut runner);
    assert!(runner.distance() > 0);
    assert!(runner
        .horizon
        .obstacles
        .iter()
        .all(|obstacle| obstacle.gap >= 0.0));
}

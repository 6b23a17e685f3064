use std::path::Path;
use std::time::Duration;

use qship::config::{defaults, GameConfig};
use qship::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    config.validate().unwrap();
    assert_eq!(config.width, 800.0);
    assert_eq!(config.height, 600.0);
    assert_eq!(config.obstacle_widths, defaults::OBSTACLE_WIDTHS.to_vec());
}

#[test]
fn empty_file_gives_defaults() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let config = GameConfig::from_toml_str(
        r#"
        fps = 30
        starting_lives = 5
        obstacle_widths = [40.0, 20.0]
        log_filter = "qship=debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.fps, 30);
    assert_eq!(config.starting_lives, 5);
    assert_eq!(config.obstacle_widths, vec![40.0, 20.0]);
    assert_eq!(config.log_filter, "qship=debug");
    assert_eq!(config.max_shield, defaults::MAX_SHIELD);
    assert_eq!(config.shoot_delay_ms, defaults::SHOOT_DELAY_MS);
}

#[test]
fn frame_period_follows_fps() {
    let config = GameConfig::from_toml_str("fps = 50").unwrap();
    assert_eq!(config.frame_period(), Duration::from_millis(20));
}

#[test]
fn zero_fps_is_rejected() {
    let err = GameConfig::from_toml_str("fps = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "fps", .. }), "{err}");
}

#[test]
fn zero_starting_lives_is_rejected() {
    let err = GameConfig::from_toml_str("starting_lives = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "starting_lives", .. }));
    assert!(GameConfig::from_toml_str("starting_lives = 1").is_ok());
}

#[test]
fn empty_obstacle_table_is_rejected() {
    let err = GameConfig::from_toml_str("obstacle_widths = []").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "obstacle_widths", .. }));
}

#[test]
fn oversized_obstacle_is_rejected() {
    let err = GameConfig::from_toml_str("obstacle_widths = [50.0, 900.0]").unwrap_err();
    assert!(err.to_string().contains("900"));
}

#[test]
fn drop_chance_must_be_a_probability() {
    assert!(GameConfig::from_toml_str("powerup_drop_chance = 1.5").is_err());
    assert!(GameConfig::from_toml_str("powerup_drop_chance = 1.0").is_ok());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("fps = = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml_str("fps = \"fast\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_reports_its_path() {
    let path = Path::new("/nonexistent/qship.toml");
    let err = GameConfig::from_file(path).unwrap_err();
    match err {
        ConfigError::Read { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn file_round_trip() {
    let path = std::env::temp_dir().join(format!("qship-test-{}.toml", std::process::id()));
    std::fs::write(&path, "respawn_ms = 1500\nexplosion_frames = 7\n").unwrap();

    let config = GameConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.respawn_ms, 1500);
    assert_eq!(config.explosion_frames, 7);
}

use arcade_shooter::compute::enemy_hp_for_score;
use arcade_shooter::config::GameConfig;
use arcade_shooter::error::ConfigError;

use approx::assert_abs_diff_eq;

#[test]
fn defaults_match_stock_tuning() {
    let cfg = GameConfig::default();
    assert_abs_diff_eq!(cfg.screen.width, 480.0);
    assert_abs_diff_eq!(cfg.screen.height, 800.0);
    assert_eq!(cfg.screen.background_color, 0x181d27);
    assert_eq!(cfg.player.max_hp, 5);
    assert_abs_diff_eq!(cfg.player.speed, 320.0);
    assert_abs_diff_eq!(cfg.enemy.min_spawn_interval_ms, 350.0);
    assert_abs_diff_eq!(cfg.enemy.max_spawn_interval_ms, 900.0);
    assert_eq!(cfg.enemy.hp_base, 2);
    assert_eq!(cfg.score.points_per_enemy, 10);
    assert!(cfg.validate().is_ok());
}

#[test]
fn derived_values() {
    let cfg = GameConfig::default();
    assert_abs_diff_eq!(cfg.fire_interval_ms(), 250.0);
    assert_abs_diff_eq!(cfg.player_y(), 752.0);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = GameConfig::from_json_str(r#"{ "player": { "max_hp": 3 } }"#).unwrap();
    assert_eq!(cfg.player.max_hp, 3);
    assert_abs_diff_eq!(cfg.player.speed, 320.0);
    assert_eq!(cfg.enemy, GameConfig::default().enemy);
}

#[test]
fn empty_object_is_default() {
    let cfg = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn json_roundtrip_through_serde() {
    let mut cfg = GameConfig::default();
    cfg.weapon.shots_per_second = 8.0;
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(GameConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ player: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn inverted_spawn_range_rejected() {
    let json = r#"{ "enemy": { "min_spawn_interval_ms": 1000, "max_spawn_interval_ms": 500 } }"#;
    let err = GameConfig::from_json_str(json).unwrap_err();
    assert!(matches!(err, ConfigError::SpawnIntervalRange { .. }));
}

#[test]
fn zero_max_hp_rejected() {
    let err = GameConfig::from_json_str(r#"{ "player": { "max_hp": 0 } }"#).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "player.max_hp"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_fire_rate_rejected() {
    let err =
        GameConfig::from_json_str(r#"{ "weapon": { "shots_per_second": 0 } }"#).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "weapon.shots_per_second"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_bullet_damage_rejected() {
    let err = GameConfig::from_json_str(r#"{ "weapon": { "bullet_damage": 0 } }"#).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "weapon.bullet_damage"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_contact_damage_rejected() {
    let err = GameConfig::from_json_str(r#"{ "enemy": { "contact_damage": 0 } }"#).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "enemy.contact_damage"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn huge_hp_ramp_saturates() {
    let json = r#"{ "enemy": { "hp_ramp_amount": 4000000000 } }"#;
    let cfg = GameConfig::from_json_str(json).unwrap();
    assert_eq!(enemy_hp_for_score(&cfg, 20), u32::MAX);
}

#[test]
fn player_wider_than_screen_rejected() {
    let err = GameConfig::from_json_str(r#"{ "player": { "width": 600 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::PlayerWiderThanScreen { .. }));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!(
        "arcade_shooter_config_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "score": { "points_per_enemy": 25 } }"#).unwrap();

    let cfg = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg.score.points_per_enemy, 25);
}

#[test]
fn load_missing_file_is_io_error() {
    let err = GameConfig::load("/definitely/not/here/arcade.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/arcade.json"));
}

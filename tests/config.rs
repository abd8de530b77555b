//! Configuration system tests
//!
//! Tests for config paths and engine config loading/saving.

use tessera::config::EngineConfig;
use tessera::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("tessera"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
        assert!(logs.ends_with("logs"));
    }
}

// ========================================================================
// EngineConfig Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.history_max_size, 1000);
    assert_eq!(config.default_table_rows, 2);
    assert_eq!(config.default_table_columns, 2);
    assert!(config.tab_grows_table);
    assert!(!config.remove_last_removes_table);
    assert!(!config.allow_nested_tables);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = EngineConfig {
        default_table_rows: 4,
        tab_grows_table: false,
        allow_nested_tables: true,
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert_eq!(EngineConfig::load_from(&path), config);
}

#[test]
fn test_partial_yaml_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_table_columns: 5\nremove_last_removes_table: true\n").unwrap();

    let config = EngineConfig::load_from(&path);
    assert_eq!(config.default_table_columns, 5);
    assert!(config.remove_last_removes_table);
    assert_eq!(config.default_table_rows, 2);
    assert_eq!(config.history_max_size, 1000);
}

#[test]
fn test_invalid_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_table_rows: [not, a, number\n").unwrap();

    assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert_eq!(EngineConfig::load_from(&path), EngineConfig::default());
}

#[test]
fn test_config_drives_editor_behaviour() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_table_rows: 1\ndefault_table_columns: 1\n").unwrap();

    let mut editor = tessera::table_editor(EngineConfig::load_from(&path));
    assert!(editor.execute("insertTable"));
    assert_eq!(
        editor.get_data(),
        "<table><tableRow><tableCell></tableCell></tableRow></table>"
    );
}

//! Tests for the uplift configuration system.

use std::sync::Mutex;

use uplift_core::config::{CliOverrides, UpliftConfig};
use uplift_core::constants::{DEFAULT_MAX_DEPTH, DEFAULT_TARGET_VERSION};
use uplift_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all UPLIFT_ env vars to prevent cross-test contamination.
fn clear_uplift_env_vars() {
    for key in [
        "UPLIFT_ENGINE_MAX_DEPTH",
        "UPLIFT_ENGINE_MAX_WORKERS",
        "UPLIFT_RUN_MOCK",
        "UPLIFT_RUN_TARGET_VERSIONS",
    ] {
        std::env::remove_var(key);
    }
}

/// T-CFG-01: CLI > env > project file.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_uplift_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("uplift.toml"),
        r#"
[engine]
max_depth = 64
max_workers = 2

[run]
mock_run = false
"#,
    )
    .unwrap();

    std::env::set_var("UPLIFT_ENGINE_MAX_WORKERS", "6");
    std::env::set_var("UPLIFT_RUN_MOCK", "true");

    let cli = CliOverrides {
        max_workers: Some(12),
        ..Default::default()
    };
    let config = UpliftConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.engine.max_depth, Some(64));
    assert_eq!(config.engine.max_workers, Some(12));
    assert!(config.run.effective_mock_run());

    clear_uplift_env_vars();
}

/// T-CFG-02: missing project file falls back to compiled defaults.
#[test]
fn test_missing_project_file_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_uplift_env_vars();

    let dir = tempdir();
    let config = UpliftConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.engine.effective_max_depth(), DEFAULT_MAX_DEPTH);
    assert!(config.engine.effective_validate());
    assert!(!config.run.effective_mock_run());
    assert_eq!(
        config.run.effective_target_versions(),
        vec![DEFAULT_TARGET_VERSION.to_string()]
    );
}

/// T-CFG-03: comma separated target versions from the environment.
#[test]
fn test_env_target_versions() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_uplift_env_vars();

    std::env::set_var("UPLIFT_RUN_TARGET_VERSIONS", "net6.0, net8.0,");
    let dir = tempdir();
    let config = UpliftConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.run.target_versions, vec!["net6.0", "net8.0"]);

    clear_uplift_env_vars();
}

/// T-CFG-04: zero depth bound is rejected.
#[test]
fn test_zero_max_depth_rejected() {
    let result = UpliftConfig::from_toml("[engine]\nmax_depth = 0\n");
    assert!(matches!(
        result,
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "engine.max_depth"
    ));
}

/// T-CFG-05: invalid TOML in the project file is a parse error.
#[test]
fn test_invalid_project_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_uplift_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("uplift.toml"), "[engine\nmax_depth = ").unwrap();
    let result = UpliftConfig::load(dir.path(), None);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// T-CFG-06: unknown keys are ignored and the config round-trips.
#[test]
fn test_unknown_keys_and_round_trip() {
    let config = UpliftConfig::from_toml(
        r#"
[engine]
max_depth = 32
future_knob = "ignored"

[run]
target_versions = ["net7.0"]
"#,
    )
    .unwrap();
    assert_eq!(config.engine.max_depth, Some(32));

    let serialized = config.to_toml().unwrap();
    let reparsed = UpliftConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.engine.max_depth, Some(32));
    assert_eq!(reparsed.run.target_versions, vec!["net7.0"]);
}

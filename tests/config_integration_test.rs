//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables share ENV_MUTEX so they do
//! not interfere with each other.

use gpxport::config::load_config;
use gpxport::domain::GpxportError;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GPXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GPXPORT_STORE_ARCHIVE_PATH");
    std::env::remove_var("GPXPORT_STORE_BATCH_SIZE");
    std::env::remove_var("GPXPORT_EXPORT_OUTPUT_DIR");
    std::env::remove_var("GPXPORT_EXPORT_UTC_OFFSET_MINUTES");
    std::env::remove_var("GPXPORT_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("GPXPORT_LOGGING_LOCAL_PATH");
    std::env::remove_var("GPXPORT_LOGGING_LOCAL_ROTATION");
    std::env::remove_var("TEST_HEALTH_HOME");
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let temp_file = config_file(
        r#"
[application]
log_level = "debug"

[store]
archive_path = "/data/health/archive.json"
batch_size = 1000

[export]
output_dir = "/data/gpx"
utc_offset_minutes = -420

[logging]
local_enabled = true
local_path = "/var/log/gpxport"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.store.archive_path,
        PathBuf::from("/data/health/archive.json")
    );
    assert_eq!(config.store.batch_size, 1000);
    assert_eq!(config.export.output_dir, Some(PathBuf::from("/data/gpx")));
    assert_eq!(config.export.utc_offset_minutes, -420);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/var/log/gpxport");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_empty_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let temp_file = config_file("# nothing configured\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(
        config.store.archive_path,
        PathBuf::from("health-archive.json")
    );
    assert_eq!(config.store.batch_size, 500);
    assert!(config.export.output_dir.is_none());
    assert_eq!(config.export.utc_offset_minutes, 0);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_HEALTH_HOME", "/home/runner/health");

    let temp_file = config_file(
        r#"
[store]
archive_path = "${TEST_HEALTH_HOME}/archive.json"

[export]
output_dir = "${TEST_HEALTH_HOME}/gpx"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(
        config.store.archive_path,
        PathBuf::from("/home/runner/health/archive.json")
    );
    assert_eq!(
        config.export.output_dir,
        Some(PathBuf::from("/home/runner/health/gpx"))
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let temp_file = config_file("[store]\narchive_path = \"${TEST_HEALTH_HOME}/a.json\"\n");
    let err = load_config(temp_file.path()).unwrap_err();

    assert!(matches!(err, GpxportError::Configuration(_)));
    assert!(err.to_string().contains("TEST_HEALTH_HOME"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("GPXPORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("GPXPORT_STORE_BATCH_SIZE", "64");
    std::env::set_var("GPXPORT_EXPORT_OUTPUT_DIR", "/override/gpx");
    std::env::set_var("GPXPORT_EXPORT_UTC_OFFSET_MINUTES", "330");
    std::env::set_var("GPXPORT_LOGGING_LOCAL_ROTATION", "never");

    let temp_file = config_file(
        r#"
[application]
log_level = "debug"

[store]
batch_size = 500

[export]
output_dir = "/from/file"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.store.batch_size, 64);
    assert_eq!(config.export.output_dir, Some(PathBuf::from("/override/gpx")));
    assert_eq!(config.export.utc_offset_minutes, 330);
    assert_eq!(config.logging.local_rotation, "never");

    cleanup_env_vars();
}

#[test]
fn test_unparseable_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();
    std::env::set_var("GPXPORT_STORE_BATCH_SIZE", "lots");

    let temp_file = config_file("");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("GPXPORT_STORE_BATCH_SIZE"));

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"loud\"\n",
        "[store]\nbatch_size = 0\n",
        "[export]\nutc_offset_minutes = 1440\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];

    for contents in cases {
        let temp_file = config_file(contents);
        let err = load_config(temp_file.path()).unwrap_err();
        assert!(
            err.to_string().contains("validation failed"),
            "{contents}: {err}"
        );
    }
}

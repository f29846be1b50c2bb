//! Config hierarchy tests: defaults, user file, explicit file, environment.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{fs, path::PathBuf};

use cmdtree_core::{
    config::{ENV_HELP_PREFIX, ENV_INDENT_STEP, ENV_SEPARATOR_WIDTH},
    ConfigError, DispatcherConfig,
};
use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    for key in [ENV_HELP_PREFIX, ENV_INDENT_STEP, ENV_SEPARATOR_WIDTH] {
        std::env::remove_var(key);
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_missing_user_config_uses_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("nope.toml");

    let config = DispatcherConfig::load_layers(Some(&absent), None).unwrap();
    assert_eq!(config, DispatcherConfig::default());
}

#[test]
#[serial]
fn test_explicit_file_overrides_user_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let user = write(&dir, "user.toml", "indent_step = 4\nseparator_width = 60\n");
    let explicit = write(&dir, "explicit.toml", "separator_width = 40\n");

    let config = DispatcherConfig::load_layers(Some(&user), Some(&explicit)).unwrap();
    assert_eq!(config.indent_step, 4);
    assert_eq!(config.separator_width, 40);
    assert_eq!(config.help_prefix, "");
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let explicit = write(&dir, "explicit.toml", "help_prefix = \"from file\"\nindent_step = 3\n");

    std::env::set_var(ENV_HELP_PREFIX, "from env: ");
    std::env::set_var(ENV_INDENT_STEP, "6");
    let config = DispatcherConfig::load_layers(None, Some(&explicit));
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.help_prefix, "from env: ");
    assert_eq!(config.indent_step, 6);
}

#[test]
#[serial]
fn test_bad_environment_value() {
    clear_env();
    std::env::set_var(ENV_SEPARATOR_WIDTH, "wide");
    let result = DispatcherConfig::load_layers(None, None);
    clear_env();

    match result {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains(ENV_SEPARATOR_WIDTH)),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_missing_explicit_file_is_io_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("absent.toml");

    let result = DispatcherConfig::load_layers(None, Some(&absent));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
#[serial]
fn test_malformed_file_is_parse_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "broken.toml", "indent_step = [");

    let result = DispatcherConfig::load_layers(None, Some(&broken));
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

//! Integration tests for the configuration system.
//!
//! These tests exercise file discovery, layering of user and project files,
//! `PATHFIX_*` environment overrides, and resolution into [`Settings`].
//!
//! Tests that modify environment variables are marked with `#[serial]` because
//! the environment is process-global.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pathfix::config::{Config, ConfigBuilder, OutputFormat, Settings};
use pathfix::error::Error;

// ============================================================================
// Test Utilities
// ============================================================================

fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

fn clear_pathfix_env_vars() -> Vec<EnvGuard> {
    [
        "PATHFIX_MAX_PATH_LENGTH",
        "PATHFIX_OS_PATH_LIMIT",
        "PATHFIX_RESERVED_PREFIX_LENGTH",
        "PATHFIX_ILLEGAL_CHARACTERS",
        "PATHFIX_HASH_LENGTH",
        "PATHFIX_SHORTENED_NAME_SUFFIX",
        "PATHFIX_OUTPUT_FORMAT",
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}

/// A builder that ignores the real home directory.
fn isolated_builder(working_dir: &Path, user_dir: &Path) -> ConfigBuilder {
    ConfigBuilder::new()
        .with_working_dir(working_dir)
        .with_user_dir(user_dir)
}

// ============================================================================
// File discovery and layering
// ============================================================================

#[test]
#[serial]
fn test_project_file_discovered_upward() {
    let _env = clear_pathfix_env_vars();
    let temp = TempDir::new().unwrap();
    let child = temp.path().join("nested").join("deeply");
    fs::create_dir_all(&child).unwrap();
    create_temp_config(temp.path(), "pathfix.yaml", "max_path_length: 100\n");

    let config = isolated_builder(&child, &temp.path().join("no-user"))
        .build()
        .unwrap();
    assert_eq!(config.max_path_length, Some(100));
}

#[test]
#[serial]
fn test_project_overrides_user() {
    let _env = clear_pathfix_env_vars();
    let temp = TempDir::new().unwrap();
    let user_dir = temp.path().join("user");
    let project = temp.path().join("project");
    create_temp_config(
        &user_dir,
        "config.yaml",
        "max_path_length: 90\nhash_length: 6\n",
    );
    create_temp_config(&project, "pathfix.yaml", "max_path_length: 120\n");

    let settings = isolated_builder(&project, &user_dir)
        .build()
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(settings.max_path_length, 120);
    assert_eq!(settings.hash_length, 6);
}

#[test]
#[serial]
fn test_no_files_gives_defaults() {
    let _env = clear_pathfix_env_vars();
    let temp = TempDir::new().unwrap();

    let settings = isolated_builder(temp.path(), &temp.path().join("none"))
        .build()
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_explicit_file_skips_discovery() {
    let temp = TempDir::new().unwrap();
    create_temp_config(temp.path(), "pathfix.yaml", "max_path_length: 100\n");
    let custom = create_temp_config(temp.path(), "custom.yaml", "hash_length: 8\n");

    let config = ConfigBuilder::new()
        .with_config_file(&custom)
        .skip_env()
        .build()
        .unwrap();
    assert_eq!(config.hash_length, Some(8));
    assert_eq!(config.max_path_length, None);
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let bad = create_temp_config(temp.path(), "bad.yaml", "max_path_lenght: 100\n");

    let result = ConfigBuilder::new().with_config_file(&bad).skip_env().build();
    assert!(
        matches!(result, Err(Error::Validation { ref message, .. }) if message.contains("Invalid YAML"))
    );
}

#[test]
fn test_invalid_value_in_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let bad = create_temp_config(temp.path(), "bad.yaml", "hash_length: 0\n");

    let result = ConfigBuilder::new().with_config_file(&bad).skip_env().build();
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[test]
fn test_budget_from_os_limit_and_prefix() {
    let temp = TempDir::new().unwrap();
    let file = create_temp_config(
        temp.path(),
        "limits.yaml",
        "os_path_limit: 260\nreserved_prefix_length: 100\nillegal_characters: \"#%\"\n",
    );

    let settings = ConfigBuilder::new()
        .with_config_file(&file)
        .skip_env()
        .build()
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(settings.max_path_length, 160);
    assert!(settings.is_illegal('#'));
    assert!(!settings.is_illegal('?'));
}

// ============================================================================
// Environment overrides
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_files() {
    let _env = clear_pathfix_env_vars();
    let temp = TempDir::new().unwrap();
    let file = create_temp_config(temp.path(), "pathfix.yaml", "max_path_length: 100\n");
    let _max = EnvGuard::new("PATHFIX_MAX_PATH_LENGTH", "77");
    let _format = EnvGuard::new("PATHFIX_OUTPUT_FORMAT", "json");

    let config = ConfigBuilder::new().with_config_file(&file).build().unwrap();
    assert_eq!(config.max_path_length, Some(77));
    assert_eq!(config.output_format, Some(OutputFormat::Json));
}

#[test]
#[serial]
fn test_programmatic_overrides_env() {
    let _env = clear_pathfix_env_vars();
    let _hash = EnvGuard::new("PATHFIX_HASH_LENGTH", "3");

    let config = ConfigBuilder::new()
        .skip_files()
        .with_config(Config {
            hash_length: Some(5),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(config.hash_length, Some(5));
}

#[test]
#[serial]
fn test_malformed_env_value() {
    let _env = clear_pathfix_env_vars();
    let _max = EnvGuard::new("PATHFIX_MAX_PATH_LENGTH", "lots");

    let result = ConfigBuilder::new().skip_files().build();
    assert!(matches!(result, Err(Error::Validation { .. })));
}

//! Configuration builder combining all sources.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from files, environment, and programmatic overrides.
///
/// # Examples
///
/// ```
/// use pathfix::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { hash_length: Some(6), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.hash_length, Some(6));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Create a builder with default discovery behavior.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project config discovery at `dir` instead of the current directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Look for the user config in `dir` instead of `~/.pathfix`.
    #[must_use]
    pub fn with_user_dir(mut self, dir: &Path) -> Self {
        self.user_dir = Some(dir.to_path_buf());
        self
    }

    /// Load exactly this file instead of discovering configuration files.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Apply programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Do not read any configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply `PATHFIX_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, an
    /// environment variable is malformed, or the merged result is invalid.
    pub fn build(self) -> Result<Config> {
        let mut sources: Vec<ConfigSource> = Vec::new();

        if !self.skip_files {
            if let Some(ref file) = self.config_file {
                sources.push(ConfigSource {
                    path: file.clone(),
                    precedence: 2,
                    config: ConfigLoader::load_file(file)?,
                });
            } else {
                let working_dir = match self.working_dir {
                    Some(ref dir) => dir.clone(),
                    None => env::current_dir()?,
                };
                sources = ConfigLoader::load_all(&working_dir, self.user_dir.as_deref())?;
            }
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_file_replaces_discovery() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("custom.yaml");
        fs::write(&file, "max_path_length: 64\nhash_length: 2\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_config_file(&file)
            .build()
            .unwrap();
        assert_eq!(config.max_path_length, Some(64));
        assert_eq!(config.hash_length, Some(2));
    }

    #[test]
    fn test_overrides_beat_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("custom.yaml");
        fs::write(&file, "hash_length: 2\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_config_file(&file)
            .with_config(Config {
                hash_length: Some(8),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.hash_length, Some(8));
    }

    #[test]
    fn test_invalid_merged_config_is_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                hash_length: Some(100),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_discovery_in_working_dir() {
        let temp_dir = TempDir::new().unwrap();
        let user_dir = temp_dir.path().join("no-user-config");
        fs::write(
            temp_dir.path().join("pathfix.yaml"),
            "shortened_name_suffix: _win\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(temp_dir.path())
            .with_user_dir(&user_dir)
            .build()
            .unwrap();
        assert_eq!(config.shortened_name_suffix.as_deref(), Some("_win"));
    }
}

//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution, configuration loading, and report output.

use crate::error::CliError;
use pathfix::path::{absolutize, expand_tilde};
use pathfix::{Config, ConfigBuilder, Logger, OutputFormat, Settings};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Logger configured from the verbosity flags.
    pub logger: Logger,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Override the path length budget.
    pub max_path_length: Option<usize>,

    /// Override the hash length.
    pub hash_length: Option<usize>,

    /// Override the forbidden characters.
    pub illegal_characters: Option<String>,

    /// Override the copy suffix.
    pub suffix: Option<String>,

    /// Override the report format.
    pub format: Option<OutputFormat>,
}

/// Make a user-supplied path absolute and expand `~`, without following
/// symbolic links.
pub fn resolve_path(path: &Path) -> Result<PathBuf, CliError> {
    let expanded = expand_tilde(path)?;
    Ok(absolutize(&expanded)?)
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files (or the single `--config` file)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(Config {
        max_path_length: global.max_path_length,
        illegal_characters: global.illegal_characters.clone(),
        hash_length: global.hash_length,
        shortened_name_suffix: global.suffix.clone(),
        output_format: global.format,
        ..Config::default()
    });

    if let Some(ref file) = global.config {
        if !file.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                file.display()
            )));
        }
        builder = builder.with_config_file(file);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Load configuration and resolve it into engine settings and a report format.
pub fn load_settings(global: &GlobalOptions) -> Result<(Settings, OutputFormat), CliError> {
    let config = load_configuration(global)?;
    let settings = config
        .resolve()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let format = config.output_format.unwrap_or_default();
    global.logger.debug(&format!(
        "Budget {} characters, hash length {}, suffix {:?}",
        settings.max_path_length, settings.hash_length, settings.shortened_name_suffix
    ));
    Ok((settings, format))
}

/// Print a report on stdout.
pub fn print_report(report: &str) {
    if !report.is_empty() {
        println!("{report}");
    }
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_resolve_path_is_absolute() {
        let resolved = resolve_path(Path::new("some/tree")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/tree"));
    }
}

//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHFIX_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathfix::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric length).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(max) = Self::parse_usize_var("PATHFIX_MAX_PATH_LENGTH")? {
            config.max_path_length = Some(max);
        }

        if let Some(limit) = Self::parse_usize_var("PATHFIX_OS_PATH_LIMIT")? {
            config.os_path_limit = Some(limit);
        }

        if let Some(reserved) = Self::parse_usize_var("PATHFIX_RESERVED_PREFIX_LENGTH")? {
            config.reserved_prefix_length = Some(reserved);
        }

        if let Ok(chars) = env::var("PATHFIX_ILLEGAL_CHARACTERS") {
            config.illegal_characters = Some(chars);
        }

        if let Some(hash_length) = Self::parse_usize_var("PATHFIX_HASH_LENGTH")? {
            config.hash_length = Some(hash_length);
        }

        if let Ok(suffix) = env::var("PATHFIX_SHORTENED_NAME_SUFFIX") {
            config.shortened_name_suffix = Some(suffix);
        }

        if let Ok(format) = env::var("PATHFIX_OUTPUT_FORMAT") {
            config.output_format = Some(Self::parse_output_format(&format)?);
        }

        Ok(())
    }

    fn parse_usize_var(name: &str) -> Result<Option<usize>> {
        match env::var(name) {
            Ok(value) => Self::parse_usize(name, &value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn parse_usize(field: &str, s: &str) -> Result<usize> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Validation {
                field: "PATHFIX_OUTPUT_FORMAT".into(),
                message: format!("Invalid output format: '{s}' (expected human/json)"),
            }),
        }
    }
}

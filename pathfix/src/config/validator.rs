//! Configuration validation.
//!
//! This module checks every configured value for range and consistency
//! before the configuration is resolved into [`Settings`](super::Settings).

use crate::config::schema::{
    Config, DEFAULT_ILLEGAL_CHARACTERS, DEFAULT_OS_PATH_LIMIT, DEFAULT_RESERVED_PREFIX_LENGTH,
};
use crate::error::{Error, Result};

/// Largest accepted hash length: the full SHA-256 digest in hex.
pub const MAX_HASH_LENGTH: usize = 64;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use pathfix::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { hash_length: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(max) = config.max_path_length {
            if max == 0 {
                return Err(Error::Validation {
                    field: "max_path_length".into(),
                    message: "Must be greater than 0".into(),
                });
            }
        }

        let limit = config.os_path_limit.unwrap_or(DEFAULT_OS_PATH_LIMIT);
        let reserved = config
            .reserved_prefix_length
            .unwrap_or(DEFAULT_RESERVED_PREFIX_LENGTH);
        if config.max_path_length.is_none() && reserved >= limit {
            return Err(Error::Validation {
                field: "reserved_prefix_length".into(),
                message: format!("Must be smaller than os_path_limit ({limit})"),
            });
        }

        if let Some(hash_length) = config.hash_length {
            Self::validate_hash_length(hash_length)?;
        }

        let illegal = config
            .illegal_characters
            .as_deref()
            .unwrap_or(DEFAULT_ILLEGAL_CHARACTERS);
        Self::validate_illegal_characters(illegal)?;

        if let Some(ref suffix) = config.shortened_name_suffix {
            Self::validate_suffix(suffix, illegal)?;
        }

        Ok(())
    }

    fn validate_hash_length(hash_length: usize) -> Result<()> {
        if hash_length == 0 || hash_length > MAX_HASH_LENGTH {
            return Err(Error::Validation {
                field: "hash_length".into(),
                message: format!("Must be between 1 and {MAX_HASH_LENGTH}"),
            });
        }
        Ok(())
    }

    /// The separator and NUL can never appear inside a segment, so listing
    /// them would make every path illegal without any way to fix it.
    fn validate_illegal_characters(illegal: &str) -> Result<()> {
        if illegal.contains('/') {
            return Err(Error::Validation {
                field: "illegal_characters".into(),
                message: "Cannot contain the path separator '/'".into(),
            });
        }
        if illegal.contains('\0') {
            return Err(Error::Validation {
                field: "illegal_characters".into(),
                message: "Cannot contain null bytes".into(),
            });
        }
        if illegal.contains(crate::sanitize::REPLACEMENT_CHAR) {
            return Err(Error::Validation {
                field: "illegal_characters".into(),
                message: format!(
                    "Cannot contain the replacement character '{}'",
                    crate::sanitize::REPLACEMENT_CHAR
                ),
            });
        }
        Ok(())
    }

    fn validate_suffix(suffix: &str, illegal: &str) -> Result<()> {
        if suffix.trim().is_empty() {
            return Err(Error::Validation {
                field: "shortened_name_suffix".into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(Error::Validation {
                field: "shortened_name_suffix".into(),
                message: "Cannot contain a path separator".into(),
            });
        }
        if let Some(c) = suffix.chars().find(|c| illegal.contains(*c)) {
            return Err(Error::Validation {
                field: "shortened_name_suffix".into(),
                message: format!("Contains illegal character '{c}'"),
            });
        }
        Ok(())
    }
}

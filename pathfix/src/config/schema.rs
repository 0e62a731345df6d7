//! Configuration schema definitions.
//!
//! [`Config`] mirrors the YAML files on disk: every field is optional so that
//! partial files can be layered. [`Settings`] is the resolved, fully
//! populated bundle the remediation engine consumes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default hard path limit of the target operating system.
pub const DEFAULT_OS_PATH_LIMIT: usize = 255;

/// Default number of characters already consumed by the directory the tree
/// will eventually be placed under on the target system.
pub const DEFAULT_RESERVED_PREFIX_LENGTH: usize = 107;

/// Characters Windows refuses in a file name. `/` is absent on purpose: it is
/// the separator of the source system and never appears inside a segment.
pub const DEFAULT_ILLEGAL_CHARACTERS: &str = "<>:\"\\|?*";

/// Default number of hex characters in a disambiguation hash.
pub const DEFAULT_HASH_LENGTH: usize = 4;

/// Default suffix appended to the source directory name to form the copy.
pub const DEFAULT_SHORTENED_NAME_SUFFIX: &str = "_shortened";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use pathfix::config::Config;
///
/// let config = Config {
///     max_path_length: Some(120),
///     hash_length: Some(3),
///     ..Default::default()
/// };
/// let settings = config.resolve().unwrap();
/// assert_eq!(settings.max_path_length, 120);
/// assert_eq!(settings.hash_length, 3);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of characters a path may use, measured from the tree
    /// root's own name. Takes precedence over the two fields below.
    pub max_path_length: Option<usize>,

    /// Hard path limit of the target system.
    pub os_path_limit: Option<usize>,

    /// Characters of the limit already used by the destination prefix.
    pub reserved_prefix_length: Option<usize>,

    /// Characters that may not appear in any path segment.
    pub illegal_characters: Option<String>,

    /// Number of hex characters in the disambiguation hash.
    pub hash_length: Option<usize>,

    /// Suffix appended to the source directory name to form the copy.
    pub shortened_name_suffix: Option<String>,

    /// Output format for reports.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective path budget from the configured fields.
    ///
    /// An explicit `max_path_length` wins; otherwise the budget is the OS limit
    /// minus the reserved prefix length.
    #[must_use]
    pub fn effective_max_path_length(&self) -> usize {
        if let Some(max) = self.max_path_length {
            return max;
        }
        let limit = self.os_path_limit.unwrap_or(DEFAULT_OS_PATH_LIMIT);
        let reserved = self
            .reserved_prefix_length
            .unwrap_or(DEFAULT_RESERVED_PREFIX_LENGTH);
        limit.saturating_sub(reserved)
    }

    /// Resolve this configuration into concrete [`Settings`], filling every
    /// absent field with its default and validating the result.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configuration is invalid.
    pub fn resolve(&self) -> Result<Settings> {
        super::validator::ConfigValidator::validate(self)?;

        let settings = Settings {
            max_path_length: self.effective_max_path_length(),
            illegal_characters: self
                .illegal_characters
                .as_deref()
                .unwrap_or(DEFAULT_ILLEGAL_CHARACTERS)
                .chars()
                .collect(),
            hash_length: self.hash_length.unwrap_or(DEFAULT_HASH_LENGTH),
            shortened_name_suffix: self
                .shortened_name_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_SHORTENED_NAME_SUFFIX.to_string()),
        };

        if settings.max_path_length == 0 {
            return Err(Error::Validation {
                field: "max_path_length".into(),
                message: "Effective path budget must be greater than 0".into(),
            });
        }

        Ok(settings)
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// The resolved configuration bundle consumed by the remediation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Maximum rendered length of any path (and of any namefile path).
    pub max_path_length: usize,
    /// Characters forbidden in path segments.
    pub illegal_characters: BTreeSet<char>,
    /// Number of hex characters in a disambiguation hash.
    pub hash_length: usize,
    /// Suffix appended to the source directory name to form the copy.
    pub shortened_name_suffix: String,
}

impl Settings {
    /// Whether `c` is a forbidden character.
    #[must_use]
    pub fn is_illegal(&self, c: char) -> bool {
        self.illegal_characters.contains(&c)
    }

    /// Whether `segment` contains any forbidden character.
    #[must_use]
    pub fn has_illegal(&self, segment: &str) -> bool {
        segment.chars().any(|c| self.is_illegal(c))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_path_length: DEFAULT_OS_PATH_LIMIT - DEFAULT_RESERVED_PREFIX_LENGTH,
            illegal_characters: DEFAULT_ILLEGAL_CHARACTERS.chars().collect(),
            hash_length: DEFAULT_HASH_LENGTH,
            shortened_name_suffix: DEFAULT_SHORTENED_NAME_SUFFIX.to_string(),
        }
    }
}

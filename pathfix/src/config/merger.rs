//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathfix::config::{Config, ConfigMerger};
///
/// let low = Config { hash_length: Some(3), ..Default::default() };
/// let high = Config { hash_length: Some(5), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.hash_length, Some(5));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target where set).
    ///
    /// Setting `max_path_length` in a higher source is final. Setting either
    /// `os_path_limit` or `reserved_prefix_length` in a higher source clears an
    /// inherited `max_path_length`, so that the derived budget takes effect.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.os_path_limit.is_some() || source.reserved_prefix_length.is_some() {
            target.max_path_length = None;
        }

        if source.max_path_length.is_some() {
            target.max_path_length = source.max_path_length;
        }

        if source.os_path_limit.is_some() {
            target.os_path_limit = source.os_path_limit;
        }

        if source.reserved_prefix_length.is_some() {
            target.reserved_prefix_length = source.reserved_prefix_length;
        }

        if source.illegal_characters.is_some() {
            target
                .illegal_characters
                .clone_from(&source.illegal_characters);
        }

        if source.hash_length.is_some() {
            target.hash_length = source.hash_length;
        }

        if source.shortened_name_suffix.is_some() {
            target
                .shortened_name_suffix
                .clone_from(&source.shortened_name_suffix);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}

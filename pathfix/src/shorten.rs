//! Segment shortening.
//!
//! A shortened segment keeps a prefix of its sanitized stem, then
//! [`HASH_SEPARATOR`], then a prefix of the SHA-256 digest of the original
//! path up to and including that segment, then the original extension:
//!
//! ```text
//! a_very_long_file_name.txt  ->  a_very_l_3f9a.txt
//! ```
//!
//! The hash ties each shortened name to the full original path, so siblings
//! with the same truncated prefix still get distinct names.

use sha2::{Digest, Sha256};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::{split_name, stem_len, EntityKind};
use crate::sanitize::sanitize_segment;
use crate::table::PathRow;

/// Separator between the kept stem prefix and the hash.
pub const HASH_SEPARATOR: char = '_';

/// Hex digest of `segments` joined with `/`, truncated to `hash_length`.
///
/// # Examples
///
/// ```
/// use pathfix::shorten::path_hash;
///
/// let segments = vec!["tree".to_string(), "docs".to_string()];
/// let hash = path_hash(&segments, 4);
/// assert_eq!(hash.len(), 4);
/// assert_eq!(hash, path_hash(&segments, 8)[..4]);
/// ```
#[must_use]
pub fn path_hash(segments: &[String], hash_length: usize) -> String {
    let digest = Sha256::digest(segments.join("/").as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(hash_length);
    hash
}

/// Shorten `base` so its stem keeps at most `allowed` characters before the
/// hash.
///
/// Returns `None` when the stem already fits in `allowed` characters.
///
/// # Examples
///
/// ```
/// use pathfix::path::EntityKind;
/// use pathfix::shorten::shorten_segment;
///
/// let short = shorten_segment("holiday_pictures.jpeg", EntityKind::File, 4, "ab12");
/// assert_eq!(short.as_deref(), Some("holi_ab12.jpeg"));
///
/// assert_eq!(shorten_segment("tiny.txt", EntityKind::File, 4, "ab12"), None);
/// ```
#[must_use]
pub fn shorten_segment(base: &str, kind: EntityKind, allowed: usize, hash: &str) -> Option<String> {
    let (stem, ext) = split_name(base, kind);
    if stem.chars().count() <= allowed {
        return None;
    }
    let kept: String = stem.chars().take(allowed).collect();
    Some(format!("{kept}{HASH_SEPARATOR}{hash}{ext}"))
}

/// Shortens the rows of a path table until they fit the budget.
#[derive(Debug, Clone, Copy)]
pub struct Shortener<'a> {
    settings: &'a Settings,
}

impl<'a> Shortener<'a> {
    /// Create a shortener for `settings`.
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Shorten the target of `row` until its effective length fits.
    ///
    /// Each sweep lowers the allowed stem length by one and visits columns
    /// right to left, stopping as soon as the row fits. A column is only
    /// rewritten when that makes it shorter. The root column is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unshortenable`] if the row still does not fit once the
    /// allowed stem length reaches zero.
    pub fn fit(&self, row: &mut PathRow) -> Result<()> {
        let limit = self.settings.max_path_length;
        if row.effective_len() <= limit {
            return Ok(());
        }

        let intermediate = row.target.to_string();
        let mut allowed = (1..row.len())
            .filter_map(|c| row.target.get(c).map(|name| stem_len(name, row.kind_at(c))))
            .max()
            .unwrap_or(0);

        while row.effective_len() > limit {
            if allowed == 0 {
                return Err(Error::Unshortenable {
                    original: row.original.to_string(),
                    intermediate,
                    target: row.target.to_string(),
                    length: row.effective_len(),
                    limit,
                });
            }
            allowed -= 1;

            for column in (1..row.len()).rev() {
                if self.shorten_column(row, column, allowed) && row.effective_len() <= limit {
                    break;
                }
            }
        }

        log::debug!(
            "Shortened {} to {} ({} chars)",
            row.original,
            row.target,
            row.effective_len()
        );
        Ok(())
    }

    fn shorten_column(&self, row: &mut PathRow, column: usize, allowed: usize) -> bool {
        let Some(original) = row.original.get(column) else {
            return false;
        };
        let kind = row.kind_at(column);
        let base = sanitize_segment(original, self.settings);
        let hash = path_hash(row.original.prefix(column), self.settings.hash_length);

        let Some(candidate) = shorten_segment(&base, kind, allowed, &hash) else {
            return false;
        };
        let current_len = row.target.get(column).map_or(0, |s| s.chars().count());
        if candidate.chars().count() >= current_len {
            return false;
        }
        row.target.set(column, candidate);
        true
    }
}

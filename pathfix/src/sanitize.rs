//! Replacement of forbidden characters in path segments.
//!
//! Every maximal run of forbidden characters in a segment collapses to a
//! single [`REPLACEMENT_CHAR`], so `readme<>.txt` becomes `readme_.txt`.
//! Other characters keep their order, but a name does not keep its length;
//! collapsing runs is preferred to replacing characters one for one. The tree
//! root (column zero) is never sanitized.

use crate::config::Settings;
use crate::path::PathColumns;

/// Character substituted for a run of forbidden characters.
pub const REPLACEMENT_CHAR: char = '_';

/// Sanitize a single segment.
///
/// # Examples
///
/// ```
/// use pathfix::config::Settings;
/// use pathfix::sanitize::sanitize_segment;
///
/// let settings = Settings::default();
/// assert_eq!(sanitize_segment("readme<>.txt", &settings), "readme_.txt");
/// assert_eq!(sanitize_segment("a:b|c", &settings), "a_b_c");
/// assert_eq!(sanitize_segment("clean", &settings), "clean");
/// ```
#[must_use]
pub fn sanitize_segment(segment: &str, settings: &Settings) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut in_run = false;
    for c in segment.chars() {
        if settings.is_illegal(c) {
            if !in_run {
                out.push(REPLACEMENT_CHAR);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Sanitize columns `1..` of `columns` in place.
///
/// Returns the indices of the columns that changed.
pub fn sanitize_columns(columns: &mut PathColumns, settings: &Settings) -> Vec<usize> {
    let mut changed = Vec::new();
    for column in 1..columns.len() {
        let Some(segment) = columns.get(column) else {
            continue;
        };
        if settings.has_illegal(segment) {
            let clean = sanitize_segment(segment, settings);
            columns.set(column, clean);
            changed.push(column);
        }
    }
    changed
}

/// Whether any non-root column of `columns` contains a forbidden character.
#[must_use]
pub fn needs_sanitizing(columns: &PathColumns, settings: &Settings) -> bool {
    columns.segments().iter().skip(1).any(|s| settings.has_illegal(s))
}

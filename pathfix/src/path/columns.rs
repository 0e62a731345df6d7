//! Segment-sequence representation of a path.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// A path as an ordered sequence of segments ("columns").
///
/// Column zero is the first component: the tree root's own name for the
/// relative paths the engine works with, or the filesystem root for absolute
/// paths.
///
/// # Examples
///
/// ```
/// use pathfix::path::PathColumns;
/// use std::path::Path;
///
/// let columns = PathColumns::from_path(Path::new("tree/docs/readme.txt")).unwrap();
/// assert_eq!(columns.len(), 3);
/// assert_eq!(columns.get(1), Some("docs"));
/// assert_eq!(columns.rendered_len(), "tree/docs/readme.txt".len());
/// assert_eq!(columns.to_path(), Path::new("tree/docs/readme.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PathColumns {
    segments: Vec<String>,
}

impl PathColumns {
    /// Split a path into its segments.
    ///
    /// `.` components are dropped; a leading root or prefix becomes its own
    /// column so that [`to_path`](Self::to_path) reproduces the input.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment is not valid UTF-8.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            let segment = match component {
                Component::CurDir => continue,
                Component::Prefix(prefix) => prefix.as_os_str(),
                Component::RootDir => component.as_os_str(),
                Component::ParentDir | Component::Normal(_) => component.as_os_str(),
            };
            let segment = segment.to_str().ok_or_else(|| Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "Path contains invalid UTF-8".to_string(),
            })?;
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Segments of `path` starting at the last component of `root`.
    ///
    /// For `root = /data/tree` and `path = /data/tree/a/b` this yields
    /// `["tree", "a", "b"]`, the form in which lengths are measured.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside `root`, `root` has no final
    /// component, or a segment is not valid UTF-8.
    pub fn from_root(root: &Path, path: &Path) -> Result<Self> {
        let root_name = root.file_name().ok_or_else(|| Error::InvalidPath {
            path: root.to_path_buf(),
            reason: "Tree root has no final component".to_string(),
        })?;
        let relative = path.strip_prefix(root).map_err(|_| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Not inside tree root {}", root.display()),
        })?;
        Self::from_path(&Path::new(root_name).join(relative))
    }

    /// Build from already-split segments.
    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Join the segments back into a path.
    #[must_use]
    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Path of the entity at `column` (segments `0..=column`).
    #[must_use]
    pub fn prefix_path(&self, column: usize) -> PathBuf {
        self.segments[..=column].iter().collect()
    }

    /// Segments `0..=column`.
    #[must_use]
    pub fn prefix(&self, column: usize) -> &[String] {
        &self.segments[..=column]
    }

    /// Whether the first `prefix.len()` segments equal `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.segments.len() >= prefix.len() && self.segments[..prefix.len()] == *prefix
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the last segment, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.segments.len().checked_sub(1)
    }

    /// Segment at `column`.
    #[must_use]
    pub fn get(&self, column: usize) -> Option<&str> {
        self.segments.get(column).map(String::as_str)
    }

    /// Replace the segment at `column`.
    pub fn set(&mut self, column: usize, segment: impl Into<String>) {
        self.segments[column] = segment.into();
    }

    /// All segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Rendered character length of the whole path.
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        rendered_len(&self.segments)
    }

    /// Rendered character length of segments `0..=column`.
    #[must_use]
    pub fn rendered_len_through(&self, column: usize) -> usize {
        rendered_len(&self.segments[..=column])
    }
}

/// Character length of `segments` joined with single separators.
///
/// A root segment (`/`) already ends in a separator, so none is added after it.
#[must_use]
pub fn rendered_len(segments: &[String]) -> usize {
    let mut len = 0;
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && !segments[i - 1].ends_with(std::path::MAIN_SEPARATOR) {
            len += 1;
        }
        len += segment.chars().count();
    }
    len
}

impl fmt::Display for PathColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path().display())
    }
}

//! Entity kinds.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

/// Whether a path segment denotes a directory or a file.
///
/// Symbolic links count as files: they are never descended into while
/// scanning, and the copy replaces them with what they point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A directory.
    Directory,
    /// A regular file, symbolic link, or other non-directory entry.
    File,
}

impl EntityKind {
    /// Query the kind of the entity currently at `path` without following
    /// symbolic links.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or cannot be inspected.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfix::path::EntityKind;
    ///
    /// let dir = std::env::temp_dir();
    /// assert_eq!(EntityKind::of(&dir).unwrap(), EntityKind::Directory);
    /// ```
    pub fn of(path: &Path) -> Result<Self> {
        let metadata = path
            .symlink_metadata()
            .map_err(|e| Error::path_io(path, e))?;
        Ok(Self::from_file_type(metadata.file_type()))
    }

    /// Query the kind of `path`, returning `None` if nothing is there.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the entity being absent.
    pub fn probe(path: &Path) -> Result<Option<Self>> {
        match path.symlink_metadata() {
            Ok(metadata) => Ok(Some(Self::from_file_type(metadata.file_type()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::path_io(path, e)),
        }
    }

    /// Classify an already obtained file type.
    #[must_use]
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }

    /// Whether this is [`EntityKind::Directory`].
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
        }
    }
}

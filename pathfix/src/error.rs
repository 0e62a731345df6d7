//! Error types for the pathfix library.
//!
//! This module provides the error hierarchy for every stage of a remediation
//! run (scanning, copying, planning, committing renames, writing namefiles and
//! verifying), using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathfix error.
///
/// # Examples
///
/// ```
/// use pathfix::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(148)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathfix library.
///
/// Apart from [`Error::Io`] and the configuration variants, every variant is a
/// fatal condition of a remediation run and carries the full path context an
/// operator needs to act on it.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An I/O error occurred on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    PathIo {
        /// The path being operated on.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A report could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The directory the remediated copy should be written to already exists.
    #[error("destination already exists: {} (delete it and retry)", path.display())]
    DestinationExists {
        /// The existing destination.
        path: PathBuf,
    },

    /// A source entity vanished during the bulk copy.
    ///
    /// Only broken symbolic links are tolerated during the copy; any other
    /// missing entry means the source changed underneath us.
    #[error("source entry disappeared during copy: {}", path.display())]
    MissingSource {
        /// The entry that could not be found.
        path: PathBuf,
    },

    /// A circular chain of symbolic links was found.
    #[error(
        "symlink loop detected at {}: {detail} \
         (locate it with `find -L <dir> -type l` or `find <dir> -xtype l`)",
        path.display()
    )]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
        /// What closed the loop.
        detail: String,
    },

    /// A rename target is already occupied on disk.
    #[error(
        "name collision: cannot rename {} to {} because the target already exists \
         (increase hash_length and retry on a fresh copy)",
        from.display(),
        to.display()
    )]
    NameCollision {
        /// The entity that was about to be renamed.
        from: PathBuf,
        /// The occupied target.
        to: PathBuf,
    },

    /// A namefile could not be created because the name is taken.
    #[error(
        "namefile collision: {} already exists \
         (increase hash_length and retry on a fresh copy)",
        path.display()
    )]
    NamefileCollision {
        /// The namefile path that already exists.
        path: PathBuf,
    },

    /// A path could not be shortened to fit the length budget.
    #[error(
        "path cannot be shortened to {limit} characters (best effort is {length}):\n  \
         original:     {original}\n  intermediate: {intermediate}\n  target:       {target}"
    )]
    Unshortenable {
        /// The path as first observed.
        original: String,
        /// The path after sanitization, before shortening.
        intermediate: String,
        /// The best-effort shortened path.
        target: String,
        /// Length of the best-effort target, including its namefiles.
        length: usize,
        /// The configured budget.
        limit: usize,
    },

    /// The tree still contains violations, or entries that could not be
    /// checked.
    #[error(
        "verification failed: {remaining} path(s) still violate the naming rules or could not be checked{}",
        list_paths(paths)
    )]
    VerificationFailed {
        /// Number of paths still in violation or left unchecked.
        remaining: usize,
        /// The offending paths.
        paths: Vec<PathBuf>,
    },
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\n  {}", p.display()))
        .collect()
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn path_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathIo {
            path: path.into(),
            source,
        }
    }

    /// Check if error is a rename or namefile name collision.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfix::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NamefileCollision { path: PathBuf::from("/tree/a.origname.txt") };
    /// assert!(err.is_collision());
    /// ```
    #[must_use]
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Self::NameCollision { .. } | Self::NamefileCollision { .. }
        )
    }

    /// Check if error reports a broken tree layout found while copying.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfix::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::MissingSource { path: PathBuf::from("/gone") };
    /// assert!(err.is_source_layout());
    /// ```
    #[must_use]
    pub fn is_source_layout(&self) -> bool {
        matches!(self, Self::MissingSource { .. } | Self::SymlinkLoop { .. })
    }
}

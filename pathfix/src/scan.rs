//! Tree scanning.
//!
//! A scan walks a tree and records, for the root and every entry below it,
//! the attributes the classifier needs. [`scan_tree`] sees links as leaves;
//! [`scan_tree_following`] sees the tree the way its copy will look. Entries
//! that cannot be inspected or represented are reported in
//! [`TreeScan::issues`] rather than aborting the scan, and a tree with issues
//! never counts as compliant.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Settings;
use crate::copy::is_loop_error;
use crate::error::{Error, Result};
use crate::path::{EntityKind, PathColumns};
use crate::sanitize::needs_sanitizing;

/// One scanned entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedPath {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Segments starting at the tree root's name.
    #[serde(skip)]
    pub columns: PathColumns,
    /// Rendered length of `columns`.
    pub length: usize,
    /// Directory or file. Unfollowed symbolic links are files.
    pub kind: EntityKind,
    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,
    /// Whether a non-root segment contains a forbidden character.
    pub has_illegal: bool,
}

/// An entry the scan had to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    /// The entry, when known.
    pub path: Option<PathBuf>,
    /// What went wrong.
    pub message: String,
}

/// Result of scanning one tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeScan {
    /// The scanned root.
    pub root: PathBuf,
    /// Every entry, root first, in walk order.
    pub entries: Vec<ScannedPath>,
    /// Entries that were omitted.
    pub issues: Vec<ScanIssue>,
}

/// Scan the tree rooted at `root` without following symbolic links.
///
/// # Errors
///
/// Returns an error if the root itself cannot be read. Failures below the
/// root are recorded as [`ScanIssue`]s.
///
/// # Examples
///
/// ```
/// use pathfix::config::Settings;
/// use pathfix::scan::scan_tree;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a?.txt"), "").unwrap();
///
/// let scan = scan_tree(dir.path(), &Settings::default()).unwrap();
/// assert_eq!(scan.entries.len(), 2);
/// assert!(scan.entries[1].has_illegal);
/// ```
pub fn scan_tree(root: &Path, settings: &Settings) -> Result<TreeScan> {
    walk(root, settings, false)
}

/// Scan the tree rooted at `root` as a dereferencing copy of it will look.
///
/// Links to directories are walked into and reported as directories. A
/// broken link is reported as the file that will replace it.
///
/// # Errors
///
/// As for [`scan_tree`], plus [`Error::SymlinkLoop`] when a link leads back
/// to one of its ancestors or cannot be resolved because of a cycle.
pub fn scan_tree_following(root: &Path, settings: &Settings) -> Result<TreeScan> {
    walk(root, settings, true)
}

fn walk(root: &Path, settings: &Settings, follow_links: bool) -> Result<TreeScan> {
    let mut entries = Vec::new();
    let mut issues = Vec::new();

    for result in WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("cannot read tree root"));
                    return Err(Error::path_io(root, source));
                }
                if follow_links {
                    if let Some(placeholder) = followed_link_error(&err, root, settings)? {
                        entries.push(placeholder);
                        continue;
                    }
                }
                log::debug!("Scan skipped an entry: {err}");
                issues.push(ScanIssue {
                    path: err.path().map(Path::to_path_buf),
                    message: err.to_string(),
                });
                continue;
            }
        };

        let kind = EntityKind::from_file_type(entry.file_type());
        match scanned(root, entry.path(), kind, entry.path_is_symlink(), settings) {
            Ok(scanned_path) => entries.push(scanned_path),
            Err(err) => {
                log::warn!("Cannot represent {}: {err}", entry.path().display());
                issues.push(ScanIssue {
                    path: Some(entry.path().to_path_buf()),
                    message: err.to_string(),
                });
            }
        }
    }

    log::debug!(
        "Scanned {} entries under {} ({} omitted)",
        entries.len(),
        root.display(),
        issues.len()
    );

    Ok(TreeScan {
        root: root.to_path_buf(),
        entries,
        issues,
    })
}

fn scanned(
    root: &Path,
    path: &Path,
    kind: EntityKind,
    is_symlink: bool,
    settings: &Settings,
) -> Result<ScannedPath> {
    let columns = PathColumns::from_root(root, path)?;
    Ok(ScannedPath {
        path: path.to_path_buf(),
        length: columns.rendered_len(),
        kind,
        is_symlink,
        has_illegal: needs_sanitizing(&columns, settings),
        columns,
    })
}

/// Cycles are fatal. A dangling link yields the file standing in for it.
/// Anything else is left to the caller.
fn followed_link_error(
    err: &walkdir::Error,
    root: &Path,
    settings: &Settings,
) -> Result<Option<ScannedPath>> {
    if let Some(ancestor) = err.loop_ancestor() {
        return Err(Error::SymlinkLoop {
            path: err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            detail: format!("links back to {}", ancestor.display()),
        });
    }

    let (Some(path), Some(io_err)) = (err.path(), err.io_error()) else {
        return Ok(None);
    };
    let is_link = path
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return Ok(None);
    }
    if is_loop_error(io_err) {
        return Err(Error::SymlinkLoop {
            path: path.to_path_buf(),
            detail: io_err.to_string(),
        });
    }
    if io_err.kind() != std::io::ErrorKind::NotFound {
        return Ok(None);
    }
    Ok(scanned(root, path, EntityKind::File, true, settings).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_includes_root_and_lengths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("file.txt"), "x").unwrap();

        let scan = scan_tree(&root, &Settings::default()).unwrap();
        let lengths: Vec<_> = scan.entries.iter().map(|e| e.length).collect();
        assert_eq!(lengths, vec![4, 8, 17]);
        assert_eq!(scan.entries[0].kind, EntityKind::Directory);
        assert_eq!(scan.entries[2].kind, EntityKind::File);
        assert!(scan.issues.is_empty());
    }

    #[test]
    fn test_root_name_is_not_checked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("odd:root");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("ok.txt"), "").unwrap();

        let scan = scan_tree(&root, &Settings::default()).unwrap();
        assert!(scan.entries.iter().all(|e| !e.has_illegal));
    }

    #[test]
    fn test_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(scan_tree(&temp_dir.path().join("missing"), &Settings::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real").join("f"), "").unwrap();
        std::os::unix::fs::symlink("real", root.join("link")).unwrap();

        let scan = scan_tree(&root, &Settings::default()).unwrap();
        let link = scan
            .entries
            .iter()
            .find(|e| e.path.ends_with("link"))
            .unwrap();
        assert!(link.is_symlink);
        assert_eq!(link.kind, EntityKind::File);
        assert_eq!(scan.entries.len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_following_scan_enters_linked_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(root.join("real")).unwrap();
        fs::write(root.join("real").join("f"), "").unwrap();
        std::os::unix::fs::symlink("real", root.join("link.v2")).unwrap();

        let scan = scan_tree_following(&root, &Settings::default()).unwrap();
        let link = scan
            .entries
            .iter()
            .find(|e| e.path.ends_with("link.v2"))
            .unwrap();
        assert!(link.is_symlink);
        assert_eq!(link.kind, EntityKind::Directory);
        assert!(scan
            .entries
            .iter()
            .any(|e| e.path.ends_with("link.v2/f") && !e.is_symlink));
        assert_eq!(scan.entries.len(), 5);
    }

    #[cfg(unix)]
    #[test]
    fn test_following_scan_keeps_broken_link_as_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink("nowhere", root.join("dangling")).unwrap();

        let scan = scan_tree_following(&root, &Settings::default()).unwrap();
        assert_eq!(scan.entries.len(), 2);
        assert_eq!(scan.entries[1].kind, EntityKind::File);
        assert!(scan.entries[1].is_symlink);
        assert!(scan.issues.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_following_scan_rejects_cycles() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        fs::create_dir_all(root.join("a")).unwrap();
        std::os::unix::fs::symlink("..", root.join("a").join("up")).unwrap();

        let err = scan_tree_following(&root, &Settings::default()).unwrap_err();
        assert!(matches!(err, Error::SymlinkLoop { .. }), "{err}");
        assert!(scan_tree(&root, &Settings::default()).is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_an_issue() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("tree");
        let odd = root.join(OsStr::from_bytes(b"bad\xFFname"));
        fs::create_dir_all(&odd).unwrap();
        fs::write(odd.join("inner.txt"), "").unwrap();

        let scan = scan_tree(&root, &Settings::default()).unwrap();
        assert_eq!(scan.entries.len(), 1);
        assert_eq!(scan.issues.len(), 2);
        assert_eq!(scan.issues[0].path.as_deref(), Some(odd.as_path()));
    }
}

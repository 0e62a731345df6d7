//! Bulk copy of a tree with symbolic links dereferenced.
//!
//! The copy contains no symbolic links: linked files and directories are
//! copied as what they point at. A broken link is replaced by a placeholder
//! file describing it. A circular chain of links aborts the copy.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A symbolic link whose target could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenSymlink {
    /// The link in the source tree.
    pub source: PathBuf,
    /// The placeholder written in its place in the copy.
    pub placeholder: PathBuf,
    /// What the link points at, if it could be read.
    pub link_target: Option<PathBuf>,
    /// The error kind reported by the operating system.
    pub error_kind: String,
    /// The full error message.
    pub error: String,
}

/// Outcome of a bulk copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// The copied tree.
    pub source: PathBuf,
    /// The new tree.
    pub destination: PathBuf,
    /// Directories created.
    pub directories: usize,
    /// Files copied.
    pub files: usize,
    /// Entries that were symbolic links and were copied as their targets.
    pub dereferenced_symlinks: usize,
    /// Broken links replaced by placeholders.
    pub broken_symlinks: Vec<BrokenSymlink>,
    /// Entries that are neither file nor directory and were not copied.
    pub skipped: Vec<PathBuf>,
}

/// Copy `source` to `destination`, dereferencing symbolic links.
///
/// # Errors
///
/// - [`Error::DestinationExists`] if `destination` already exists.
/// - [`Error::SymlinkLoop`] if symbolic links form a cycle.
/// - [`Error::MissingSource`] if a non-link entry vanishes mid-copy.
/// - An I/O error for any other failure.
///
/// # Examples
///
/// ```
/// use pathfix::copy::copy_tree;
///
/// let dir = tempfile::tempdir().unwrap();
/// let src = dir.path().join("src");
/// std::fs::create_dir(&src).unwrap();
/// std::fs::write(src.join("a.txt"), "hello").unwrap();
///
/// let report = copy_tree(&src, &dir.path().join("dst")).unwrap();
/// assert_eq!(report.files, 1);
/// assert_eq!(std::fs::read_to_string(dir.path().join("dst/a.txt")).unwrap(), "hello");
/// ```
pub fn copy_tree(source: &Path, destination: &Path) -> Result<CopyReport> {
    if destination.symlink_metadata().is_ok() {
        return Err(Error::DestinationExists {
            path: destination.to_path_buf(),
        });
    }

    let mut report = CopyReport {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        ..CopyReport::default()
    };

    for result in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                handle_walk_error(err, source, destination, &mut report)?;
                continue;
            }
        };

        let target = destination.join(relative(source, entry.path())?);
        if entry.path_is_symlink() {
            report.dereferenced_symlinks += 1;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::path_io(&target, e))?;
            report.directories += 1;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound && entry.path().symlink_metadata().is_err() {
                    Error::MissingSource {
                        path: entry.path().to_path_buf(),
                    }
                } else {
                    Error::path_io(entry.path(), e)
                }
            })?;
            report.files += 1;
        } else {
            log::warn!("Skipping special file {}", entry.path().display());
            report.skipped.push(entry.path().to_path_buf());
        }
    }

    log::info!(
        "Copied {} to {} ({} files, {} directories, {} broken links)",
        source.display(),
        destination.display(),
        report.files,
        report.directories,
        report.broken_symlinks.len()
    );
    Ok(report)
}

fn relative<'p>(source: &Path, path: &'p Path) -> Result<&'p Path> {
    path.strip_prefix(source).map_err(|_| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Not inside {}", source.display()),
    })
}

fn handle_walk_error(
    err: walkdir::Error,
    source: &Path,
    destination: &Path,
    report: &mut CopyReport,
) -> Result<()> {
    let path = err.path().map(Path::to_path_buf);

    if let Some(ancestor) = err.loop_ancestor() {
        return Err(Error::SymlinkLoop {
            path: path.unwrap_or_else(|| source.to_path_buf()),
            detail: format!("links back to {}", ancestor.display()),
        });
    }

    let Some(path) = path else {
        return Err(err
            .into_io_error()
            .map_or_else(|| Error::path_io(source, io::Error::other("walk failed")), Error::Io));
    };
    let is_link = path
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    let Some(io_err) = err.into_io_error() else {
        return Err(Error::path_io(&path, io::Error::other("walk failed")));
    };

    if is_link && is_loop_error(&io_err) {
        return Err(Error::SymlinkLoop {
            path,
            detail: io_err.to_string(),
        });
    }

    if io_err.kind() == io::ErrorKind::NotFound {
        if !is_link {
            return Err(Error::MissingSource { path });
        }
        let placeholder = destination.join(relative(source, &path)?);
        let link_target = fs::read_link(&path).ok();
        write_placeholder(&placeholder, &path, link_target.as_deref(), &io_err)?;
        log::warn!(
            "Broken symbolic link {} -> {} ({:?})",
            path.display(),
            link_target
                .as_deref()
                .map_or_else(|| "?".to_string(), |t| t.display().to_string()),
            io_err.kind()
        );
        report.broken_symlinks.push(BrokenSymlink {
            source: path,
            placeholder,
            link_target,
            error_kind: format!("{:?}", io_err.kind()),
            error: io_err.to_string(),
        });
        return Ok(());
    }

    Err(Error::path_io(path, io_err))
}

fn write_placeholder(
    placeholder: &Path,
    link: &Path,
    link_target: Option<&Path>,
    io_err: &io::Error,
) -> Result<()> {
    let contents = format!(
        "This file replaces a broken symbolic link.\nlink: {}\ntarget: {}\nerror: {}\n",
        link.display(),
        link_target.map_or_else(|| "?".to_string(), |t| t.display().to_string()),
        io_err
    );
    fs::write(placeholder, contents).map_err(|e| Error::path_io(placeholder, e))
}

#[cfg(unix)]
pub(crate) fn is_loop_error(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::ELOOP)
}

#[cfg(not(unix))]
pub(crate) fn is_loop_error(_err: &io::Error) -> bool {
    false
}

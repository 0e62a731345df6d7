//! Resolution of user-supplied tree roots.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// `~user` syntax is not supported.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory cannot
/// be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use pathfix::path::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde(Path::new("/abs")).unwrap(), Path::new("/abs"));
/// assert!(expand_tilde(Path::new("~/tree")).unwrap().ends_with("tree"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Make `path` absolute and fold `.` and `..` lexically.
///
/// # Errors
///
/// Returns an error if the current directory is unavailable or `..` climbs
/// past the filesystem root.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut result = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if result.parent().is_none() || !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components".to_string(),
                    });
                }
            }
        }
    }
    Ok(result)
}

/// Resolve the root of a tree to remediate.
///
/// The result is absolute, names an existing directory, and has a final
/// component (the filesystem root itself cannot be a tree root because its
/// copy would need a sibling).
///
/// # Errors
///
/// Returns an error if the path cannot be resolved, does not exist, is not a
/// directory, or is the filesystem root.
pub fn resolve_tree_root(path: &Path) -> Result<PathBuf> {
    let root = absolutize(&expand_tilde(path)?)?;

    if root.file_name().is_none() {
        return Err(Error::InvalidPath {
            path: root,
            reason: "The filesystem root cannot be remediated".to_string(),
        });
    }

    let metadata = root.metadata().map_err(|e| Error::path_io(&root, e))?;
    if !metadata.is_dir() {
        return Err(Error::InvalidPath {
            path: root,
            reason: "Not a directory".to_string(),
        });
    }

    Ok(root)
}

/// Name of the copy of `root`: its final component plus `suffix`, as a
/// sibling of `root`.
///
/// # Errors
///
/// Returns an error if `root` has no final component or it is not UTF-8.
pub fn shortened_sibling(root: &Path, suffix: &str) -> Result<PathBuf> {
    let name = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath {
            path: root.to_path_buf(),
            reason: "Tree root has no UTF-8 final component".to_string(),
        })?;
    Ok(root.with_file_name(format!("{name}{suffix}")))
}

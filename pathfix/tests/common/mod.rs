//! Common test utilities for integration tests.
//!
//! This module provides helpers for building small source trees and for
//! checking that a remediated tree obeys the naming rules.

use std::fs;
use std::path::{Path, PathBuf};

use pathfix::config::Settings;
use pathfix::path::PathColumns;
use walkdir::WalkDir;

/// Settings with the given budget and defaults otherwise.
#[allow(dead_code)]
pub fn settings(max_path_length: usize) -> Settings {
    Settings {
        max_path_length,
        ..Settings::default()
    }
}

/// Create `root/relative` as a file with `contents`, creating parents.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Create `root/relative` as a directory.
#[allow(dead_code)]
pub fn make_dir(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(&path).unwrap();
    path
}

/// Every path under `root`, root included, relative to `root`'s parent.
#[allow(dead_code)]
pub fn rendered_paths(root: &Path) -> Vec<PathColumns> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(|e| PathColumns::from_root(root, e.unwrap().path()).unwrap())
        .collect()
}

/// Assert every path under `root` fits, is clean, and is not a symlink.
#[allow(dead_code)]
pub fn assert_compliant(root: &Path, settings: &Settings) {
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.unwrap();
        assert!(
            !entry.path_is_symlink(),
            "symlink left in result: {}",
            entry.path().display()
        );
        let columns = PathColumns::from_root(root, entry.path()).unwrap();
        assert!(
            columns.rendered_len() <= settings.max_path_length,
            "{} is {} chars, limit {}",
            columns,
            columns.rendered_len(),
            settings.max_path_length
        );
        for segment in columns.segments().iter().skip(1) {
            assert!(
                !settings.has_illegal(segment),
                "forbidden character left in {segment:?}"
            );
        }
    }
}

/// Read every namefile under `root` into `(namefile path, recorded name)`.
#[allow(dead_code)]
pub fn namefiles(root: &Path) -> Vec<(PathBuf, String)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap().into_path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.ends_with(".origname.txt") || name.ends_with(".origdirname.txt")
        })
        .map(|p| {
            let recorded = fs::read_to_string(&p).unwrap().trim_end_matches('\n').to_string();
            (p, recorded)
        })
        .collect()
}

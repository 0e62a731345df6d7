//! Classification of scanned paths against the naming rules.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::path::{EntityKind, PathColumns};
use crate::scan::{ScannedPath, TreeScan};

/// Which rules a path breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViolationKinds {
    /// Longer than the limit.
    pub too_long: bool,
    /// Is a symbolic link.
    pub symlink: bool,
    /// Contains a forbidden character outside the root segment.
    pub illegal_characters: bool,
}

impl ViolationKinds {
    /// Whether any rule is broken.
    #[must_use]
    pub fn any(self) -> bool {
        self.too_long || self.symlink || self.illegal_characters
    }
}

/// A path that breaks at least one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Segments starting at the tree root's name.
    #[serde(skip)]
    pub columns: PathColumns,
    /// Rendered length.
    pub length: usize,
    /// Kind of the entity at the end of the path.
    pub kind: EntityKind,
    /// Rules broken.
    pub kinds: ViolationKinds,
}

/// Violations ordered by descending length, ties broken by path.
///
/// Deepest and longest paths come first so that when a shared ancestor is
/// shortened for one path, every path that is processed later already sees
/// the new name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationSet {
    violations: Vec<Violation>,
}

impl ViolationSet {
    /// Build from unordered violations, dropping duplicate paths.
    #[must_use]
    pub fn new(violations: impl IntoIterator<Item = Violation>) -> Self {
        let unique: BTreeMap<PathBuf, Violation> = violations
            .into_iter()
            .map(|v| (v.path.clone(), v))
            .collect();
        let mut violations: Vec<Violation> = unique.into_values().collect();
        violations.sort_by(|a, b| match b.length.cmp(&a.length) {
            Ordering::Equal => a.path.cmp(&b.path),
            other => other,
        });
        Self { violations }
    }

    /// Violations in processing order.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate in processing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether there are none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Paths of all violations, in processing order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.violations.iter().map(|v| v.path.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ViolationSet {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Aggregate statistics of one classified tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathStats {
    /// Paths examined, root included.
    pub total_paths: usize,
    /// The limit paths were checked against.
    pub limit: usize,
    /// Length of the longest path.
    pub max_length: usize,
    /// The longest path.
    pub longest_path: Option<PathBuf>,
    /// Paths longer than the limit.
    pub too_long: usize,
    /// Symbolic links.
    pub symlinks: usize,
    /// Paths with forbidden characters.
    pub illegal_characters: usize,
    /// Paths breaking at least one rule.
    pub needing_fix: usize,
}

/// Statistics and violations of one tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    /// Aggregate statistics.
    pub stats: PathStats,
    /// Paths breaking at least one rule.
    pub violations: ViolationSet,
}

/// Check one scanned path against `limit`.
#[must_use]
pub fn check(entry: &ScannedPath, limit: usize) -> ViolationKinds {
    ViolationKinds {
        too_long: entry.length > limit,
        symlink: entry.is_symlink,
        illegal_characters: entry.has_illegal,
    }
}

/// Classify every entry of `scan` against `limit`.
///
/// # Examples
///
/// ```
/// use pathfix::classify::classify;
/// use pathfix::config::Settings;
/// use pathfix::scan::scan_tree;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a<.txt"), "").unwrap();
///
/// let scan = scan_tree(dir.path(), &Settings::default()).unwrap();
/// let result = classify(&scan, 148);
/// assert_eq!(result.stats.illegal_characters, 1);
/// assert_eq!(result.violations.len(), 1);
/// ```
#[must_use]
pub fn classify(scan: &TreeScan, limit: usize) -> Classification {
    let mut stats = PathStats {
        limit,
        ..PathStats::default()
    };
    let mut violations = Vec::new();

    for entry in &scan.entries {
        stats.total_paths += 1;
        if entry.length > stats.max_length || stats.longest_path.is_none() {
            stats.max_length = entry.length;
            stats.longest_path = Some(entry.path.clone());
        }

        let kinds = check(entry, limit);
        stats.too_long += usize::from(kinds.too_long);
        stats.symlinks += usize::from(kinds.symlink);
        stats.illegal_characters += usize::from(kinds.illegal_characters);

        if kinds.any() {
            stats.needing_fix += 1;
            violations.push(Violation {
                path: entry.path.clone(),
                columns: entry.columns.clone(),
                length: entry.length,
                kind: entry.kind,
                kinds,
            });
        }
    }

    Classification {
        stats,
        violations: ViolationSet::new(violations),
    }
}

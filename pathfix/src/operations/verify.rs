//! Tree inspection and post-remediation verification.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::{classify, PathStats, ViolationSet};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::scan::{scan_tree, scan_tree_following, ScanIssue, TreeScan};

/// Statistics and violations of one tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeReport {
    /// The inspected root.
    pub root: PathBuf,
    /// Aggregate statistics.
    pub stats: PathStats,
    /// Paths breaking at least one rule, in processing order.
    pub violations: ViolationSet,
    /// Entries the scan had to leave out.
    pub issues: Vec<ScanIssue>,
}

impl TreeReport {
    /// Whether the tree has no violations and nothing was left unseen.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.issues.is_empty()
    }

    /// Violating paths followed by the paths the scan could not check.
    #[must_use]
    pub fn offending_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.violations.paths();
        paths.extend(self.issues.iter().filter_map(|issue| issue.path.clone()));
        paths
    }
}

/// Scan `root` and classify it against `limit`.
///
/// # Errors
///
/// Returns an error if the root cannot be read.
pub fn inspect_tree(root: &Path, settings: &Settings, limit: usize) -> Result<TreeReport> {
    Ok(report(scan_tree(root, settings)?, limit))
}

/// Like [`inspect_tree`], but through symbolic links, as a copy of `root`
/// will look.
///
/// # Errors
///
/// Returns an error if the root cannot be read or a link cycle is found.
pub fn inspect_source(root: &Path, settings: &Settings, limit: usize) -> Result<TreeReport> {
    Ok(report(scan_tree_following(root, settings)?, limit))
}

fn report(scan: TreeScan, limit: usize) -> TreeReport {
    let classification = classify(&scan, limit);
    TreeReport {
        root: scan.root,
        stats: classification.stats,
        violations: classification.violations,
        issues: scan.issues,
    }
}

/// Check that `root` fully complies with the configured budget.
///
/// # Errors
///
/// Returns [`Error::VerificationFailed`] listing every offending path if any
/// violation remains or any entry could not be checked, or an error if the
/// root cannot be read.
///
/// # Examples
///
/// ```
/// use pathfix::config::Settings;
/// use pathfix::operations::verify_tree;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("ok.txt"), "").unwrap();
/// assert!(verify_tree(dir.path(), &Settings::default()).unwrap().is_clean());
///
/// std::fs::write(dir.path().join("bad?.txt"), "").unwrap();
/// assert!(verify_tree(dir.path(), &Settings::default()).is_err());
/// ```
pub fn verify_tree(root: &Path, settings: &Settings) -> Result<TreeReport> {
    let report = inspect_tree(root, settings, settings.max_path_length)?;
    if !report.is_clean() {
        for violation in &report.violations {
            log::error!(
                "Still violating ({} chars): {}",
                violation.length,
                violation.path.display()
            );
        }
        for issue in &report.issues {
            log::error!("Could not check: {}", issue.message);
        }
        return Err(Error::VerificationFailed {
            remaining: report.violations.len() + report.issues.len(),
            paths: report.offending_paths(),
        });
    }
    log::info!(
        "Verified {}: {} path(s), longest {} chars",
        root.display(),
        report.stats.total_paths,
        report.stats.max_length
    );
    Ok(report)
}

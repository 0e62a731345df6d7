//! End-to-end remediation of a tree.
//!
//! The source tree is never modified. A run first classifies the source,
//! seen through its links as the copy will hold it, against the budget minus
//! the suffix its copy will carry; if nothing breaks a rule, no copy is made. Otherwise the tree is copied next to itself with
//! links dereferenced, the copy is fixed in place, and the result is verified.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::PathStats;
use crate::config::Settings;
use crate::copy::{copy_tree, CopyReport};
use crate::error::{Error, Result};
use crate::path::{resolve_tree_root, shortened_sibling};
use crate::scan::ScanIssue;

use super::executor::PlanExecutor;
use super::plan::RemediationPlan;
use super::verify::{inspect_source, inspect_tree, verify_tree, TreeReport};

/// Options for a remediation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemediateOptions {
    /// Compute the plan against the source without copying or renaming.
    pub dry_run: bool,
}

impl RemediateOptions {
    /// Options for a normal run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dry-run flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The source already complies; no copy was made.
    NothingToDo,
    /// Planned only; nothing on disk changed.
    DryRun,
    /// A compliant copy was produced and verified.
    Remediated,
}

/// Everything a run observed and did.
#[derive(Debug, Clone, Serialize)]
pub struct RemediationReport {
    /// How the run ended.
    pub outcome: Outcome,
    /// The source tree.
    pub source: PathBuf,
    /// The copy (planned, for dry runs and no-op runs).
    pub destination: PathBuf,
    /// Settings in effect.
    pub settings: Settings,
    /// Source statistics, measured against the budget minus the suffix.
    pub before: PathStats,
    /// Bulk copy results.
    pub copy: Option<CopyReport>,
    /// Statistics of the copy before it was fixed.
    pub copied: Option<PathStats>,
    /// Statistics of the verified result.
    pub after: Option<PathStats>,
    /// Renames and namefiles, performed or planned.
    pub plan: RemediationPlan,
    /// Entries the source scan had to leave out.
    pub scan_issues: Vec<ScanIssue>,
}

/// Outcome of fixing an existing tree in place.
#[derive(Debug, Clone, Serialize)]
pub struct InPlaceReport {
    /// The tree before fixing.
    pub before: PathStats,
    /// Renames and namefiles performed.
    pub plan: RemediationPlan,
    /// The verified result.
    pub after: TreeReport,
}

/// Produce a compliant copy of `source`.
///
/// # Errors
///
/// Any fatal condition of a run: an unreadable source, an existing
/// destination, a link cycle, an unshortenable path, a collision, or a failed
/// verification.
///
/// # Examples
///
/// ```
/// use pathfix::config::Settings;
/// use pathfix::operations::{remediate, Outcome, RemediateOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let src = dir.path().join("tree");
/// std::fs::create_dir(&src).unwrap();
/// std::fs::write(src.join("readme<>.txt"), "hi").unwrap();
///
/// let report = remediate(&src, &Settings::default(), &RemediateOptions::new()).unwrap();
/// assert_eq!(report.outcome, Outcome::Remediated);
/// assert!(dir.path().join("tree_shortened/readme_.txt").is_file());
/// assert!(src.join("readme<>.txt").is_file());
/// ```
pub fn remediate(
    source: &Path,
    settings: &Settings,
    options: &RemediateOptions,
) -> Result<RemediationReport> {
    let source = resolve_tree_root(source)?;
    let destination = shortened_sibling(&source, &settings.shortened_name_suffix)?;
    let reserve = settings.shortened_name_suffix.chars().count();
    let budget = settings.max_path_length.saturating_sub(reserve);

    let inspected = inspect_source(&source, settings, budget)?;
    for issue in &inspected.issues {
        log::warn!("Cannot check source entry: {}", issue.message);
    }
    log::info!(
        "{}: {} path(s), longest {} chars, {} need fixing",
        source.display(),
        inspected.stats.total_paths,
        inspected.stats.max_length,
        inspected.stats.needing_fix
    );

    let mut report = RemediationReport {
        outcome: Outcome::NothingToDo,
        source: source.clone(),
        destination: destination.clone(),
        settings: settings.clone(),
        before: inspected.stats.clone(),
        copy: None,
        copied: None,
        after: None,
        plan: RemediationPlan::new(format!("Nothing to do for {}", source.display())),
        scan_issues: inspected.issues.clone(),
    };

    if inspected.is_clean() {
        log::info!("Nothing to do: every path already complies");
        return Ok(report);
    }

    if options.dry_run {
        let label = destination
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        report.plan = PlanExecutor::new(parent_of(&source)?, settings)
            .dry_run()
            .with_root_label(label)
            .execute(&inspected.violations)?;
        report.outcome = Outcome::DryRun;
        return Ok(report);
    }

    report.copy = Some(copy_tree(&source, &destination)?);
    let fixed = remediate_in_place(&destination, settings)?;
    report.copied = Some(fixed.before);
    report.after = Some(fixed.after.stats);
    report.plan = fixed.plan;
    report.outcome = Outcome::Remediated;
    Ok(report)
}

/// Fix the tree at `root` in place and verify the result.
///
/// This is the second half of [`remediate`], run on the fresh copy. Running
/// it on an already compliant tree changes nothing.
///
/// # Errors
///
/// As for [`remediate`], minus the copy-related conditions.
pub fn remediate_in_place(root: &Path, settings: &Settings) -> Result<InPlaceReport> {
    let root = resolve_tree_root(root)?;
    let before = inspect_tree(&root, settings, settings.max_path_length)?;
    let plan = PlanExecutor::new(parent_of(&root)?, settings).execute(&before.violations)?;
    let after = verify_tree(&root, settings)?;
    Ok(InPlaceReport {
        before: before.stats,
        plan,
        after,
    })
}

fn parent_of(root: &Path) -> Result<&Path> {
    root.parent().ok_or_else(|| Error::InvalidPath {
        path: root.to_path_buf(),
        reason: "Tree root has no parent directory".to_string(),
    })
}

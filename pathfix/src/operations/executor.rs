//! Plan execution engine.
//!
//! The executor walks the path table in order. For each row it computes the
//! target, then commits every changed column left to right, renaming on disk
//! and propagating the new name to every other row below the renamed entity.
//! Namefiles are written only after the last rename.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::ViolationSet;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::namefile::{owed_namefiles, NamefileWriter};
use crate::table::PathTable;

use super::plan::{PlanAction, RemediationPlan, RowPlanner};

/// Applies remediation to a tree.
///
/// The executor can run in normal mode (renaming and writing namefiles) or
/// dry-run mode (computing the same actions without touching the disk).
///
/// # Examples
///
/// ```
/// use pathfix::classify::classify;
/// use pathfix::config::Settings;
/// use pathfix::operations::PlanExecutor;
/// use pathfix::scan::scan_tree;
///
/// let dir = tempfile::tempdir().unwrap();
/// let root = dir.path().join("tree");
/// std::fs::create_dir(&root).unwrap();
/// std::fs::write(root.join("a?.txt"), "").unwrap();
///
/// let settings = Settings::default();
/// let scan = scan_tree(&root, &settings).unwrap();
/// let violations = classify(&scan, settings.max_path_length).violations;
///
/// let plan = PlanExecutor::new(dir.path(), &settings).execute(&violations).unwrap();
/// assert_eq!(plan.rename_count(), 1);
/// assert!(root.join("a_.txt").exists());
/// assert!(root.join("a_.origname.txt").exists());
/// ```
#[derive(Debug, Clone)]
pub struct PlanExecutor<'a> {
    base: PathBuf,
    settings: &'a Settings,
    dry_run: bool,
    root_label: Option<String>,
}

impl<'a> PlanExecutor<'a> {
    /// Creates an executor for trees whose root lives directly in `base`.
    #[must_use]
    pub fn new(base: &Path, settings: &'a Settings) -> Self {
        Self {
            base: base.to_path_buf(),
            settings,
            dry_run: false,
            root_label: None,
        }
    }

    /// Sets the executor to dry-run mode.
    #[must_use]
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Plan as if the tree root were called `label`.
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Whether this executor is in dry-run mode.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Remediate every path in `violations`.
    ///
    /// # Errors
    ///
    /// Fails on the first unshortenable path, name collision, namefile
    /// collision, or I/O error. Renames committed before the failure stay on
    /// disk.
    pub fn execute(&self, violations: &ViolationSet) -> Result<RemediationPlan> {
        let mut plan = RemediationPlan::new(format!(
            "{} {} path(s) under {}",
            if self.dry_run { "Plan remediation of" } else { "Remediate" },
            violations.len(),
            self.base.display()
        ));

        for violation in violations.iter().filter(|v| v.kinds.symlink) {
            plan.add_warning(format!(
                "{} is a symbolic link and is copied as its target",
                violation.path.display()
            ));
        }

        let mut table = PathTable::from_violations(violations, self.root_label.as_deref());
        let planner = RowPlanner::new(self.settings);

        for index in 0..table.len() {
            planner.plan(table.row_mut(index))?;
            for action in self.commit_row(&mut table, index)? {
                plan.add_action(action);
            }
        }

        // Barrier: every rename is on disk before the first namefile.
        let mut writer = NamefileWriter::new(self.dry_run);
        for owed in owed_namefiles(&table, &self.base) {
            writer.write(&owed)?;
        }
        for record in writer.into_records() {
            plan.add_action(PlanAction::WriteNamefile(record));
        }

        log::info!(
            "{}: {} rename(s), {} namefile(s)",
            plan.description,
            plan.rename_count(),
            plan.namefiles().count()
        );
        Ok(plan)
    }

    /// Commit the planned columns of row `index`, left to right.
    ///
    /// Each rename is propagated through the table before the next column is
    /// looked at, so later columns and later rows see on-disk names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NameCollision`] if a target is already taken, or an
    /// I/O error if the rename fails.
    pub fn commit_row(&self, table: &mut PathTable, index: usize) -> Result<Vec<PlanAction>> {
        let mut actions = Vec::new();

        for column in 1..table.row(index).len() {
            let row = table.row(index);
            let (Some(current), Some(planned)) = (row.source.get(column), row.target.get(column))
            else {
                continue;
            };
            if current == planned {
                continue;
            }

            let planned = planned.to_string();
            let old_prefix = row.source.prefix(column).to_vec();
            let from = self.base.join(row.source.prefix_path(column));
            let to = from.with_file_name(&planned);
            let kind = row.kind_at(column);
            let original_name = row.original.get(column).unwrap_or_default().to_string();

            if !self.dry_run {
                rename_entity(&from, &to)?;
            }
            let updated = table.propagate(&old_prefix, &planned);
            log::debug!(
                "Renamed {} -> {} ({updated} pending path(s) updated)",
                from.display(),
                to.display()
            );

            actions.push(PlanAction::Rename {
                from,
                to,
                original_name,
                kind,
            });
        }

        Ok(actions)
    }
}

fn rename_entity(from: &Path, to: &Path) -> Result<()> {
    if to.symlink_metadata().is_ok() {
        return Err(Error::NameCollision {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(|e| Error::path_io(from, e))
}

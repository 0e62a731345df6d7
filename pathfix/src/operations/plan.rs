//! Plan types for remediation runs.
//!
//! A [`RemediationPlan`] records every rename and namefile a run performed,
//! or would perform in a dry run, in the order they happen.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;
use crate::namefile::NamefileRecord;
use crate::path::EntityKind;
use crate::sanitize::sanitize_columns;
use crate::shorten::Shortener;
use crate::table::PathRow;

/// A single step of a remediation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanAction {
    /// Rename one entity in place.
    Rename {
        /// Current path.
        from: PathBuf,
        /// New path (same parent).
        to: PathBuf,
        /// The entity's original segment.
        original_name: String,
        /// Directory or file.
        kind: EntityKind,
    },

    /// Record an original name in a namefile.
    WriteNamefile(NamefileRecord),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Rename { from, to, kind, .. } => {
                format!("Rename {kind} {} -> {}", from.display(), to.display())
            }
            Self::WriteNamefile(record) => {
                format!(
                    "Write {} (original name {:?})",
                    record.path.display(),
                    record.original_name
                )
            }
        }
    }
}

/// Every action of one run, plus warnings for the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemediationPlan {
    /// A human-readable description of the run.
    pub description: String,

    /// Actions in execution order.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl RemediationPlan {
    /// Creates an empty plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfix::operations::RemediationPlan;
    ///
    /// let plan = RemediationPlan::new("Remediate /data/tree");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds an action.
    pub fn add_action(&mut self, action: PlanAction) {
        self.actions.push(action);
    }

    /// Adds a warning.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Whether the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Number of renames.
    #[must_use]
    pub fn rename_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, PlanAction::Rename { .. }))
            .count()
    }

    /// Namefiles written.
    pub fn namefiles(&self) -> impl Iterator<Item = &NamefileRecord> {
        self.actions.iter().filter_map(|a| match a {
            PlanAction::WriteNamefile(record) => Some(record),
            PlanAction::Rename { .. } => None,
        })
    }
}

/// Computes the target of a single row: sanitize, then shorten.
#[derive(Debug, Clone, Copy)]
pub struct RowPlanner<'a> {
    settings: &'a Settings,
}

impl<'a> RowPlanner<'a> {
    /// Create a planner for `settings`.
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Rewrite `row.target` so that it is free of forbidden characters and,
    /// together with its namefiles, fits the budget.
    ///
    /// Columns already renamed on behalf of an earlier row are clean and are
    /// left alone by the sanitizing step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Unshortenable`] if the row cannot be made to fit.
    pub fn plan(&self, row: &mut PathRow) -> Result<()> {
        let sanitized = sanitize_columns(&mut row.target, self.settings);
        if !sanitized.is_empty() {
            log::debug!("Sanitized columns {sanitized:?} of {}", row.original);
        }
        Shortener::new(self.settings).fit(row)
    }
}

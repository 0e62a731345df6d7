//! Command to report path statistics and violations of a tree.

use crate::error::CliError;
use crate::utils::{load_settings, print_report, resolve_path, GlobalOptions};
use clap::Args;
use pathfix::operations::inspect_tree;
use pathfix::path::resolve_tree_root;
use std::path::PathBuf;

/// Report path statistics and violations of a tree.
#[derive(Args)]
pub struct ScanCommand {
    /// Tree to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Measure against the budget left after the copy suffix is added,
    /// as `remediate` does for its source
    #[arg(long)]
    pub as_source: bool,

    /// Exit with status 1 if any violation is found
    #[arg(long)]
    pub check: bool,
}

impl ScanCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, format) = load_settings(global)?;
        let root = resolve_tree_root(&resolve_path(&self.path)?)?;

        let limit = if self.as_source {
            settings
                .max_path_length
                .saturating_sub(settings.shortened_name_suffix.chars().count())
        } else {
            settings.max_path_length
        };

        let report = inspect_tree(&root, &settings, limit)?;
        for issue in &report.issues {
            global.logger.warn(&issue.message);
        }

        if !global.quiet {
            let formatter = format.create_formatter();
            print_report(&formatter.format_tree(&report)?);
        }

        if self.check && !report.is_clean() {
            return Err(CliError::SemanticFailure(format!(
                "{} path(s) need fixing, {} could not be checked",
                report.violations.len(),
                report.issues.len()
            )));
        }
        Ok(())
    }
}

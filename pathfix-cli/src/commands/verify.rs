//! Command to check that a tree obeys the naming rules.

use crate::error::CliError;
use crate::utils::{load_settings, print_report, resolve_path, GlobalOptions};
use clap::Args;
use pathfix::operations::verify_tree;
use std::path::PathBuf;

/// Check that a tree obeys the naming rules.
#[derive(Args)]
pub struct VerifyCommand {
    /// Tree to verify, typically a remediated copy
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

impl VerifyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, format) = load_settings(global)?;
        let root = resolve_path(&self.path)?;

        let report = verify_tree(&root, &settings)?;

        if !global.quiet {
            let formatter = format.create_formatter();
            print_report(&formatter.format_tree(&report)?);
        }
        global.logger.info(&format!(
            "{} paths within {} characters",
            report.stats.total_paths, settings.max_path_length
        ));
        Ok(())
    }
}

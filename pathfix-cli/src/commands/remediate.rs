//! Command to copy a tree and fix every path in the copy.

use crate::error::CliError;
use crate::utils::{load_settings, print_report, resolve_path, shorten_path, GlobalOptions};
use clap::Args;
use pathfix::operations::{remediate, Outcome, RemediateOptions};
use std::path::PathBuf;

/// Copy a tree beside itself and fix every path in the copy.
#[derive(Args)]
pub struct RemediateCommand {
    /// Tree to remediate (left untouched)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Plan the renames on the source without copying anything
    #[arg(long)]
    pub dry_run: bool,
}

impl RemediateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, format) = load_settings(global)?;
        let source = resolve_path(&self.source)?;

        let options = RemediateOptions::new().with_dry_run(self.dry_run);
        let report = remediate(&source, &settings, &options)?;

        if let Some(ref copy) = report.copy {
            for link in &copy.broken_symlinks {
                global.logger.warn(&format!(
                    "Broken symbolic link {} replaced by a placeholder ({})",
                    link.source.display(),
                    link.error
                ));
            }
        }
        for warning in &report.plan.warnings {
            global.logger.info(warning);
        }

        if global.quiet {
            if report.outcome == Outcome::Remediated {
                println!("{}", report.destination.display());
            }
            return Ok(());
        }

        let formatter = format.create_formatter();
        print_report(&formatter.format_remediation(&report)?);

        if report.outcome == Outcome::Remediated {
            global.logger.info(&format!(
                "Remediated copy written to {}",
                shorten_path(&report.destination)
            ));
        }
        Ok(())
    }
}

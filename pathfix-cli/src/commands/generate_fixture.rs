//! Command to generate a synthetic tree full of violations.

use crate::error::CliError;
use crate::utils::{load_settings, resolve_path, GlobalOptions};
use clap::Args;
use pathfix::fixture::{FixtureGenerator, FixtureOptions};
use std::path::PathBuf;

/// Generate a synthetic tree full of violations.
#[derive(Args)]
pub struct GenerateFixtureCommand {
    /// Directory to create (must not exist)
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of top-level folders
    #[arg(long, default_value_t = 1)]
    pub folders: usize,

    /// Files in every folder
    #[arg(long, default_value_t = 3)]
    pub files: usize,

    /// Empty directories in every folder
    #[arg(long, default_value_t = 2)]
    pub empty_dirs: usize,

    /// Words in every generated name
    #[arg(long, default_value_t = 5)]
    pub words: usize,

    /// Nesting depth below every top-level folder
    #[arg(long, default_value_t = 8)]
    pub depth: usize,

    /// Seed for the word selection
    #[arg(long, default_value_t = 0)]
    pub seed: usize,

    /// Do not create symbolic links
    #[arg(long)]
    pub no_symlinks: bool,

    /// Add one symbolic link whose target does not exist
    #[arg(long)]
    pub broken_symlink: bool,
}

impl GenerateFixtureCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (settings, _) = load_settings(global)?;
        let root = resolve_path(&self.dir)?;

        let options = FixtureOptions {
            folders: self.folders,
            files_per_folder: self.files,
            empty_dirs_per_folder: self.empty_dirs,
            words_per_name: self.words,
            depth: self.depth,
            seed: self.seed,
            symlinks: !self.no_symlinks,
            broken_symlink: self.broken_symlink,
        };
        let report = FixtureGenerator::new(options, &settings).generate(&root)?;

        if !global.quiet {
            println!(
                "Created {} ({} directories, {} files, {} symlinks)",
                report.root.display(),
                report.directories,
                report.files,
                report.symlinks
            );
        }
        Ok(())
    }
}

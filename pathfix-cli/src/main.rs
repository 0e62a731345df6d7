//! Main entry point for the pathfix CLI.
//!
//! Commands:
//! - `remediate`: Copy a tree and fix every path in the copy
//! - `scan`: Report statistics and violations of a tree
//! - `verify`: Check that a tree obeys the naming rules
//! - `validate`: Validate a configuration file
//! - `generate-fixture`: Generate a synthetic tree for testing
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = pathfix::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        logger,
        config: cli.config,
        max_path_length: cli.max_path_length,
        hash_length: cli.hash_length,
        illegal_characters: cli.illegal_characters,
        suffix: cli.suffix,
        format: cli.format.map(Into::into),
    };

    let result = match cli.command {
        cli::Command::Remediate(cmd) => cmd.execute(&global),
        cli::Command::Scan(cmd) => cmd.execute(&global),
        cli::Command::Verify(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::GenerateFixture(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

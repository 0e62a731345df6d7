//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, GenerateFixtureCommand, RemediateCommand, ScanCommand, ValidateCommand,
    VerifyCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use pathfix::OutputFormat;
use std::path::PathBuf;

/// Make directory trees portable to systems with stricter path rules.
#[derive(Parser)]
#[command(name = "pathfix")]
#[command(
    version,
    about = "Rewrite directory trees to satisfy path length and naming limits",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of discovering it
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Maximum path length, counted from the tree root's own name
    #[arg(long, value_name = "CHARS", global = true)]
    pub max_path_length: Option<usize>,

    /// Number of hex characters in the disambiguation hash
    #[arg(long, value_name = "N", global = true)]
    pub hash_length: Option<usize>,

    /// Characters forbidden in path segments
    #[arg(long, value_name = "CHARS", global = true)]
    pub illegal_characters: Option<String>,

    /// Suffix appended to the source directory name to form the copy
    #[arg(long, value_name = "SUFFIX", global = true)]
    pub suffix: Option<String>,

    /// Report format
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Copy a tree beside itself and fix every path in the copy
    Remediate(RemediateCommand),

    /// Report path statistics and violations of a tree
    Scan(ScanCommand),

    /// Check that a tree obeys the naming rules
    Verify(VerifyCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate a synthetic tree full of violations
    GenerateFixture(GenerateFixtureCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

/// Report format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Aligned plain text
    Human,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Human => Self::Human,
            FormatArg::Json => Self::Json,
        }
    }
}

//! Build script for pathfix-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("pathfix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite directory trees to satisfy path length and naming limits")
        .long_about(
            "Copy a directory tree beside itself and rename entries in the copy so that \
             every path fits a length budget, no name contains a forbidden character, \
             and no symbolic link remains. Renamed entries get a namefile recording \
             their original name.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file instead of discovering it")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("max-path-length")
                .long("max-path-length")
                .help("Maximum path length, counted from the tree root's own name")
                .value_name("CHARS")
                .global(true),
        )
        .arg(
            Arg::new("hash-length")
                .long("hash-length")
                .help("Number of hex characters in the disambiguation hash")
                .value_name("N")
                .global(true),
        )
        .arg(
            Arg::new("illegal-characters")
                .long("illegal-characters")
                .help("Characters forbidden in path segments")
                .value_name("CHARS")
                .global(true),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .help("Suffix appended to the source directory name to form the copy")
                .value_name("SUFFIX")
                .global(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Report format")
                .value_parser(["human", "json"])
                .global(true),
        )
        .subcommands(vec![
            Command::new("remediate")
                .about("Copy a tree beside itself and fix every path in the copy")
                .long_about(
                    "Copy SOURCE to a sibling directory named with the configured suffix, \
                     then sanitize and shorten names in the copy until every path fits",
                ),
            Command::new("scan")
                .about("Report path statistics and violations of a tree")
                .long_about("List every path that is too long, is a symlink, or has forbidden characters"),
            Command::new("verify")
                .about("Check that a tree obeys the naming rules")
                .long_about("Fail if any path of the tree still violates the naming rules"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a pathfix configuration file for errors"),
            Command::new("generate-fixture")
                .about("Generate a synthetic tree full of violations")
                .long_about("Create a deterministic tree with long names, forbidden characters and symlinks"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("pathfix.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}

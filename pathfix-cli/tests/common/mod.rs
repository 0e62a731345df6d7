//! Common test utilities for CLI integration tests.
//!
//! Every command runs with the working directory and `HOME` pointed into a
//! temporary directory and all `PATHFIX_*` variables cleared, so no real
//! configuration file or environment leaks into a test.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PATHFIX_VARS: [&str; 8] = [
    "PATHFIX_MAX_PATH_LENGTH",
    "PATHFIX_OS_PATH_LIMIT",
    "PATHFIX_RESERVED_PREFIX_LENGTH",
    "PATHFIX_ILLEGAL_CHARACTERS",
    "PATHFIX_HASH_LENGTH",
    "PATHFIX_SHORTENED_NAME_SUFFIX",
    "PATHFIX_OUTPUT_FORMAT",
    "PATHFIX_LOG_MODE",
];

/// Isolated test environment.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        fs::create_dir_all(temp_path.join("home")).expect("Failed to create home");
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// A `pathfix` command isolated from the real environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathfix").expect("Failed to find pathfix binary");
        cmd.current_dir(&self.temp_path)
            .env("HOME", self.temp_path.join("home"));
        for var in PATHFIX_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create `relative` as a file with `contents`, creating parents.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Create `relative` as a directory.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }
}

/// Parse the JSON written to stdout.
#[allow(dead_code)]
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is not valid JSON")
}

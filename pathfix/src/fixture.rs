//! Deterministic synthetic trees for exercising the engine.
//!
//! A fixture nests `folders` directories per level, `depth` levels deep. Each
//! folder holds files with long multi-word names, some empty directories, and
//! (on Unix) a relative symlink to its last file. Every odd file and empty
//! directory carries one to three forbidden characters. The same options
//! always produce the same tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Settings;
use crate::error::{Error, Result};

const WORDS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi",
    "psi", "omega", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "bright", "sun",
    "shines", "high", "sky", "blue", "ocean", "waves", "crash", "shore", "green", "forest",
    "trees", "whisper", "wind",
];

/// Shape of a generated tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOptions {
    /// Directories created per level.
    pub folders: usize,
    /// Files per directory.
    pub files_per_folder: usize,
    /// Empty directories per directory.
    pub empty_dirs_per_folder: usize,
    /// Words joined with `_` to form each name.
    pub words_per_name: usize,
    /// Nesting depth.
    pub depth: usize,
    /// Shifts word selection so different seeds give different names.
    pub seed: usize,
    /// Create one symlink per directory (Unix only).
    pub symlinks: bool,
    /// Also create one dangling symlink at the top (Unix only).
    pub broken_symlink: bool,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            folders: 1,
            files_per_folder: 3,
            empty_dirs_per_folder: 2,
            words_per_name: 5,
            depth: 8,
            seed: 0,
            symlinks: true,
            broken_symlink: false,
        }
    }
}

/// What a generator run created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixtureReport {
    /// The generated root.
    pub root: PathBuf,
    /// Directories created, root excluded.
    pub directories: usize,
    /// Regular files created.
    pub files: usize,
    /// Symlinks created, dangling ones included.
    pub symlinks: usize,
}

/// Generates fixture trees.
///
/// # Examples
///
/// ```
/// use pathfix::config::Settings;
/// use pathfix::fixture::{FixtureGenerator, FixtureOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let options = FixtureOptions { depth: 2, symlinks: false, ..FixtureOptions::default() };
/// let report = FixtureGenerator::new(options, &Settings::default())
///     .generate(&dir.path().join("fixture"))
///     .unwrap();
/// assert_eq!(report.files, 6);
/// ```
#[derive(Debug)]
pub struct FixtureGenerator {
    options: FixtureOptions,
    illegal: Vec<char>,
    counter: usize,
}

impl FixtureGenerator {
    /// Create a generator drawing forbidden characters from `settings`.
    #[must_use]
    pub fn new(options: FixtureOptions, settings: &Settings) -> Self {
        Self {
            options,
            illegal: settings.illegal_characters.iter().copied().collect(),
            counter: 0,
        }
    }

    /// Generate a tree at `root`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationExists`] if `root` exists, or an I/O error.
    pub fn generate(mut self, root: &Path) -> Result<FixtureReport> {
        if root.symlink_metadata().is_ok() {
            return Err(Error::DestinationExists {
                path: root.to_path_buf(),
            });
        }
        fs::create_dir_all(root).map_err(|e| Error::path_io(root, e))?;

        let mut report = FixtureReport {
            root: root.to_path_buf(),
            ..FixtureReport::default()
        };
        self.populate(root, 1, &mut report)?;

        if self.options.broken_symlink {
            let link = root.join("dangling_symlink.txt");
            if make_symlink(Path::new("missing_target.txt"), &link)? {
                report.symlinks += 1;
            }
        }

        log::info!(
            "Generated fixture {}: {} directories, {} files, {} symlinks",
            root.display(),
            report.directories,
            report.files,
            report.symlinks
        );
        Ok(report)
    }

    fn populate(&mut self, dir: &Path, depth: usize, report: &mut FixtureReport) -> Result<()> {
        if depth > self.options.depth {
            return Ok(());
        }

        for _ in 0..self.options.folders {
            let folder = dir.join(self.name());
            fs::create_dir_all(&folder).map_err(|e| Error::path_io(&folder, e))?;
            report.directories += 1;

            let mut last_file = None;
            for i in 0..self.options.files_per_folder {
                let mut stem = self.name();
                if i % 2 == 1 {
                    stem.push_str(&self.illegal_run(1));
                }
                let file = folder.join(format!("{stem}.txt"));
                fs::write(&file, "This is a test file.\n").map_err(|e| Error::path_io(&file, e))?;
                report.files += 1;
                last_file = Some(stem);
            }

            for i in 0..self.options.empty_dirs_per_folder {
                let mut name = self.name();
                if i % 2 == 1 {
                    name.push_str(&self.illegal_run(1));
                }
                let empty = folder.join(name);
                fs::create_dir_all(&empty).map_err(|e| Error::path_io(&empty, e))?;
                report.directories += 1;
            }

            if let (true, Some(stem)) = (self.options.symlinks, last_file) {
                let extra = self.illegal_run(0);
                let link = folder.join(format!("{stem}{extra}_symlink.txt"));
                if make_symlink(Path::new(&format!("{stem}.txt")), &link)? {
                    report.symlinks += 1;
                }
            }

            self.populate(&folder, depth + 1, report)?;
        }
        Ok(())
    }

    fn next(&mut self) -> usize {
        let value = self.counter.wrapping_mul(7).wrapping_add(self.options.seed);
        self.counter += 1;
        value
    }

    fn name(&mut self) -> String {
        let mut words = Vec::with_capacity(self.options.words_per_name.max(1));
        for _ in 0..self.options.words_per_name.max(1) {
            let index = self.next() % WORDS.len();
            words.push(WORDS[index]);
        }
        words.join("_")
    }

    /// One to three (or zero to three when `min` is 0) forbidden characters.
    fn illegal_run(&mut self, min: usize) -> String {
        if self.illegal.is_empty() {
            return String::new();
        }
        let count = min + self.next() % (4 - min);
        (0..count)
            .map(|_| {
                let index = self.next() % self.illegal.len();
                self.illegal[index]
            })
            .collect()
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> Result<bool> {
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::path_io(link, e))?;
    Ok(true)
}

#[cfg(not(unix))]
fn make_symlink(_target: &Path, link: &Path) -> Result<bool> {
    log::warn!("Symlinks are not generated on this platform: {}", link.display());
    Ok(false)
}

#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathfix
//!
//! A library for making directory trees portable to systems with stricter
//! path rules.
//!
//! Given a source tree, pathfix produces a sibling copy in which every path
//! fits a length budget, no segment contains a forbidden character, and no
//! symbolic link remains. Renamed entities get a namefile recording their
//! original name. The source tree is never modified.
//!
//! ## Core Types
//!
//! - [`Settings`]: The resolved rules a run enforces
//! - [`PathColumns`]: A path as a sequence of segments
//! - [`remediate`] and [`RemediationReport`]: End-to-end remediation
//! - [`PlanExecutor`] and [`RemediationPlan`]: The rename engine
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathfix::{remediate, Outcome, RemediateOptions, Settings};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let src = dir.path().join("photos");
//! std::fs::create_dir(&src).unwrap();
//! std::fs::write(src.join("trip: day 1?.jpg"), "").unwrap();
//!
//! let settings = Settings::default();
//! let report = remediate(&src, &settings, &RemediateOptions::new()).unwrap();
//! assert_eq!(report.outcome, Outcome::Remediated);
//!
//! let copy = dir.path().join("photos_shortened");
//! assert!(copy.join("trip_ day 1_.jpg").is_file());
//! assert_eq!(
//!     std::fs::read_to_string(copy.join("trip_ day 1_.origname.txt")).unwrap(),
//!     "trip: day 1?.jpg\n"
//! );
//! ```

pub mod classify;
pub mod config;
pub mod copy;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod namefile;
pub mod operations;
pub mod output;
pub mod path;
pub mod sanitize;
pub mod scan;
pub mod shorten;
pub mod table;

// Re-export key types at crate root for convenience
pub use classify::{classify, PathStats, Violation, ViolationKinds, ViolationSet};
pub use config::{Config, ConfigBuilder, OutputFormat, Settings};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    inspect_source, inspect_tree, remediate, remediate_in_place, verify_tree, Outcome, PlanAction,
    PlanExecutor, RemediateOptions, RemediationPlan, RemediationReport, TreeReport,
};
pub use path::{EntityKind, PathColumns};

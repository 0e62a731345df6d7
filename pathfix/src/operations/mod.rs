//! Remediation operations using the plan-execute pattern.
//!
//! A run is split into two phases per pending path:
//! 1. **Planning**: sanitize and shorten the path's target in memory
//! 2. **Execution**: commit each changed segment on disk and propagate it
//!
//! A dry run executes the same planning against the source tree and records
//! the actions without performing them.
//!
//! # Examples
//!
//! ```
//! use pathfix::config::Settings;
//! use pathfix::operations::{remediate, Outcome, RemediateOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let src = dir.path().join("tree");
//! std::fs::create_dir(&src).unwrap();
//! std::fs::write(src.join("what?.txt"), "").unwrap();
//!
//! let options = RemediateOptions::new().with_dry_run(true);
//! let report = remediate(&src, &Settings::default(), &options).unwrap();
//! assert_eq!(report.outcome, Outcome::DryRun);
//! for action in &report.plan.actions {
//!     println!("{}", action.description());
//! }
//! ```

pub mod executor;
pub mod plan;
pub mod remediate;
pub mod verify;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use executor::PlanExecutor;
pub use plan::{PlanAction, RemediationPlan, RowPlanner};
pub use remediate::{
    remediate, remediate_in_place, InPlaceReport, Outcome, RemediateOptions, RemediationReport,
};
pub use verify::{inspect_source, inspect_tree, verify_tree, TreeReport};

//! CLI command implementations.
//!
//! - `remediate`: Copy a tree beside itself and fix every path in the copy
//! - `scan`: Report statistics and violations of a tree
//! - `verify`: Check that a tree obeys the naming rules
//! - `validate`: Validate a configuration file
//! - `generate_fixture`: Generate a synthetic tree full of violations
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod generate_fixture;
pub mod remediate;
pub mod scan;
pub mod validate;
pub mod verify;

pub use completions::CompletionsCommand;
pub use generate_fixture::GenerateFixtureCommand;
pub use remediate::RemediateCommand;
pub use scan::ScanCommand;
pub use validate::ValidateCommand;
pub use verify::VerifyCommand;

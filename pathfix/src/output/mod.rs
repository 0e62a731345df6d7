//! Report formatting.
//!
//! Reports are rendered either as aligned plain text for people or as
//! pretty-printed JSON for tools.

mod formatters;

use crate::config::OutputFormat;
use crate::operations::{RemediationReport, TreeReport};
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter};

/// Trait for rendering reports into an output format.
pub trait OutputFormatter {
    /// Render the statistics and violations of one tree.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_tree(&self, report: &TreeReport) -> Result<String>;

    /// Render the outcome of a remediation run.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_remediation(&self, report: &RemediationReport) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfix::config::OutputFormat;
    ///
    /// let _formatter = OutputFormat::Json.create_formatter();
    /// ```
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

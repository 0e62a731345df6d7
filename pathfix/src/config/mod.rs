//! Configuration system for pathfix.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (user config and project `pathfix.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation and resolution into concrete [`Settings`]
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`PATHFIX_*`)
//! 3. Project config (nearest `pathfix.yaml`), or an explicit config file
//! 4. User config (`~/.pathfix/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use pathfix::config::{Config, ConfigBuilder};
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(Config { max_path_length: Some(120), ..Default::default() })
//!     .build()
//!     .unwrap();
//!
//! let settings = config.resolve().unwrap();
//! assert_eq!(settings.max_path_length, 120);
//! assert_eq!(settings.shortened_name_suffix, "_shortened");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, Settings};
pub use validator::ConfigValidator;

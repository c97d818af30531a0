//! Configuration for fixgen
//!
//! This crate handles parsing and validation of `fixgen.toml`, and layers it
//! between the built-in defaults and command line overrides.

pub mod merge;
pub mod toml;

// Re-export main types
pub use merge::{CliOverrides, ConfigLayering, ConfigLoader, ConfigSource};
pub use toml::{FixgenToml, RepodataSection, ScaffoldSection};

use fixgen_core::FixtureError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, FixtureError>;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "fixgen.toml";

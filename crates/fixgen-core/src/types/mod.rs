//! Core data types for fixture generation.
//!
//! - Version numbers and comparison operators
//! - Dependency constraints
//! - Package records and the package table
//! - Project descriptions for scaffolding

pub mod dependency;
pub mod package;
pub mod project;
pub mod version;

// Re-export all public types
pub use dependency::{is_valid_name, Constraint, Dependency};
pub use package::{PackageKey, PackageRecord, PackageTable};
pub use project::ProjectSpec;
pub use version::{Op, Version, VersionError};

//! # fixgen-core
//!
//! Core types shared across all fixgen crates.
//!
//! This crate provides:
//! - `Version` and `Dependency` constraint types
//! - `PackageRecord` and the insertion-ordered `PackageTable`
//! - The two built-in fixture datasets
//! - Name-level dependency cycle analysis
//! - `FixtureError` for unified error handling
//!
//! ## Architecture
//!
//! - `types`: Core data types (Version, Dependency, PackageRecord, PackageTable)
//! - `datasets`: Literal fixture data fed into the emitters
//! - `graph`: Cycle detection over the package table
//! - `error`: Error types and result aliases
//! - `utils`: Path helpers for writing fixtures under a root directory

pub mod datasets;
pub mod error;
pub mod graph;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{FixResult, FixtureError};
pub use types::{
    Dependency, Op, PackageKey, PackageRecord, PackageTable, ProjectSpec, Version, VersionError,
};

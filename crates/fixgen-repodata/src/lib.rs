//! Conda repository index generation for fixgen
//!
//! Turns a `PackageTable` into a single `repodata.json` style document and
//! reads such documents back for verification.

pub mod document;
pub mod verify;

// Re-export main types
pub use document::{read_repodata, write_repodata, RecordTemplate, RepoData, RepoInfo, RepoRecord};
pub use verify::{verify, Inconsistency};

use fixgen_core::FixtureError;

/// Result type for repodata operations
pub type RepodataResult<T> = Result<T, FixtureError>;

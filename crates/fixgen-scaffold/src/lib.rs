//! Python project scaffolding for fixgen
//!
//! Each `ProjectSpec` becomes a directory holding a `setup.py` and a package
//! with a single placeholder module. After a project is written, an
//! `Uploader` builds and publishes it to a local package index.
//!
//! All paths are derived from an explicit root; the process working
//! directory is never changed.

pub mod project;
pub mod setup_py;
pub mod upload;

// Re-export main types
pub use project::{scaffold_project, ScaffoldReport, Scaffolder, RunSummary};
pub use setup_py::render_setup_py;
pub use upload::{CommandUploader, NoopUploader, Uploader};

use fixgen_core::FixtureError;

/// Result type for scaffolding operations
pub type ScaffoldResult<T> = Result<T, FixtureError>;

//! Project directory layout and the scaffolding run.

use crate::setup_py::{render_setup_py, MODULE_PY};
use crate::upload::Uploader;
use crate::ScaffoldResult;
use fixgen_core::utils::safe_join;
use fixgen_core::{FixtureError, ProjectSpec};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of laying out a single project
#[derive(Debug)]
pub struct ScaffoldReport {
    pub folder: String,
    pub project_dir: PathBuf,
    /// Filesystem errors that were logged and skipped
    pub errors: Vec<FixtureError>,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ScaffoldReport>,
    pub uploaded: usize,
}

/// Writes every project under `root` and hands each one to the uploader
pub struct Scaffolder {
    root: PathBuf,
    uploader: Box<dyn Uploader>,
}

impl ScaffoldReport {
    /// Returns true if every file was written
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

impl RunSummary {
    /// Number of projects laid out
    pub fn scaffolded(&self) -> usize {
        self.reports.len()
    }

    /// All filesystem errors across the run
    pub fn errors(&self) -> impl Iterator<Item = &FixtureError> {
        self.reports.iter().flat_map(|r| r.errors.iter())
    }
}

/// Lay out one project below `root`
///
/// ```text
/// <root>/<folder>/setup.py
/// <root>/<folder>/<name>/__init__.py
/// <root>/<folder>/<name>/module.py
/// ```
///
/// Directory and file errors are logged and collected in the report instead of
/// aborting; only a folder or package name that would escape `root` is an error.
pub fn scaffold_project(root: &Path, spec: &ProjectSpec) -> ScaffoldResult<ScaffoldReport> {
    let project_dir = safe_join(root, &spec.folder)?;
    let package_dir = safe_join(&project_dir, &spec.name)?;

    let mut report = ScaffoldReport {
        folder: spec.folder.clone(),
        project_dir: project_dir.clone(),
        errors: Vec::new(),
    };

    create_folder(&project_dir, &mut report);
    generate_file(&project_dir.join("setup.py"), &render_setup_py(spec), &mut report);
    create_folder(&package_dir, &mut report);
    generate_file(&package_dir.join("__init__.py"), "", &mut report);
    generate_file(&package_dir.join("module.py"), MODULE_PY, &mut report);

    Ok(report)
}

fn create_folder(path: &Path, report: &mut ScaffoldReport) {
    if let Err(e) = fs::create_dir_all(path) {
        let error = FixtureError::io(format!("Failed to create directory: {}", path.display()), e);
        warn!("{}: {}", error, source_message(&error));
        report.errors.push(error);
    }
}

fn generate_file(path: &Path, content: &str, report: &mut ScaffoldReport) {
    if let Err(e) = fs::write(path, content) {
        let error = FixtureError::io(format!("Failed to write {}", path.display()), e);
        warn!("{}: {}", error, source_message(&error));
        report.errors.push(error);
    }
}

fn source_message(error: &FixtureError) -> String {
    std::error::Error::source(error)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

impl Scaffolder {
    /// Create a scaffolder writing below `root`
    pub fn new(root: impl Into<PathBuf>, uploader: Box<dyn Uploader>) -> Self {
        Self {
            root: root.into(),
            uploader,
        }
    }

    /// Output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scaffold and upload each project in order
    ///
    /// Filesystem errors are tolerated per project. An upload failure stops the
    /// run and no later project is touched.
    pub fn run(&self, projects: &[ProjectSpec]) -> ScaffoldResult<RunSummary> {
        let mut summary = RunSummary::default();
        info!(
            "Scaffolding {} projects in {} ({})",
            projects.len(),
            self.root.display(),
            self.uploader.describe()
        );

        for spec in projects {
            let report = scaffold_project(&self.root, spec)?;
            if !report.is_complete() {
                warn!("{} was only partially written", spec.folder);
            }

            self.uploader.upload(&report.project_dir, spec)?;
            summary.uploaded += 1;
            summary.reports.push(report);
        }

        Ok(summary)
    }
}

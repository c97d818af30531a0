//! Source project descriptions for the scaffolder.

use super::PackageRecord;
use serde::{Deserialize, Serialize};

/// One installable project to lay out on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Directory name under the scaffold root (e.g. `foo_v2`)
    pub folder: String,
    /// Distribution and import package name
    pub name: String,
    pub version: String,
    /// Requirement strings for `install_requires`, as written
    #[serde(default, rename = "depends")]
    pub dependencies: Vec<String>,
}

impl ProjectSpec {
    /// Build a project spec from literal strings
    pub fn new(folder: &str, name: &str, version: &str, dependencies: &[&str]) -> Self {
        Self {
            folder: folder.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Requirement strings as they should appear in `install_requires`
    pub fn requirements(&self) -> Vec<&str> {
        self.dependencies.iter().map(String::as_str).collect()
    }

    /// The package this project installs as
    pub fn to_record(&self) -> PackageRecord {
        PackageRecord {
            name: self.name.clone(),
            version: self.version.clone(),
            depends: self.dependencies.clone(),
        }
    }
}

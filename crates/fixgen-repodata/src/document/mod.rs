//! repodata.json document types

use crate::RepodataResult;
use fixgen_core::{FixtureError, PackageRecord, PackageTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};


/// File name suffix of a package archive
pub const ARCHIVE_SUFFIX: &str = ".tar.bz2";

/// Repository index document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoData {
    pub info: RepoInfo,
    /// Archive file name to package metadata
    pub packages: IndexMap<String, RepoRecord>,
    /// `.conda` archives, always empty in generated fixtures
    #[serde(rename = "packages.conda", default)]
    pub packages_conda: IndexMap<String, RepoRecord>,
    #[serde(default)]
    pub removed: Vec<String>,
    pub repodata_version: u32,
}

/// `info` section of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub subdir: String,
}

/// Metadata for a single package archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub build: String,
    pub build_number: u64,
    pub depends: Vec<String>,
    pub license: String,
    pub md5: String,
    pub name: String,
    pub noarch: String,
    pub sha256: String,
    pub size: u64,
    pub subdir: String,
    pub timestamp: u64,
    pub version: String,
}

/// Constant metadata attached to every generated record
///
/// The checksums and size describe no real archive; they only need to be
/// well formed for the index to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTemplate {
    pub build: String,
    pub build_number: u64,
    pub license: String,
    pub md5: String,
    pub noarch: String,
    pub sha256: String,
    pub size: u64,
    pub subdir: String,
    pub timestamp: u64,
}

impl Default for RecordTemplate {
    fn default() -> Self {
        Self {
            build: "0".to_string(),
            build_number: 0,
            license: "MIT".to_string(),
            md5: "01aec23216fa8f6731e5a1c7e07743cd".to_string(),
            noarch: "generic".to_string(),
            sha256: "b6298acc2a1a03b5df97c27eb6692e3145c3193141751ad7461492d211e9efd5"
                .to_string(),
            size: 5512,
            subdir: "noarch".to_string(),
            timestamp: 1711774913896,
        }
    }
}

impl RecordTemplate {
    /// Archive file name for a package, e.g. `foo-2.0-0.tar.bz2`
    pub fn file_name(&self, name: &str, version: &str) -> String {
        format!("{}-{}-{}{}", name, version, self.build, ARCHIVE_SUFFIX)
    }

    /// Fill in the template for one package record
    pub fn record(&self, package: &PackageRecord) -> RepoRecord {
        RepoRecord {
            build: self.build.clone(),
            build_number: self.build_number,
            depends: package.depends.clone(),
            license: self.license.clone(),
            md5: self.md5.clone(),
            name: package.name.clone(),
            noarch: self.noarch.clone(),
            sha256: self.sha256.clone(),
            size: self.size,
            subdir: self.subdir.clone(),
            timestamp: self.timestamp,
            version: package.version.clone(),
        }
    }
}

impl RepoData {
    /// Current repodata format version
    pub const DEFAULT_VERSION: u32 = 1;

    /// Build the index document for every record in the table
    ///
    /// Records whose file names collide overwrite earlier ones.
    pub fn from_table(table: &PackageTable, template: &RecordTemplate, repodata_version: u32) -> Self {
        let mut packages = IndexMap::with_capacity(table.len());

        for package in table {
            let key = template.file_name(&package.name, &package.version);
            if packages.insert(key.clone(), template.record(package)).is_some() {
                warn!("Duplicate package archive {}, keeping the last record", key);
            }
        }

        debug!("Built repodata with {} packages", packages.len());

        Self {
            info: RepoInfo {
                subdir: template.subdir.clone(),
            },
            packages,
            packages_conda: IndexMap::new(),
            removed: Vec::new(),
            repodata_version,
        }
    }

    /// Recover the package table from the index, fields copied as stored
    pub fn to_table(&self) -> PackageTable {
        self.packages
            .values()
            .map(|record| PackageRecord {
                name: record.name.clone(),
                version: record.version.clone(),
                depends: record.depends.clone(),
            })
            .collect()
    }

    /// Parse an index document from JSON
    pub fn from_json(content: &str) -> RepodataResult<Self> {
        serde_json::from_str(content).map_err(|e| FixtureError::JsonParse {
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// Serialize the index document to JSON
    pub fn to_json(&self, pretty: bool) -> RepodataResult<String> {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        result.map_err(|e| FixtureError::JsonParse {
            message: format!("JSON serialization error: {}", e),
        })
    }
}

/// Write the index document to `path`, replacing any existing file
pub fn write_repodata(document: &RepoData, path: &Path, pretty: bool) -> RepodataResult<()> {
    let content = document.to_json(pretty)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            FixtureError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    std::fs::write(path, content)
        .map_err(|e| FixtureError::io(format!("Failed to write {}", path.display()), e))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Read an index document from `path`
pub fn read_repodata(path: &Path) -> RepodataResult<RepoData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FixtureError::io(format!("Failed to read {}", path.display()), e))?;

    RepoData::from_json(&content).map_err(|e| match e {
        FixtureError::JsonParse { message } => FixtureError::JsonParse {
            message: format!("In file {}: {}", path.display(), message),
        },
        other => other,
    })
}

//! fixgen.toml configuration parsing and validation

use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use fixgen_core::types::is_valid_name;
use fixgen_core::utils::is_safe_path;
use fixgen_core::{FixtureError, PackageRecord, ProjectSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default repository index output file
pub const DEFAULT_OUTPUT: &str = "output.json";
/// Default interpreter used to build and upload projects
pub const DEFAULT_PYTHON: &str = "python";
/// Default package index name passed to `upload -r`
pub const DEFAULT_REPOSITORY: &str = "local";

/// Complete fixgen.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixgenToml {
    /// Repository index generation
    #[serde(default)]
    pub repodata: RepodataSection,

    /// Source project scaffolding
    #[serde(default)]
    pub scaffold: ScaffoldSection,
}

/// `[repodata]` section
///
/// Every metadata field is optional; unset fields keep the built-in record
/// template value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepodataSection {
    /// Output file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Utf8PathBuf>,

    /// Indent the JSON instead of writing it on a single line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Value of `info.subdir` and of each record's `subdir`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repodata_version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub noarch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,

    /// Custom dataset replacing the built-in one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageRecord>,
}

/// `[scaffold]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldSection {
    /// Directory the project folders are created in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Utf8PathBuf>,

    /// Interpreter used for `setup.py sdist upload`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Package index name passed to `upload -r`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Build and upload each project after writing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<bool>,

    /// Custom dataset replacing the built-in one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectSpec>,
}

impl RepodataSection {
    /// Output path, falling back to `output.json`
    pub fn output_path(&self) -> Utf8PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Whether to pretty-print the document (default false)
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }
}

impl ScaffoldSection {
    /// Scaffold root, falling back to the current directory
    pub fn root_dir(&self) -> Utf8PathBuf {
        self.root.clone().unwrap_or_else(|| Utf8PathBuf::from("."))
    }

    /// Interpreter, falling back to `python`
    pub fn python(&self) -> &str {
        self.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// Repository, falling back to `local`
    pub fn repository(&self) -> &str {
        self.repository.as_deref().unwrap_or(DEFAULT_REPOSITORY)
    }

    /// Whether uploading is enabled (default true)
    pub fn upload_enabled(&self) -> bool {
        self.upload.unwrap_or(true)
    }
}

/// Parse TOML string to FixgenToml configuration
pub fn parse_fixgen_toml(content: &str) -> ConfigResult<FixgenToml> {
    let config: FixgenToml = ::toml::from_str(content).map_err(|e| FixtureError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize FixgenToml to TOML string
pub fn serialize_fixgen_toml(config: &FixgenToml) -> ConfigResult<String> {
    ::toml::to_string_pretty(config).map_err(|e| FixtureError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

/// Validate configuration completeness
pub fn validate_config(config: &FixgenToml) -> ConfigResult<()> {
    let repodata = &config.repodata;

    if let Some(subdir) = &repodata.subdir {
        if subdir.trim().is_empty() {
            return Err(FixtureError::config("repodata.subdir", "must not be empty"));
        }
    }

    if let Some(build) = &repodata.build {
        if build.trim().is_empty() || build.contains(['/', '\\']) {
            return Err(FixtureError::config(
                "repodata.build",
                format!("'{}' cannot be used in a package file name", build),
            ));
        }
    }

    for record in &repodata.packages {
        if !is_valid_name(&record.name) {
            return Err(FixtureError::config(
                "repodata.packages.name",
                format!("invalid package name '{}'", record.name),
            ));
        }
    }

    let mut folders = HashSet::new();
    for project in &config.scaffold.projects {
        if !is_valid_name(&project.name) {
            return Err(FixtureError::config(
                "scaffold.projects.name",
                format!("invalid package name '{}'", project.name),
            ));
        }

        if !is_safe_path(Path::new(&project.folder)) {
            return Err(FixtureError::config(
                "scaffold.projects.folder",
                format!("'{}' must be a relative path below the scaffold root", project.folder),
            ));
        }

        if !folders.insert(project.folder.as_str()) {
            return Err(FixtureError::config(
                "scaffold.projects.folder",
                format!("folder '{}' is used by more than one project", project.folder),
            ));
        }
    }

    Ok(())
}

/// Load and parse fixgen.toml from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<FixgenToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FixtureError::io(format!("Failed to read {}", path), e))?;

    parse_fixgen_toml(&content).map_err(|e| match e {
        FixtureError::TomlParse { message } => FixtureError::TomlParse {
            message: format!("In file {}: {}", path, message),
        },
        FixtureError::ConfigValidation { field, reason } => FixtureError::ConfigValidation {
            field,
            reason: format!("in file {}: {}", path, reason),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_fixgen_toml("").unwrap();
        assert_eq!(config, FixgenToml::default());
        assert_eq!(config.repodata.output_path(), Utf8PathBuf::from("output.json"));
        assert!(!config.repodata.pretty());
        assert_eq!(config.scaffold.root_dir(), Utf8PathBuf::from("."));
        assert_eq!(config.scaffold.python(), "python");
        assert_eq!(config.scaffold.repository(), "local");
        assert!(config.scaffold.upload_enabled());
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[repodata]
output = "fixtures/repodata.json"
pretty = true
subdir = "linux-64"
license = "BSD-3-Clause"
timestamp = 1

[[repodata.packages]]
name = "foo"
version = "1.0"
depends = ["python"]

[[repodata.packages]]
name = "foo"
version = "2.0"
depends = ["python", "bar <2.0"]

[scaffold]
root = "pkgs"
python = "python3"
repository = "testpypi"
upload = false

[[scaffold.projects]]
folder = "foo_v2"
name = "foo"
version = "2.0"
depends = ["bar<2.0"]
"#;

        let config = parse_fixgen_toml(content).unwrap();
        assert_eq!(config.repodata.output_path(), Utf8PathBuf::from("fixtures/repodata.json"));
        assert!(config.repodata.pretty());
        assert_eq!(config.repodata.subdir.as_deref(), Some("linux-64"));
        assert_eq!(config.repodata.packages.len(), 2);
        assert_eq!(config.repodata.packages[1].depends, vec!["python", "bar <2.0"]);

        assert_eq!(config.scaffold.python(), "python3");
        assert_eq!(config.scaffold.repository(), "testpypi");
        assert!(!config.scaffold.upload_enabled());
        assert_eq!(config.scaffold.projects[0].requirements(), vec!["bar<2.0"]);
    }

    #[test]
    fn test_versions_and_depends_are_taken_as_written() {
        let content = r#"
[[repodata.packages]]
name = "foo"
version = "1.0rc1"
depends = ["python >=3.8,<4", "numpy 1.21.*", " bar <2.0 "]

[[scaffold.projects]]
folder = "foo"
name = "foo"
version = "1.0.post1"
depends = ["requests[socks]>=2,<3"]
"#;
        let config = parse_fixgen_toml(content).unwrap();
        let record = &config.repodata.packages[0];
        assert_eq!(record.version, "1.0rc1");
        assert_eq!(record.depends, vec!["python >=3.8,<4", "numpy 1.21.*", " bar <2.0 "]);
        assert_eq!(config.scaffold.projects[0].version, "1.0.post1");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(parse_fixgen_toml("[repodata]\nsubdirr = \"noarch\"\n").is_err());
    }

    #[test]
    fn test_empty_subdir_is_rejected() {
        let err = parse_fixgen_toml("[repodata]\nsubdir = \"\"\n").unwrap_err();
        assert!(matches!(err, FixtureError::ConfigValidation { field, .. } if field == "repodata.subdir"));
    }

    #[test]
    fn test_escaping_folder_is_rejected() {
        let content = r#"
[[scaffold.projects]]
folder = "../outside"
name = "foo"
version = "1.0"
"#;
        let err = parse_fixgen_toml(content).unwrap_err();
        assert!(
            matches!(err, FixtureError::ConfigValidation { field, .. } if field == "scaffold.projects.folder")
        );
    }

    #[test]
    fn test_duplicate_folder_is_rejected() {
        let content = r#"
[[scaffold.projects]]
folder = "foo"
name = "foo"
version = "1.0"

[[scaffold.projects]]
folder = "foo"
name = "foo"
version = "2.0"
"#;
        assert!(parse_fixgen_toml(content).is_err());
    }

    #[test]
    fn test_round_trip_serialization() {
        let mut config = FixgenToml::default();
        config.repodata.subdir = Some("noarch".to_string());
        config.repodata.packages =
            vec![PackageRecord::new("dumb", "1.0", &["python", "a <2.0"])];
        config.scaffold.upload = Some(false);

        let serialized = serialize_fixgen_toml(&config).unwrap();
        let parsed = parse_fixgen_toml(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[tokio::test]
    async fn test_load_from_file_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("fixgen.toml")).unwrap();
        tokio::fs::write(&path, "[repodata]\nsize = \"big\"\n").await.unwrap();

        let err = load_from_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("fixgen.toml"));
    }
}

//! Consistency checks for repodata documents
//!
//! A resolver reading the index trusts that an archive name like
//! `foo-2.0-0.tar.bz2` describes the record stored under it. These checks
//! catch hand-edited or truncated fixtures before a test run does.

use crate::document::{RepoData, ARCHIVE_SUFFIX};
use fixgen_core::{Dependency, Version};
use thiserror::Error;

/// A problem found in one package entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Inconsistency {
    #[error("{key}: not a '<name>-<version>-<build>.tar.bz2' file name")]
    MalformedKey { key: String },

    #[error("{key}: record name is '{name}'")]
    NameMismatch { key: String, name: String },

    #[error("{key}: record version is '{version}'")]
    VersionMismatch { key: String, version: String },

    #[error("{key}: record build is '{build}'")]
    BuildMismatch { key: String, build: String },

    #[error("{key}: version '{version}' cannot be ordered")]
    UnorderableVersion { key: String, version: String },

    #[error("{key}: dependency '{dependency}' has no readable bound")]
    UnreadableDependency { key: String, dependency: String },

    #[error("{key}: subdir '{subdir}' differs from index subdir '{expected}'")]
    SubdirMismatch {
        key: String,
        subdir: String,
        expected: String,
    },
}

impl Inconsistency {
    /// Returns true for entries a resolver may still load, such as version
    /// schemes this tool cannot order
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Inconsistency::UnorderableVersion { .. } | Inconsistency::UnreadableDependency { .. }
        )
    }
}

/// Split an archive file name into (name, version, build)
pub fn split_file_name(key: &str) -> Option<(&str, &str, &str)> {
    let stem = key.strip_suffix(ARCHIVE_SUFFIX)?;
    let mut parts = stem.rsplitn(3, '-');
    let build = parts.next()?;
    let version = parts.next()?;
    let name = parts.next()?;

    if name.is_empty() || version.is_empty() || build.is_empty() {
        return None;
    }
    Some((name, version, build))
}

/// Check every package entry, returning all problems found
pub fn verify(document: &RepoData) -> Vec<Inconsistency> {
    let mut problems = Vec::new();

    for (key, record) in document
        .packages
        .iter()
        .chain(document.packages_conda.iter())
    {
        let key_owned = || key.clone();

        match split_file_name(key) {
            Some((name, version, build)) => {
                if name != record.name {
                    problems.push(Inconsistency::NameMismatch {
                        key: key_owned(),
                        name: record.name.clone(),
                    });
                }
                if version != record.version {
                    problems.push(Inconsistency::VersionMismatch {
                        key: key_owned(),
                        version: record.version.clone(),
                    });
                }
                if build != record.build {
                    problems.push(Inconsistency::BuildMismatch {
                        key: key_owned(),
                        build: record.build.clone(),
                    });
                }
            }
            None => problems.push(Inconsistency::MalformedKey { key: key_owned() }),
        }

        if record.version.parse::<Version>().is_err() {
            problems.push(Inconsistency::UnorderableVersion {
                key: key_owned(),
                version: record.version.clone(),
            });
        }

        for dependency in &record.depends {
            if Dependency::parse(dependency).and_then(|d| d.constraint()).is_err() {
                problems.push(Inconsistency::UnreadableDependency {
                    key: key_owned(),
                    dependency: dependency.clone(),
                });
            }
        }

        if record.subdir != document.info.subdir {
            problems.push(Inconsistency::SubdirMismatch {
                key: key_owned(),
                subdir: record.subdir.clone(),
                expected: document.info.subdir.clone(),
            });
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RecordTemplate;
    use fixgen_core::datasets;

    fn builtin() -> RepoData {
        let table = datasets::repodata_table();
        RepoData::from_table(&table, &RecordTemplate::default(), 1)
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("foo-2.0-0.tar.bz2"), Some(("foo", "2.0", "0")));
        assert_eq!(
            split_file_name("my-pkg-1.0-py_0.tar.bz2"),
            Some(("my-pkg", "1.0", "py_0"))
        );
        assert_eq!(split_file_name("foo-2.0.tar.bz2"), None);
        assert_eq!(split_file_name("foo-2.0-0.conda"), None);
        assert_eq!(split_file_name("-2.0-0.tar.bz2"), None);
    }

    #[test]
    fn test_generated_document_is_consistent() {
        assert!(verify(&builtin()).is_empty());
    }

    #[test]
    fn test_detects_version_mismatch() {
        let mut document = builtin();
        document.packages.get_mut("foo-2.0-0.tar.bz2").unwrap().version = "3.0".to_string();

        let problems = verify(&document);
        assert_eq!(
            problems,
            vec![Inconsistency::VersionMismatch {
                key: "foo-2.0-0.tar.bz2".to_string(),
                version: "3.0".to_string(),
            }]
        );
        assert_eq!(problems[0].to_string(), "foo-2.0-0.tar.bz2: record version is '3.0'");
    }

    #[test]
    fn test_detects_malformed_key_and_bad_fields() {
        let mut document = builtin();
        let mut record = document.packages["bar-1.0-0.tar.bz2"].clone();
        record.version = "one".to_string();
        record.depends.push("baz ~1".to_string());
        record.subdir = "linux-64".to_string();
        document.packages.insert("bar.tar.bz2".to_string(), record);

        let problems = verify(&document);
        assert!(problems.contains(&Inconsistency::MalformedKey {
            key: "bar.tar.bz2".to_string()
        }));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Inconsistency::UnorderableVersion { version, .. } if version == "one")));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Inconsistency::UnreadableDependency { dependency, .. } if dependency == "baz ~1")));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Inconsistency::SubdirMismatch { subdir, .. } if subdir == "linux-64")));
    }

    #[test]
    fn test_unparsed_inputs_are_warnings() {
        let mut document = builtin();
        let record = document.packages.get_mut("foo-2.0-0.tar.bz2").unwrap();
        record.depends = vec![
            "python >=3.8,<4".to_string(),
            "numpy 1.21.*".to_string(),
            " bar <2.0 ".to_string(),
        ];
        let mut record = document.packages["bar-1.0-0.tar.bz2"].clone();
        record.version = "1.0rc1".to_string();
        document.packages.insert("bar-1.0rc1-0.tar.bz2".to_string(), record);

        let problems = verify(&document);
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().all(Inconsistency::is_warning));
        assert!(problems.contains(&Inconsistency::UnorderableVersion {
            key: "bar-1.0rc1-0.tar.bz2".to_string(),
            version: "1.0rc1".to_string(),
        }));
        assert!(!problems
            .iter()
            .any(|p| matches!(p, Inconsistency::UnreadableDependency { dependency, .. } if dependency == " bar <2.0 ")));

        let mismatch = Inconsistency::VersionMismatch {
            key: "foo-2.0-0.tar.bz2".to_string(),
            version: "3.0".to_string(),
        };
        assert!(!mismatch.is_warning());
    }
}

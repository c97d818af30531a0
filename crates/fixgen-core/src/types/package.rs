//! Package records and the table that holds a fixture dataset.
//!
//! Records keep `version` and `depends` exactly as given. Versions are only
//! parsed when two of them have to be ordered.

use super::{Dependency, Version, VersionError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub depends: Vec<String>,
}

/// (name, version) identity of a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageKey {
    pub name: String,
    pub version: String,
}

/// Insertion-ordered table of package records keyed by (name, version)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageTable {
    records: IndexMap<PackageKey, PackageRecord>,
}

impl PackageRecord {
    /// Build a record from literal strings
    pub fn new(name: impl Into<String>, version: impl Into<String>, depends: &[&str]) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            depends: depends.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Identity of this record in a table
    pub fn key(&self) -> PackageKey {
        PackageKey {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// The version as an orderable value
    pub fn parsed_version(&self) -> Result<Version, VersionError> {
        self.version.parse()
    }

    /// Dependencies whose package name can be read; other entries are skipped
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.depends.iter().filter_map(|d| Dependency::parse(d).ok())
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

impl PackageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced (last write wins)
    pub fn insert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.records.insert(record.key(), record)
    }

    /// Look up a record by name and version
    pub fn get(&self, name: &str, version: &str) -> Option<&PackageRecord> {
        self.records.get(&PackageKey {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.records.values()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct package names, in first-seen order
    pub fn names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Records known to satisfy a dependency
    ///
    /// Records whose version cannot be compared against the bound are left out.
    pub fn candidates(&self, dependency: &Dependency) -> Vec<&PackageRecord> {
        self.iter()
            .filter(|r| r.name == dependency.name && dependency.matches(&r.version) == Some(true))
            .collect()
    }

    /// Dependency names that point at no package in the table
    ///
    /// Names listed in `external` (such as `python`) are expected to come from
    /// outside the fixture and are not reported.
    pub fn unknown_dependencies(&self, external: &[&str]) -> BTreeSet<String> {
        self.iter()
            .flat_map(|r| r.dependencies())
            .filter(|d| !external.contains(&d.name.as_str()))
            .filter(|d| !self.iter().any(|r| r.name == d.name))
            .map(|d| d.name)
            .collect()
    }
}

impl FromIterator<PackageRecord> for PackageTable {
    fn from_iter<I: IntoIterator<Item = PackageRecord>>(iter: I) -> Self {
        let mut table = PackageTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

impl<'a> IntoIterator for &'a PackageTable {
    type Item = &'a PackageRecord;
    type IntoIter = indexmap::map::Values<'a, PackageKey, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, version: &str, deps: &[&str]) -> PackageRecord {
        PackageRecord::new(name, version, deps)
    }

    #[test]
    fn test_record_creation() {
        let pkg = record("foo", "2.0", &["python", "bar <2.0"]);
        assert_eq!(pkg.name, "foo");
        assert_eq!(pkg.version, "2.0");
        assert_eq!(pkg.depends, vec!["python", "bar <2.0"]);
        assert_eq!(pkg.key().to_string(), "foo 2.0");
        assert_eq!(pkg.parsed_version().unwrap().segments(), &[2, 0]);
    }

    #[test]
    fn test_inputs_are_not_validated() {
        let pkg = record("foo", "1.0rc1", &["python >=3.8,<4", "numpy 1.21.*", "<2.0"]);
        assert_eq!(pkg.version, "1.0rc1");
        assert!(pkg.parsed_version().is_err());
        assert_eq!(pkg.depends, vec!["python >=3.8,<4", "numpy 1.21.*", "<2.0"]);

        let names: Vec<String> = pkg.dependencies().map(|d| d.name).collect();
        assert_eq!(names, vec!["python", "numpy"]);
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let table: PackageTable = vec![
            record("foo", "1.0", &[]),
            record("bar", "1.0", &[]),
            record("foo", "2.0", &[]),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = table.iter().map(|r| r.key().to_string()).collect();
        assert_eq!(keys, vec!["foo 1.0", "bar 1.0", "foo 2.0"]);
        assert_eq!(table.names(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_duplicate_insert_overwrites() {
        let mut table = PackageTable::new();
        assert!(table.insert(record("foo", "1.0", &["python"])).is_none());
        table.insert(record("bar", "1.0", &[]));

        let replaced = table.insert(record("foo", "1.0", &["python", "bar"]));
        assert_eq!(replaced.unwrap().depends, vec!["python"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("foo", "1.0").unwrap().depends, vec!["python", "bar"]);
        assert_eq!(table.iter().next().unwrap().name, "foo");
    }

    #[test]
    fn test_candidates() {
        let table: PackageTable = vec![
            record("bar", "1.0", &[]),
            record("bar", "2.0", &[]),
            record("bar", "1.5rc1", &[]),
            record("baz", "1.0", &[]),
        ]
        .into_iter()
        .collect();

        let dep = Dependency::parse("bar <2.0").unwrap();
        let found: Vec<_> = table.candidates(&dep).iter().map(|r| r.key()).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].version, "1.0");

        let dep = Dependency::parse("bar").unwrap();
        assert_eq!(table.candidates(&dep).len(), 3);
    }

    #[test]
    fn test_unknown_dependencies() {
        let table: PackageTable = vec![
            record("foo", "1.0", &["python", "bar <2.0", "missing"]),
            record("bar", "1.0", &["python"]),
        ]
        .into_iter()
        .collect();

        let unknown = table.unknown_dependencies(&["python"]);
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["missing"]);
        assert!(table.unknown_dependencies(&["python", "missing"]).is_empty());
    }
}

//! Built-in fixture datasets.
//!
//! Each dataset encodes three small dependency cycles among the `2.0`
//! releases (`foo`/`bar`/`baz`, `qux`/`a`/`b`, `c`/`d`/`e`) plus a `dumb`
//! package that pulls in members of two cycles. The two datasets are separate
//! fixtures: the repodata one points `a`/`b` at each other in a different
//! order than the scaffold one, and `dumb` depends on different packages.

use crate::types::{PackageRecord, PackageTable, ProjectSpec};

/// (name, version, depends) triples of the repository index fixture
pub const REPODATA: &[(&str, &str, &[&str])] = &[
    ("foo", "1.0", &["python"]),
    ("foo", "2.0", &["python", "bar <2.0", "baz <2.0"]),
    ("bar", "1.0", &["python"]),
    ("bar", "2.0", &["python", "foo <2.0", "baz <2.0"]),
    ("baz", "1.0", &["python"]),
    ("baz", "2.0", &["python", "foo <2.0", "bar <2.0"]),
    ("qux", "1.0", &["python"]),
    ("qux", "2.0", &["python", "a <2.0", "b <2.0"]),
    ("a", "1.0", &["python"]),
    ("a", "2.0", &["python", "b <2.0", "qux <2.0"]),
    ("b", "1.0", &["python"]),
    ("b", "2.0", &["python", "a <2.0", "qux <2.0"]),
    ("c", "1.0", &["python"]),
    ("c", "2.0", &["python", "d <2.0", "e <2.0"]),
    ("d", "1.0", &["python"]),
    ("d", "2.0", &["python", "c <2.0", "e <2.0"]),
    ("e", "1.0", &["python"]),
    ("e", "2.0", &["python", "c <2.0", "d <2.0"]),
    ("dumb", "1.0", &["python", "a <2.0", "foo <2.0"]),
];

/// (folder, name, version, install_requires) tuples of the source project fixture
pub const SCAFFOLD: &[(&str, &str, &str, &[&str])] = &[
    ("foo_v1", "foo", "1.0", &[]),
    ("foo_v2", "foo", "2.0", &["bar<2.0", "baz<2.0"]),
    ("bar_v1", "bar", "1.0", &[]),
    ("bar_v2", "bar", "2.0", &["foo<2.0", "baz<2.0"]),
    ("baz_v1", "baz", "1.0", &[]),
    ("baz_v2", "baz", "2.0", &["foo<2.0", "bar<2.0"]),
    ("qux_v1", "qux", "1.0", &[]),
    ("qux_v2", "qux", "2.0", &["a<2.0", "b<2.0"]),
    ("a_v1", "a", "1.0", &[]),
    ("a_v2", "a", "2.0", &["qux<2.0", "b<2.0"]),
    ("b_v1", "b", "1.0", &[]),
    ("b_v2", "b", "2.0", &["qux<2.0", "a<2.0"]),
    ("c_v1", "c", "1.0", &[]),
    ("c_v2", "c", "2.0", &["d<2.0", "e<2.0"]),
    ("d_v1", "d", "1.0", &[]),
    ("d_v2", "d", "2.0", &["c<2.0", "e<2.0"]),
    ("e_v1", "e", "1.0", &[]),
    ("e_v2", "e", "2.0", &["c<2.0", "d<2.0"]),
    ("dumb", "dumb", "1.0", &["a<2.0", "e<2.0"]),
];

/// Packages that the repodata fixture depends on without defining
pub const EXTERNAL: &[&str] = &["python"];

/// Build the package table of the repository index fixture
pub fn repodata_table() -> PackageTable {
    REPODATA
        .iter()
        .map(|(name, version, depends)| PackageRecord::new(*name, *version, depends))
        .collect()
}

/// Build the project list of the source project fixture
pub fn scaffold_projects() -> Vec<ProjectSpec> {
    SCAFFOLD
        .iter()
        .map(|(folder, name, version, depends)| ProjectSpec::new(folder, name, version, depends))
        .collect()
}

/// Package table view of the source project fixture
pub fn scaffold_table() -> PackageTable {
    scaffold_projects().iter().map(ProjectSpec::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repodata_dataset_is_complete() {
        let table = repodata_table();
        assert_eq!(table.len(), REPODATA.len());
        assert_eq!(table.len(), 19);

        let foo = table.get("foo", "2.0").unwrap();
        assert_eq!(foo.depends, vec!["python", "bar <2.0", "baz <2.0"]);

        let dumb = table.get("dumb", "1.0").unwrap();
        assert_eq!(dumb.depends, vec!["python", "a <2.0", "foo <2.0"]);
    }

    #[test]
    fn test_repodata_dataset_only_leaves_python_external() {
        let table = repodata_table();
        assert!(table.unknown_dependencies(EXTERNAL).is_empty());
        assert_eq!(
            table.unknown_dependencies(&[]).into_iter().collect::<Vec<_>>(),
            vec!["python"]
        );
    }

    #[test]
    fn test_version_one_releases_satisfy_every_bound() {
        let table = repodata_table();
        for record in table.iter() {
            for dep in record.dependencies().filter(|d| d.name != "python") {
                let candidates = table.candidates(&dep);
                assert_eq!(candidates.len(), 1, "{} -> {}", record.key(), dep);
                assert_eq!(candidates[0].version, "1.0");
            }
        }
    }

    #[test]
    fn test_scaffold_dataset() {
        let projects = scaffold_projects();
        assert_eq!(projects.len(), 19);

        let dumb = projects.iter().find(|p| p.folder == "dumb").unwrap();
        assert_eq!(dumb.requirements(), vec!["a<2.0", "e<2.0"]);

        let without_deps = projects.iter().filter(|p| p.dependencies.is_empty()).count();
        assert_eq!(without_deps, 9);
    }

    #[test]
    fn test_datasets_stay_independent() {
        let repodata = repodata_table();
        let scaffold = scaffold_table();

        let dep_names = |table: &PackageTable| -> Vec<String> {
            let a = table.get("a", "2.0").unwrap();
            a.dependencies().map(|d| d.name).collect()
        };
        assert_eq!(dep_names(&repodata), vec!["python", "b", "qux"]);
        assert_eq!(dep_names(&scaffold), vec!["qux", "b"]);

        assert_ne!(
            repodata.get("dumb", "1.0").unwrap().depends,
            scaffold.get("dumb", "1.0").unwrap().depends
        );
    }
}

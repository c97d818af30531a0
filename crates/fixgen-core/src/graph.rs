//! Name-level dependency graph of a package table.
//!
//! Fixture datasets deliberately contain cycles between package names
//! (`foo 2.0 -> bar`, `bar 2.0 -> foo`). The version bounds make every cycle
//! breakable, which is exactly what a resolver under test has to discover.

use crate::types::PackageTable;
use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Directed graph with one node per package name
#[derive(Debug, Default)]
pub struct NameGraph {
    graph: DiGraph<String, ()>,
    nodes: IndexMap<String, NodeIndex>,
}

impl NameGraph {
    /// Build the graph, adding an edge `A -> B` when any version of `A` depends on `B`
    pub fn from_table(table: &PackageTable) -> Self {
        let mut graph = Self::default();
        for record in table {
            let from = graph.node(&record.name);
            for dependency in record.dependencies() {
                let to = graph.node(&dependency.name);
                if graph.graph.find_edge(from, to).is_none() {
                    graph.graph.add_edge(from, to, ());
                }
            }
        }
        graph
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.nodes.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), index);
        index
    }

    /// Number of distinct names, dependencies included
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Names `name` depends on directly
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        let Some(index) = self.nodes.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors(*index)
            .map(|n| self.graph[n].as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Strongly connected groups of more than one name, each sorted, ordered by first member
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut names: Vec<String> =
                    component.into_iter().map(|n| self.graph[n].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }
}

/// Dependency cycles between package names in a table
pub fn dependency_cycles(table: &PackageTable) -> Vec<Vec<String>> {
    NameGraph::from_table(table).cycles()
}

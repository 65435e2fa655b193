//! Dependency graph over source files
//!
//! Builds a directed graph from a computed closure and linearizes it into a
//! deterministic build order with cycle detection. Uses petgraph for graph
//! operations.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::closure::{resolve_direct, ScanCache};
use super::error::ResolveError;
use super::set::DependencySet;
use super::source::SourceFile;

/// A directed dependency graph over source files.
///
/// Edges point from a dependency to its dependent, so an edge `d -> f`
/// reads "d must appear before f". Node indices are assigned in insertion
/// order and drive tie-breaking during sorting. Cycles and self-loops are
/// representable here; they surface as errors from
/// [`DependencyGraph::build_order`].
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<SourceFile, ()>,
    node_map: HashMap<SourceFile, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph whose vertex set is exactly `closure`.
    ///
    /// Vertices are inserted in closure order in a first pass; edges are
    /// added in a second pass so every endpoint already exists. The same
    /// scan cache that fed closure computation serves the edge pass, so no
    /// file is read twice.
    pub fn from_closure(
        closure: &DependencySet<SourceFile>,
        root: &Path,
        cache: &mut ScanCache,
    ) -> Result<Self, ResolveError> {
        let mut graph = Self::new();

        for file in closure.iter() {
            graph.add_file(file.clone());
        }

        for file in closure.iter() {
            for dep in resolve_direct(file, root, cache)? {
                graph.add_dependency(file, &dep);
            }
        }

        Ok(graph)
    }

    /// Adds a file vertex; inserting the same file again is a no-op.
    pub fn add_file(&mut self, file: SourceFile) -> NodeIndex {
        match self.node_map.get(&file) {
            Some(idx) => *idx,
            None => {
                let idx = self.graph.add_node(file.clone());
                self.node_map.insert(file, idx);
                idx
            }
        }
    }

    /// Adds a dependency edge: `file` depends on `dependency`.
    ///
    /// The edge direction is dependency -> file. Endpoints not yet in the
    /// graph are inserted, which keeps the graph consistent when callers
    /// feed edges directly rather than through [`Self::from_closure`].
    pub fn add_dependency(&mut self, file: &SourceFile, dependency: &SourceFile) {
        let file_idx = self.add_file(file.clone());
        let dep_idx = self.add_file(dependency.clone());
        self.graph.add_edge(dep_idx, file_idx, ());
    }

    /// Returns the direct dependencies of a file.
    pub fn dependencies(&self, file: &SourceFile) -> Vec<SourceFile> {
        self.neighbors(file, Direction::Incoming)
    }

    /// Returns the direct dependents of a file (files that require it).
    pub fn dependents(&self, file: &SourceFile) -> Vec<SourceFile> {
        self.neighbors(file, Direction::Outgoing)
    }

    fn neighbors(&self, file: &SourceFile, dir: Direction) -> Vec<SourceFile> {
        let idx = match self.node_map.get(file) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors_directed(idx, dir)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect()
    }

    pub fn contains(&self, file: &SourceFile) -> bool {
        self.node_map.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterates all files in vertex-insertion order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.graph.node_weights()
    }

    /// Linearizes the graph into a build order: for every edge `d -> f`,
    /// `d` appears before `f`.
    ///
    /// Kahn's algorithm, always emitting the earliest-inserted ready
    /// vertex, so a given graph always yields the same order. Fails with a
    /// cycle error naming a file on the cycle when no valid order exists;
    /// a partial order is never returned.
    pub fn build_order(&self) -> Result<Vec<SourceFile>, ResolveError> {
        let mut indegree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|idx| indegree[idx.index()] == 0)
            .map(Reverse)
            .collect();

        let mut emitted = vec![false; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());

        while let Some(Reverse(idx)) = ready.pop() {
            emitted[idx.index()] = true;
            order.push(self.graph[idx].clone());

            // Parallel edges decrement once per edge, matching the count
            // above.
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                indegree[next.index()] -= 1;
                if indegree[next.index()] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(ResolveError::Cycle {
                file: self.find_cycle_member(&emitted).path().to_path_buf(),
            });
        }

        Ok(order)
    }

    /// Picks a vertex that lies on a cycle, given the set of vertices the
    /// sorter managed to emit.
    ///
    /// Every unemitted vertex has an unemitted predecessor, so walking
    /// backwards through unemitted vertices for `node_count` steps must end
    /// inside a cycle.
    fn find_cycle_member(&self, emitted: &[bool]) -> &SourceFile {
        let mut current = self
            .graph
            .node_indices()
            .find(|idx| !emitted[idx.index()])
            .unwrap_or_else(|| NodeIndex::new(0));

        for _ in 0..self.graph.node_count() {
            match self
                .graph
                .neighbors_directed(current, Direction::Incoming)
                .find(|prev| !emitted[prev.index()])
            {
                Some(prev) => current = prev,
                None => break,
            }
        }

        &self.graph[current]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_files(dir: &TempDir, names: &[&str]) -> Vec<SourceFile> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, "").unwrap();
                SourceFile::from_path(&path).unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert!(graph.build_order().unwrap().is_empty());
    }

    #[test]
    fn add_files_and_edges() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["a.js", "b.js"]);

        let mut graph = DependencyGraph::new();
        graph.add_file(files[0].clone());
        graph.add_file(files[1].clone());
        graph.add_dependency(&files[1], &files[0]);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.dependencies(&files[1]), vec![files[0].clone()]);
        assert_eq!(graph.dependents(&files[0]), vec![files[1].clone()]);
    }

    #[test]
    fn repeated_insertion_is_noop() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["a.js"]);

        let mut graph = DependencyGraph::new();
        let first = graph.add_file(files[0].clone());
        let second = graph.add_file(files[0].clone());

        assert_eq!(first, second);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn chain_sorts_dependency_first() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["a.js", "b.js", "c.js"]);

        let mut graph = DependencyGraph::new();
        for f in &files {
            graph.add_file(f.clone());
        }
        // b requires a, c requires b
        graph.add_dependency(&files[1], &files[0]);
        graph.add_dependency(&files[2], &files[1]);

        let order = graph.build_order().unwrap();
        assert_eq!(order, files);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["z.js", "m.js", "a.js"]);

        let mut graph = DependencyGraph::new();
        for f in &files {
            graph.add_file(f.clone());
        }

        // No edges at all: the order is exactly the insertion order.
        let order = graph.build_order().unwrap();
        assert_eq!(order, files);
    }

    #[test]
    fn cycle_is_an_error() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["x.js", "y.js"]);

        let mut graph = DependencyGraph::new();
        graph.add_dependency(&files[0], &files[1]);
        graph.add_dependency(&files[1], &files[0]);

        let err = graph.build_order().unwrap_err();
        match err {
            ResolveError::Cycle { file } => {
                assert!(file == files[0].path() || file == files[1].path());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn self_loop_is_an_error() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["loop.js"]);

        let mut graph = DependencyGraph::new();
        graph.add_dependency(&files[0], &files[0]);

        assert!(matches!(
            graph.build_order(),
            Err(ResolveError::Cycle { .. })
        ));
    }

    #[test]
    fn cycle_error_names_cycle_member() {
        let dir = TempDir::new().unwrap();
        let files = make_files(&dir, &["before.js", "x.js", "y.js", "after.js"]);

        let mut graph = DependencyGraph::new();
        for f in &files {
            graph.add_file(f.clone());
        }
        // x <-> y cycle, with after.js depending on y (stuck but off the
        // cycle) and before.js unconstrained.
        graph.add_dependency(&files[1], &files[2]);
        graph.add_dependency(&files[2], &files[1]);
        graph.add_dependency(&files[3], &files[2]);

        let err = graph.build_order().unwrap_err();
        match err {
            ResolveError::Cycle { file } => {
                assert!(file == files[1].path() || file == files[2].path());
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    proptest! {
        /// Any random DAG sorts into a full permutation that respects every
        /// edge, identically on repeated runs.
        #[test]
        fn build_order_respects_edges(
            raw_edges in proptest::collection::vec((0usize..8, 0usize..8), 0..24)
        ) {
            let dir = TempDir::new().unwrap();
            let names: Vec<String> = (0..8).map(|i| format!("f{i}.js")).collect();
            let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let files = make_files(&dir, &name_refs);

            // Orienting every edge from lower to higher index keeps the
            // graph acyclic.
            let edges: Vec<(usize, usize)> =
                raw_edges.into_iter().filter(|(d, f)| d < f).collect();

            let mut graph = DependencyGraph::new();
            for f in &files {
                graph.add_file(f.clone());
            }
            for (dep, dependent) in &edges {
                graph.add_dependency(&files[*dependent], &files[*dep]);
            }

            let order = graph.build_order().unwrap();
            prop_assert_eq!(order.len(), files.len());

            let pos: std::collections::HashMap<&SourceFile, usize> =
                order.iter().enumerate().map(|(i, f)| (f, i)).collect();
            for (dep, dependent) in &edges {
                prop_assert!(pos[&files[*dep]] < pos[&files[*dependent]]);
            }

            prop_assert_eq!(graph.build_order().unwrap(), order);
        }
    }
}

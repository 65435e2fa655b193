//! Dependency resolution pipeline
//!
//! Ties closure computation, graph construction, and topological sorting
//! into a single run against one dependency root.

use std::path::{Path, PathBuf};

use super::closure::{compute_closure, ScanCache};
use super::error::ResolveError;
use super::graph::DependencyGraph;
use super::set::DependencySet;
use super::source::SourceFile;

/// A single dependency-resolution run.
///
/// Owns the per-run scan cache; a fresh resolver sees the file system as it
/// is at call time, and nothing is carried over between resolvers.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    cache: ScanCache,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: ScanCache::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the complete build order for `seed`: closure expansion,
    /// graph construction, topological sort.
    pub fn resolve(&mut self, seed: &[SourceFile]) -> Result<Vec<SourceFile>, ResolveError> {
        let closure = compute_closure(seed, &self.root, &mut self.cache)?;
        let graph = DependencyGraph::from_closure(&closure, &self.root, &mut self.cache)?;
        graph.build_order()
    }

    /// Resolves a build order with explicit build-first overrides.
    ///
    /// `first` files are unioned into the seed ahead of everything else and
    /// always emitted at the front of the result in their given order, even
    /// when no edge forces it. When a dependency edge would place a first
    /// file later, the explicit list still wins; the sorted remainder
    /// follows unchanged.
    pub fn resolve_with_first(
        &mut self,
        first: &[SourceFile],
        seed: &[SourceFile],
    ) -> Result<Vec<SourceFile>, ResolveError> {
        let mut full_seed = Vec::with_capacity(first.len() + seed.len());
        full_seed.extend_from_slice(first);
        full_seed.extend_from_slice(seed);

        let sorted = self.resolve(&full_seed)?;

        let mut ordered: DependencySet<SourceFile> = first.iter().cloned().collect();
        ordered.extend(sorted);
        Ok(ordered.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> SourceFile {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        SourceFile::from_path(&path).unwrap()
    }

    #[test]
    fn chain_resolves_in_dependency_order() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", "");
        let b = write(&dir, "b.js", "// @requires a.js\n");
        let c = write(&dir, "c.js", "// @requires b.js\n");

        let mut resolver = Resolver::new(dir.path());
        let order = resolver.resolve(&[c.clone()]).unwrap();

        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.js", "");
        write(&dir, "b.js", "// @requires a.js\n");
        let c = write(&dir, "c.js", "// @requires b.js\n// @requires a.js\n");
        let d = write(&dir, "d.js", "// @requires a.js\n");

        let first = Resolver::new(dir.path()).resolve(&[c.clone(), d.clone()]).unwrap();
        let second = Resolver::new(dir.path()).resolve(&[c, d]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn cycle_surfaces_as_cycle_error() {
        let dir = TempDir::new().unwrap();
        let x = write(&dir, "x.js", "// @requires y.js\n");
        write(&dir, "y.js", "// @requires x.js\n");

        let mut resolver = Resolver::new(dir.path());
        let err = resolver.resolve(&[x]).unwrap_err();

        assert!(matches!(err, ResolveError::Cycle { .. }));
    }

    #[test]
    fn first_files_lead_the_order() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", "");
        let b = write(&dir, "b.js", "// @requires a.js\n");
        let z = write(&dir, "z.js", "");

        let mut resolver = Resolver::new(dir.path());
        let order = resolver.resolve_with_first(&[z.clone()], &[b.clone()]).unwrap();

        assert_eq!(order, vec![z, a, b]);
    }

    #[test]
    fn first_wins_over_edges() {
        let dir = TempDir::new().unwrap();
        let base = write(&dir, "base.js", "");
        // late.js depends on base.js, but is explicitly listed first.
        let late = write(&dir, "late.js", "// @requires base.js\n");

        let mut resolver = Resolver::new(dir.path());
        let order = resolver
            .resolve_with_first(&[late.clone()], &[base.clone()])
            .unwrap();

        assert_eq!(order, vec![late, base]);
    }

    #[test]
    fn duplicate_seed_entries_collapse() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.js", "");
        let b = write(&dir, "b.js", "// @requires a.js\n");

        let mut resolver = Resolver::new(dir.path());
        let order = resolver.resolve(&[b.clone(), b.clone(), a.clone()]).unwrap();

        assert_eq!(order, vec![a, b]);
    }
}

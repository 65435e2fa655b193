//! Transitive dependency closure
//!
//! Fixed-point expansion of a seed file set: scan every file in the working
//! set, resolve every declared token against the dependency root, and union
//! the results back in until no new file is discovered.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::ResolveError;
use super::scanner::scan_directives;
use super::set::DependencySet;
use super::source::SourceFile;

/// Memoizes each file's scanned token set within a single resolution run.
///
/// Closure computation revisits every file in the working set on every
/// iteration; the cache keeps those revisits from re-reading disk. Nothing
/// is shared across runs.
#[derive(Debug, Default)]
pub struct ScanCache {
    scanned: HashMap<SourceFile, DependencySet<String>>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dependency tokens declared by `file`, scanning it on
    /// first access.
    pub fn tokens(&mut self, file: &SourceFile) -> Result<&DependencySet<String>, ResolveError> {
        match self.scanned.entry(file.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let text =
                    fs::read_to_string(file.path()).map_err(|source| ResolveError::Resource {
                        path: file.path().to_path_buf(),
                        source,
                    })?;
                Ok(entry.insert(scan_directives(&text)))
            }
        }
    }
}

/// Resolves the direct dependencies of one file against the root.
///
/// Tokens are resolved in declaration order; the result may repeat a file
/// when two tokens spell the same path differently.
pub fn resolve_direct(
    file: &SourceFile,
    root: &Path,
    cache: &mut ScanCache,
) -> Result<Vec<SourceFile>, ResolveError> {
    let tokens = cache.tokens(file)?;
    let mut deps = Vec::with_capacity(tokens.len());
    for token in tokens.iter() {
        deps.push(SourceFile::resolve_token(root, token, file)?);
    }
    Ok(deps)
}

/// Computes the transitive dependency closure of `seed` under `root`.
///
/// Each round inserts every resolved dependency ahead of the previous
/// working set's members, so the closure's insertion order favors
/// dependencies first; the sorter later uses that order to break ties.
/// The loop stops when a round discovers no new file.
///
/// Termination is guaranteed for any input: the universe of resolvable
/// files is finite and the set only grows, so cyclic declarations simply
/// fold every member of the cycle into the closure.
pub fn compute_closure(
    seed: &[SourceFile],
    root: &Path,
    cache: &mut ScanCache,
) -> Result<DependencySet<SourceFile>, ResolveError> {
    let mut working: DependencySet<SourceFile> = seed.iter().cloned().collect();

    loop {
        let mut next = DependencySet::new();
        for file in working.iter() {
            next.extend(resolve_direct(file, root, cache)?);
        }
        for file in working.iter() {
            next.insert(file.clone());
        }

        // `next` is a superset of `working`, so equal sizes mean the fixed
        // point is reached.
        if next.len() == working.len() {
            return Ok(next);
        }
        working = next;
    }
}

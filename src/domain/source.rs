//! Canonical source file references

use std::fmt;
use std::path::{Path, PathBuf};

use super::error::ResolveError;

/// A reference to a source file, normalized to an absolute canonical path.
///
/// Two references to the same file compare equal regardless of how they
/// were constructed. This is the graph vertex key and the unit of set
/// membership throughout dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile(PathBuf);

impl SourceFile {
    /// Creates a reference from a direct path (a seed file or a manifest
    /// entry).
    ///
    /// Canonicalization requires the file to exist; a missing file is a
    /// resource error carrying the path as given.
    pub fn from_path(path: &Path) -> Result<Self, ResolveError> {
        let canonical = path
            .canonicalize()
            .map_err(|source| ResolveError::Resource {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self(canonical))
    }

    /// Resolves a dependency token declared by `declared_by` against the
    /// dependency root.
    ///
    /// A token that does not name an existing file under the root is a
    /// resolution error carrying the token and the declaring file.
    pub fn resolve_token(
        root: &Path,
        token: &str,
        declared_by: &SourceFile,
    ) -> Result<Self, ResolveError> {
        root.join(token)
            .canonicalize()
            .map(Self)
            .map_err(|_| ResolveError::Resolution {
                token: token.to_string(),
                declared_by: declared_by.path().to_path_buf(),
                root: root.to_path_buf(),
            })
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Renders the path relative to `root` when it lies under it, falling
    /// back to the absolute path otherwise.
    pub fn display_relative(&self, root: &Path) -> String {
        let base = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        match self.0.strip_prefix(&base) {
            Ok(rel) => rel.display().to_string(),
            Err(_) => self.0.display().to_string(),
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

//! Error types for dependency resolution

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised during a dependency-resolution run.
///
/// Every variant is fatal to the run; partially computed closures or graphs
/// are discarded, never returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A referenced file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A declared dependency token does not name an existing file under the
    /// dependency root.
    #[error("unresolved dependency '{token}' required by {}: no such file under {}", declared_by.display(), root.display())]
    Resolution {
        token: String,
        declared_by: PathBuf,
        root: PathBuf,
    },

    /// The dependency graph contains a cycle, so no build order exists.
    #[error("circular dependency detected involving {}", file.display())]
    Cycle { file: PathBuf },
}

//! Dependency resolution core
//!
//! Directive scanning, closure computation, graph construction, and
//! topological ordering. Knows nothing about manifests, configuration, or
//! bundle output; callers feed it seed files and a dependency root and get
//! back a deterministic build order.

mod closure;
mod error;
mod graph;
mod resolver;
mod scanner;
mod set;
mod source;

pub use closure::{compute_closure, resolve_direct, ScanCache};
pub use error::ResolveError;
pub use graph::DependencyGraph;
pub use resolver::Resolver;
pub use scanner::{scan_directives, REQUIRES_MARKER};
pub use set::DependencySet;
pub use source::SourceFile;

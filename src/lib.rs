//! Bundle CLI - manifest-driven source bundling
//!
//! `bundle` assembles source files into ordered JS/CSS bundles, honoring
//! per-file `@requires` declarations so that a file providing a capability
//! always precedes every file that requires it. The dependency-resolution
//! core lives in [`domain`]; [`project`] evaluates the manifest and config,
//! and [`bundle`] concatenates and writes the final output.

pub mod bundle;
pub mod cli;
pub mod domain;
pub mod project;

pub use domain::{DependencyGraph, DependencySet, ResolveError, Resolver, ScanCache, SourceFile};

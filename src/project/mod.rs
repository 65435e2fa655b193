//! Project configuration and manifest evaluation
//!
//! Turns external configuration into the inputs the resolution core
//! consumes: named file lists from the manifest, the dependency root, the
//! build-first overrides, and the bundle target paths. The manifest format
//! is deliberately a narrow surface; the core only ever sees ordered lists
//! of paths.

mod config;
mod manifest;

pub use config::{
    BundleConfig, DefaultFormat, FieldsConfig, GlobalConfig, LibConfig, ManifestConfig,
    OutputConfig,
};
pub use manifest::{Manifest, ManifestError};

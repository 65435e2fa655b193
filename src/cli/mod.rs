//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `build` | Resolve, concatenate and write the configured bundles |
//! | `order` | Print the dependency-ordered library file list |
//! | `scan`  | Print the dependency tokens declared by one file |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! bundle --verbose build
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod build;
mod order;
mod output;
mod scan;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};

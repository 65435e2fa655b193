//! Bundle assembly
//!
//! Consumes the ordered file list produced by dependency resolution:
//! concatenates file contents in order and writes bundle targets. Contents
//! are never inspected or rewritten; minification is out of scope.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::SourceFile;

/// Concatenates files in order, guaranteeing newline separation between
/// entries.
pub fn concat(files: &[SourceFile]) -> Result<String> {
    let mut data = String::new();
    for file in files {
        let text = fs::read_to_string(file.path())
            .with_context(|| format!("Failed to read source file: {}", file.path().display()))?;
        data.push_str(&text);
        if !text.ends_with('\n') {
            data.push('\n');
        }
    }
    Ok(data)
}

/// Writes a bundle to its target path, creating parent directories as
/// needed.
pub fn write_target(target: &Path, data: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(target, data)
        .with_context(|| format!("Failed to write bundle: {}", target.display()))
}

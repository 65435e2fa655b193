//! The `scan` command: show one file's declared dependency tokens.

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::{ScanCache, SourceFile};

pub fn run(file: &Path, output: &Output) -> Result<()> {
    let source = SourceFile::from_path(file)?;
    let mut cache = ScanCache::new();
    let tokens = cache.tokens(&source)?;

    if output.is_json() {
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        output.data(&tokens);
    } else if tokens.is_empty() {
        println!("No @requires directives in {}", file.display());
    } else {
        for token in tokens.iter() {
            println!("{}", token);
        }
    }

    Ok(())
}

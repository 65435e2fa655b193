//! The `order` command: print the resolved dependency order.

use std::path::Path;

use anyhow::{bail, Result};

use super::build;
use super::output::Output;
use crate::domain::SourceFile;
use crate::project::{BundleConfig, Manifest};

pub fn run(config_path: &Path, output: &Output) -> Result<()> {
    let config = BundleConfig::load(config_path)?;
    let manifest = Manifest::load(&config.manifest.path, config.manifest.root.as_deref())?;

    let Some(lib) = &config.lib else {
        bail!(
            "No [lib] section in {}: nothing to resolve",
            config_path.display()
        );
    };

    let ordered = build::resolve_lib_order(&config, &manifest, output)?;

    if output.is_json() {
        let paths: Vec<String> = ordered
            .iter()
            .map(|file| file.display_relative(&lib.base))
            .collect();
        output.data(&paths);
    } else {
        print!("{}", render_listing(&ordered, &lib.base));
    }

    Ok(())
}

/// Renders the ordered list as a bracket-enclosed, newline-delimited
/// sequence of quoted paths, relative to the dependency root.
fn render_listing(files: &[SourceFile], root: &Path) -> String {
    let mut listing = String::from("[\n");
    for file in files {
        listing.push_str("   \"");
        listing.push_str(&file.display_relative(root));
        listing.push_str("\"\n");
    }
    listing.push_str("]\n");
    listing
}

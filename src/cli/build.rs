//! The `build` command: the full manifest-to-bundle pipeline.
//!
//! Manifest evaluation seeds dependency resolution over the library tree;
//! the resolved order leads the Javascript bundle, followed by the
//! manifest's application files; CSS files are concatenated as listed.

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::bundle;
use crate::domain::{DependencySet, Resolver, SourceFile};
use crate::project::{BundleConfig, Manifest};

pub fn run(config_path: &Path, output: &Output) -> Result<()> {
    let config = BundleConfig::load(config_path)?;

    output.verbose_ctx(
        "build",
        &format!("Reading manifest: {}", config.manifest.path.display()),
    );
    let manifest = Manifest::load(&config.manifest.path, config.manifest.root.as_deref())?;

    let lib_files = resolve_lib_order(&config, &manifest, output)?;

    // Library order leads; the manifest's JS fields follow, with
    // order-preserving dedup across the two.
    let mut js_files: DependencySet<SourceFile> = DependencySet::new();
    js_files.extend(lib_files);
    for path in manifest.file_list(&config.fields.js)? {
        js_files.insert(SourceFile::from_path(&path)?);
    }
    let js_files = js_files.into_vec();

    output.verbose_ctx(
        "build",
        &format!("Concatenating {} Javascript files", js_files.len()),
    );
    let js_data = bundle::concat(&js_files)?;
    bundle::write_target(&config.output.js, &js_data)?;
    output.success(&format!(
        "Wrote {} ({} bytes)",
        config.output.js.display(),
        js_data.len()
    ));

    if !config.fields.css.is_empty() {
        let mut css_files = Vec::new();
        for path in manifest.file_list(&config.fields.css)? {
            css_files.push(SourceFile::from_path(&path)?);
        }

        output.verbose_ctx(
            "build",
            &format!("Concatenating {} CSS files", css_files.len()),
        );
        let css_data = bundle::concat(&css_files)?;
        bundle::write_target(&config.output.css, &css_data)?;
        output.success(&format!(
            "Wrote {} ({} bytes)",
            config.output.css.display(),
            css_data.len()
        ));
    }

    Ok(())
}

/// Resolves the dependency-ordered library list, or an empty list when no
/// library tree is configured.
///
/// Build-first files come ahead of everything the resolver discovers; the
/// seed is drawn from the manifest's deps fields.
pub(crate) fn resolve_lib_order(
    config: &BundleConfig,
    manifest: &Manifest,
    output: &Output,
) -> Result<Vec<SourceFile>> {
    // Deps fields are evaluated unconditionally so a bad field name is
    // reported even when no library tree is configured.
    let seed_paths = manifest.file_list(&config.fields.deps)?;

    let Some(lib) = &config.lib else {
        return Ok(Vec::new());
    };

    output.verbose_ctx(
        "build",
        &format!("Resolving dependencies under {}", lib.base.display()),
    );

    let mut first = Vec::with_capacity(lib.first.len());
    for name in &lib.first {
        let file = SourceFile::from_path(&lib.base.join(name)).with_context(|| {
            format!(
                "Build-first file '{}' not found under {}",
                name,
                lib.base.display()
            )
        })?;
        first.push(file);
    }

    let mut seed = Vec::with_capacity(seed_paths.len());
    for path in &seed_paths {
        seed.push(SourceFile::from_path(path)?);
    }

    let mut resolver = Resolver::new(&lib.base);
    let ordered = resolver.resolve_with_first(&first, &seed)?;

    output.verbose_ctx(
        "build",
        &format!("Resolved {} library files", ordered.len()),
    );
    Ok(ordered)
}

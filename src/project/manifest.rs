//! Manifest evaluation
//!
//! A manifest is a TOML document whose top-level keys are field names, each
//! mapping to a path string or an array of path strings. Named fields are
//! evaluated into ordered file lists against the manifest root, which
//! defaults to the directory the manifest lives in.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("manifest field '{0}' is missing")]
    MissingField(String),

    #[error("entry {index} in manifest field '{field}' is not a string")]
    BadEntry { field: String, index: usize },

    #[error("manifest field '{0}' is not a string or an array of strings")]
    BadField(String),
}

/// A loaded manifest plus the root its paths resolve against.
#[derive(Debug)]
pub struct Manifest {
    fields: toml::Table,
    root: PathBuf,
}

impl Manifest {
    /// Loads and parses a manifest file.
    pub fn load(path: &Path, root: Option<&Path>) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let fields: toml::Table = toml::from_str(&text)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

        let root = match root {
            Some(dir) => dir.to_path_buf(),
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(Self { fields, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds an ordered list of paths from the named fields.
    ///
    /// Fields are visited in the given order; entries within a field keep
    /// their declared order. Every path is joined onto the manifest root.
    pub fn file_list(&self, fields: &[String]) -> Result<Vec<PathBuf>, ManifestError> {
        let mut files = Vec::new();

        for name in fields {
            let value = self
                .fields
                .get(name)
                .ok_or_else(|| ManifestError::MissingField(name.clone()))?;

            match value {
                toml::Value::String(path) => files.push(self.root.join(path)),
                toml::Value::Array(entries) => {
                    for (index, entry) in entries.iter().enumerate() {
                        match entry {
                            toml::Value::String(path) => files.push(self.root.join(path)),
                            _ => {
                                return Err(ManifestError::BadEntry {
                                    field: name.clone(),
                                    index,
                                })
                            }
                        }
                    }
                }
                _ => return Err(ManifestError::BadField(name.clone())),
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest_with(text: &str) -> (TempDir, Manifest) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, text).unwrap();
        let manifest = Manifest::load(&path, None).unwrap();
        (dir, manifest)
    }

    #[test]
    fn string_and_array_fields() {
        let (dir, manifest) = manifest_with(
            r#"
main = "src/main.js"
libs = ["libs/a.js", "libs/b.js"]
"#,
        );

        let files = manifest
            .file_list(&["libs".to_string(), "main".to_string()])
            .unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("libs/a.js"),
                dir.path().join("libs/b.js"),
                dir.path().join("src/main.js"),
            ]
        );
    }

    #[test]
    fn root_defaults_to_manifest_directory() {
        let (dir, manifest) = manifest_with("main = \"a.js\"\n");
        assert_eq!(manifest.root(), dir.path());
    }

    #[test]
    fn explicit_root_overrides_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.toml");
        fs::write(&path, "main = \"a.js\"\n").unwrap();

        let root = dir.path().join("elsewhere");
        let manifest = Manifest::load(&path, Some(&root)).unwrap();

        let files = manifest.file_list(&["main".to_string()]).unwrap();
        assert_eq!(files, vec![root.join("a.js")]);
    }

    #[test]
    fn missing_field_is_named() {
        let (_dir, manifest) = manifest_with("main = \"a.js\"\n");

        let err = manifest.file_list(&["nope".to_string()]).unwrap_err();
        assert_eq!(err, ManifestError::MissingField("nope".to_string()));
    }

    #[test]
    fn non_string_entry_is_rejected() {
        let (_dir, manifest) = manifest_with("libs = [\"a.js\", 42]\n");

        let err = manifest.file_list(&["libs".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ManifestError::BadEntry {
                field: "libs".to_string(),
                index: 1,
            }
        );
    }

    #[test]
    fn non_list_field_is_rejected() {
        let (_dir, manifest) = manifest_with("count = 3\n");

        let err = manifest.file_list(&["count".to_string()]).unwrap_err();
        assert_eq!(err, ManifestError::BadField("count".to_string()));
    }
}

//! Configuration handling for the bundle CLI
//!
//! Project configuration lives in `bundle.toml` next to the sources it
//! describes; a global `config.toml` under the user's config directory
//! supplies personal defaults such as the preferred output format.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Location of the manifest and the root its paths resolve against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Path to the manifest file, relative to the config file.
    pub path: PathBuf,

    /// Root for paths named in the manifest. Defaults to the manifest's
    /// own directory.
    pub root: Option<PathBuf>,
}

/// Names of the manifest fields each pipeline stage draws from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FieldsConfig {
    /// Fields whose files seed dependency resolution.
    pub deps: Vec<String>,

    /// Fields listing the application Javascript files.
    pub js: Vec<String>,

    /// Fields listing the CSS files. The CSS stage is skipped when empty.
    pub css: Vec<String>,
}

/// The library tree dependencies resolve against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibConfig {
    /// Dependency root: the directory `@requires` tokens resolve under.
    pub base: PathBuf,

    /// Library files to build first, relative to `base`. These always
    /// precede everything else in the output.
    #[serde(default)]
    pub first: Vec<String>,
}

/// Bundle target paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub js: PathBuf,
    pub css: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            js: PathBuf::from("dist/bundle.js"),
            css: PathBuf::from("dist/bundle.css"),
        }
    }
}

/// Project-level configuration (`bundle.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub fields: FieldsConfig,

    pub lib: Option<LibConfig>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl BundleConfig {
    /// Loads a project config, rebasing its relative paths onto the config
    /// file's directory so commands work from anywhere.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config: BundleConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.rebase(base_dir);
        Ok(config)
    }

    fn rebase(&mut self, dir: &Path) {
        // Path::join replaces the base when the joined path is absolute,
        // so absolute config entries pass through untouched.
        self.manifest.path = dir.join(&self.manifest.path);
        if let Some(root) = self.manifest.root.take() {
            self.manifest.root = Some(dir.join(root));
        }
        if let Some(lib) = &mut self.lib {
            lib.base = dir.join(&lib.base);
        }
        self.output.js = dir.join(&self.output.js);
        self.output.css = dir.join(&self.output.css);
    }
}

/// Default output format from the global config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format when no `--format` flag is given.
    pub default_format: DefaultFormat,
}

impl GlobalConfig {
    /// Loads the global configuration, falling back to defaults when no
    /// config file exists.
    pub fn load() -> Result<Self> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&text)
            .with_context(|| format!("Failed to parse global config: {}", config_path.display()))
    }

    /// Returns the global config directory.
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "bundle", "bundle-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }
}

//! Configuration for theme generation

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::palette::ColorVariant;
use crate::template::DEFAULT_SCHEME_NAME;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Where inputs are read from and outputs written to
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Directory holding the base template, palettes and metadata template
    pub templates_dir: PathBuf,

    /// Directory generated themes are written into; cleared before a batch
    pub assets_dir: PathBuf,

    /// Name written into the root `<scheme>` element
    pub scheme_name: String,

    /// Path prefix used for `editorScheme` in the metadata document
    pub editor_scheme_root: String,

    /// File name of the base scheme template inside `templates_dir`
    pub template_file: String,

    /// File name of the metadata template inside `templates_dir`
    pub metadata_file: String,
}

/// TOML structure for deserializing configs; every key is optional
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    templates_dir: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    scheme_name: Option<String>,
    editor_scheme_root: Option<String>,
    template_file: Option<String>,
    metadata_file: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("themes"),
            scheme_name: DEFAULT_SCHEME_NAME.to_string(),
            editor_scheme_root: "/themes".to_string(),
            template_file: "one-dark.template.xml".to_string(),
            metadata_file: "oneDark.template.json".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// Relative directories are kept as written, i.e. relative to the
    /// working directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string, filling gaps with defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(Self {
            templates_dir: parsed.templates_dir.unwrap_or(defaults.templates_dir),
            assets_dir: parsed.assets_dir.unwrap_or(defaults.assets_dir),
            scheme_name: parsed.scheme_name.unwrap_or(defaults.scheme_name),
            editor_scheme_root: parsed
                .editor_scheme_root
                .unwrap_or(defaults.editor_scheme_root),
            template_file: parsed.template_file.unwrap_or(defaults.template_file),
            metadata_file: parsed.metadata_file.unwrap_or(defaults.metadata_file),
        })
    }

    /// Set the input directory
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Set the generated scheme name
    pub fn with_scheme_name(mut self, name: impl Into<String>) -> Self {
        self.scheme_name = name.into();
        self
    }

    /// Set the `editorScheme` path prefix
    pub fn with_editor_scheme_root(mut self, root: impl Into<String>) -> Self {
        self.editor_scheme_root = root.into();
        self
    }

    pub fn template_path(&self) -> PathBuf {
        self.templates_dir.join(&self.template_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.templates_dir.join(&self.metadata_file)
    }

    /// `<templates_dir>/<variant>.palette.json`
    pub fn palette_path(&self, variant: ColorVariant) -> PathBuf {
        self.templates_dir
            .join(format!("{}.palette.json", variant.file_stem()))
    }
}

//! Shared configuration loader for the docbridge toolchain.
//!
//! `defaults/docbridge.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DocbridgeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use docbridge_babel::PluginOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/docbridge.default.toml");

/// Top-level configuration consumed by docbridge applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DocbridgeConfig {
    pub markdown: MarkdownConfig,
    pub plugins: PluginsConfig,
    #[serde(default)]
    pub pandoc: PandocConfig,
    pub tree: TreeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_char: char,
}

/// Where plugins come from.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginsConfig {
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
    pub with_pandoc: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PandocConfig {
    #[serde(default)]
    pub binary: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    pub max_label: usize,
}

impl From<&DocbridgeConfig> for PluginOptions {
    fn from(config: &DocbridgeConfig) -> Self {
        PluginOptions {
            with_external_tools: config.plugins.with_pandoc,
            bullet_char: config.markdown.bullet_char,
            pandoc_binary: config.pandoc.binary.clone(),
            tree_max_label: config.tree.max_label,
        }
    }
}

impl From<DocbridgeConfig> for PluginOptions {
    fn from(config: DocbridgeConfig) -> Self {
        PluginOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DocbridgeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DocbridgeConfig, ConfigError> {
    Loader::new().build()
}

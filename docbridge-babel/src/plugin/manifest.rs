//! Plugins declared in TOML manifests
//!
//! A manifest declares languages and the commands converting between them:
//!
//! ```toml
//! name = "shout"
//!
//! [[languages]]
//! name = "shout"
//! extension = ".shout"
//!
//! [[converters]]
//! source = "markdown"
//! target = "shout"
//! command = ["tr", "a-z", "A-Z"]
//! ```
//!
//! Each converter command reads the source document on stdin and writes the target document
//! on stdout. The AST travels as pandoc JSON, in both directions. `name` defaults to the file
//! stem.
//!
//! Manifest plugins are attached even when external tools are disabled.

use super::{Plugin, PluginOptions};
use crate::error::{BabelError, Result};
use crate::formats::CommandConverter;
use crate::graph::{Filters, GraphBuilder, Language};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
struct Manifest {
    name: Option<String>,
    #[serde(default)]
    languages: Vec<LanguageEntry>,
    #[serde(default)]
    converters: Vec<ConverterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct LanguageEntry {
    name: String,
    extension: Option<String>,
    #[serde(default)]
    binary: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ConverterEntry {
    source: String,
    target: String,
    command: Vec<String>,
}

/// A plugin loaded from a manifest file.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    name: String,
    path: PathBuf,
    languages: Vec<LanguageEntry>,
    converters: Vec<CommandConverter>,
}

impl ManifestPlugin {
    pub fn from_file(path: &Path) -> Result<Self> {
        let invalid = |reason: String| BabelError::PluginManifest {
            path: path.to_path_buf(),
            reason,
        };
        let manifest: Manifest = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|err| invalid(err.to_string()))?;

        let name = match manifest.name {
            Some(name) => name,
            None => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
                .ok_or_else(|| invalid("cannot derive a plugin name".to_string()))?,
        };
        if manifest.languages.is_empty() && manifest.converters.is_empty() {
            return Err(invalid("declares no language and no converter".to_string()));
        }
        let converters = manifest
            .converters
            .iter()
            .map(|entry| CommandConverter::new(&entry.source, &entry.target, &entry.command))
            .collect::<Result<Vec<_>>>()
            .map_err(|err| invalid(err.to_string()))?;

        Ok(ManifestPlugin {
            name,
            path: path.to_path_buf(),
            languages: manifest.languages,
            converters,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn converters(&self) -> &[CommandConverter] {
        &self.converters
    }
}

impl Plugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn file_extensions(&self) -> Vec<String> {
        self.languages
            .iter()
            .filter_map(|lang| lang.extension.clone())
            .collect()
    }

    fn attach(&self, builder: &mut GraphBuilder, _options: &PluginOptions) -> Result<()> {
        for entry in &self.languages {
            let mut language = Language::new(&entry.name).external();
            if let Some(ext) = &entry.extension {
                language = language.with_file_ext(ext);
            }
            if entry.binary {
                language = language.binary();
            }
            builder.register_lang(language)?;
        }
        for converter in &self.converters {
            builder.register_func(None, None, converter.clone(), Filters::none())?;
        }
        Ok(())
    }
}

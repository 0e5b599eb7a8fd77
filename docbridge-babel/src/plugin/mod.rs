//! Plugins
//!
//!     A plugin populates the conversion graph: its [`Plugin::attach`] registers languages and
//!     converters on a [`GraphBuilder`]. Plugins are collected in a [`PluginRegistry`], an owned
//!     value built explicitly at start-up:
//!
//!         let mut registry = PluginRegistry::with_builtins();
//!         discover_plugins(&[plugin_dir], &mut registry)?;
//!         let graph = registry.build_graph(&PluginOptions::default())?;
//!
//!     Built-in plugins live in builtin.rs. Third-party plugins are TOML manifests (manifest.rs)
//!     found by scanning directories (discovery.rs); their converters run external commands.

pub mod builtin;
pub mod discovery;
pub mod manifest;
pub mod registry;

use crate::ast::DEFAULT_BULLET_CHAR;
use crate::error::Result;
use crate::graph::GraphBuilder;
use crate::tree::printer::DEFAULT_MAX_LABEL;
use std::path::PathBuf;

pub use builtin::{AstPlugin, MarkdownPlugin, PandocPlugin, TreePlugin};
pub use discovery::discover_plugins;
pub use manifest::ManifestPlugin;
pub use registry::PluginRegistry;

/// Settings handed to every plugin when it attaches.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    /// Attach plugins that depend on an external program
    pub with_external_tools: bool,
    /// Bullet for lists that do not record one
    pub bullet_char: char,
    /// Explicit pandoc executable
    pub pandoc_binary: Option<PathBuf>,
    /// Text leaf budget of the tree format
    pub tree_max_label: usize,
}

impl Default for PluginOptions {
    fn default() -> Self {
        PluginOptions {
            with_external_tools: true,
            bullet_char: DEFAULT_BULLET_CHAR,
            pandoc_binary: None,
            tree_max_label: DEFAULT_MAX_LABEL,
        }
    }
}

/// A unit of registration for the conversion graph.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Extensions of the languages this plugin registers, with their leading dot.
    fn file_extensions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether attaching needs a program outside this crate.
    fn requires_external_tool(&self) -> bool {
        false
    }

    /// Register languages and converters.
    fn attach(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()>;
}

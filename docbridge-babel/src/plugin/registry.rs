//! Owned collection of plugins.

use super::builtin::{AstPlugin, MarkdownPlugin, PandocPlugin, TreePlugin};
use super::{Plugin, PluginOptions};
use crate::error::{BabelError, Result};
use crate::graph::{ConversionGraph, GraphBuilder};
use tracing::debug;

/// Plugins in registration order. Earlier plugins win when two register the same language or
/// converter pair.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// Registry holding the `ast`, `markdown`, `tree` and `pandoc` plugins.
    pub fn with_builtins() -> Self {
        let mut registry = PluginRegistry::new();
        registry.add(AstPlugin);
        registry.add(MarkdownPlugin);
        registry.add(TreePlugin);
        registry.add(PandocPlugin);
        registry
    }

    /// Add a plugin. Returns `false` if one with the same name and extensions is already there.
    pub fn add<P: Plugin + 'static>(&mut self, plugin: P) -> bool {
        self.add_boxed(Box::new(plugin))
    }

    pub fn add_boxed(&mut self, plugin: Box<dyn Plugin>) -> bool {
        let duplicate = self.plugins.iter().any(|existing| {
            existing.name() == plugin.name()
                && existing.file_extensions() == plugin.file_extensions()
        });
        if duplicate {
            debug!(plugin = %plugin.name(), "plugin already registered");
            return false;
        }
        debug!(plugin = %plugin.name(), "registering plugin");
        self.plugins.push(plugin);
        true
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Look a plugin up by extension (`md` or `.md`) or by a case-insensitive part of its name.
    pub fn find(&self, query: &str) -> Result<&dyn Plugin> {
        let needle = query.trim().to_lowercase();
        let ext = format!(".{}", needle.trim_start_matches('.'));
        let by_ext = self.plugins.iter().find(|plugin| {
            plugin
                .file_extensions()
                .iter()
                .any(|candidate| candidate.to_lowercase() == ext)
        });
        let found = by_ext.or_else(|| {
            self.plugins
                .iter()
                .find(|plugin| !needle.is_empty() && plugin.name().to_lowercase().contains(&needle))
        });
        found
            .map(|plugin| plugin.as_ref())
            .ok_or_else(|| BabelError::PluginNotFound(query.to_string()))
    }

    /// Attach every plugin to `builder`, in registration order.
    pub fn attach_all(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()> {
        for plugin in &self.plugins {
            if plugin.requires_external_tool() && !options.with_external_tools {
                debug!(plugin = %plugin.name(), "external tools disabled, skipping plugin");
                continue;
            }
            plugin.attach(builder, options)?;
        }
        Ok(())
    }

    /// Attach every plugin to a fresh builder and freeze it.
    pub fn build_graph(&self, options: &PluginOptions) -> Result<ConversionGraph> {
        let mut builder = GraphBuilder::new();
        self.attach_all(&mut builder, options)?;
        debug!(
            languages = builder.language_count(),
            converters = builder.edge_count(),
            "conversion graph built"
        );
        Ok(builder.build())
    }
}

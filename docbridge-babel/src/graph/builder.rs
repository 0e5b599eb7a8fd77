//! Write phase of the conversion graph.
//!
//! Plugins register languages and converters on a [`GraphBuilder`], which is then frozen into
//! an immutable [`ConversionGraph`] with [`GraphBuilder::build`]. Registration is idempotent:
//! the first registration of a language name or of a `(source, target)` pair wins.

use super::conversion::ConversionGraph;
use super::converter::{Converter, Edge, Filters};
use super::language::Language;
use crate::error::{BabelError, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct GraphBuilder {
    languages: BTreeMap<String, Language>,
    edges: BTreeMap<(String, String), Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    /// Register a language unless one with the same name exists.
    pub fn register_lang(&mut self, language: Language) -> Result<()> {
        language.check()?;
        if self.languages.contains_key(language.name()) {
            debug!(lang = %language.name(), "language already registered");
            return Ok(());
        }
        trace!(lang = %language.name(), ext = ?language.file_ext(), "registering language");
        self.languages.insert(language.name().to_string(), language);
        Ok(())
    }

    /// Register a converter unless the pair already has one.
    ///
    /// `source` and `target` fall back to what the converter declares.
    pub fn register_func<C>(
        &mut self,
        source: Option<&str>,
        target: Option<&str>,
        converter: C,
        filters: Filters,
    ) -> Result<()>
    where
        C: Converter + 'static,
    {
        let source = source
            .or_else(|| converter.declared_source())
            .ok_or(BabelError::UndeterminedEdge)?
            .to_string();
        let target = target
            .or_else(|| converter.declared_target())
            .ok_or(BabelError::UndeterminedEdge)?
            .to_string();

        let key = (source, target);
        if self.edges.contains_key(&key) {
            debug!(source = %key.0, target = %key.1, "converter already registered");
            return Ok(());
        }
        trace!(source = %key.0, target = %key.1, "registering converter");
        let edge = Edge {
            source: key.0.clone(),
            target: key.1.clone(),
            converter: Arc::new(converter),
            filters,
        };
        self.edges.insert(key, edge);
        Ok(())
    }

    /// Register a converter for a known pair, without filters.
    pub fn add_edge<C>(&mut self, source: &str, target: &str, converter: C) -> Result<()>
    where
        C: Converter + 'static,
    {
        self.register_func(Some(source), Some(target), converter, Filters::none())
    }

    pub fn has_language(&self, name: &str) -> bool {
        self.languages.contains_key(name)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .contains_key(&(source.to_string(), target.to_string()))
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Freeze the registrations.
    pub fn build(self) -> ConversionGraph {
        ConversionGraph::new(self.languages, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Content, Context};

    fn identity(content: Content, _context: &Context) -> Result<Content> {
        Ok(content)
    }

    struct Declared;

    impl Converter for Declared {
        fn convert(&self, content: Content, _context: &Context) -> Result<Content> {
            Ok(content)
        }

        fn declared_source(&self) -> Option<&str> {
            Some("a")
        }

        fn declared_target(&self) -> Option<&str> {
            Some("b")
        }
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut builder = GraphBuilder::new();
        builder.register_lang(Language::new("a")).unwrap();
        builder
            .register_lang(Language::new("a").with_file_ext(".other"))
            .unwrap();
        builder.add_edge("a", "b", identity).unwrap();
        builder.add_edge("a", "b", identity).unwrap();

        assert_eq!(builder.language_count(), 1);
        assert_eq!(builder.edge_count(), 1);
        let graph = builder.build();
        assert_eq!(graph.file_ext("a"), None);
    }

    #[test]
    fn test_invalid_extension_is_rejected() {
        let mut builder = GraphBuilder::new();
        let err = builder
            .register_lang(Language::new("md").with_file_ext("md"))
            .unwrap_err();
        assert!(matches!(err, BabelError::InvalidExtension(_)));
        assert!(!builder.has_language("md"));
    }

    #[test]
    fn test_declared_pair() {
        let mut builder = GraphBuilder::new();
        builder
            .register_func(None, None, Declared, Filters::none())
            .unwrap();
        assert!(builder.has_edge("a", "b"));

        builder
            .register_func(Some("c"), None, Declared, Filters::none())
            .unwrap();
        assert!(builder.has_edge("c", "b"));
    }

    #[test]
    fn test_undetermined_edge() {
        let mut builder = GraphBuilder::new();
        let err = builder
            .register_func(Some("a"), None, identity, Filters::none())
            .unwrap_err();
        assert!(matches!(err, BabelError::UndeterminedEdge));
    }
}

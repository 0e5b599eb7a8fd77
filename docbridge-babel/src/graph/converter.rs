//! Converters: the edges of the conversion graph

use super::content::Content;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state of one conversion, visible to every step of the chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    pub source: String,
    pub target: String,
    /// Every language visited, source and target included
    pub lang_chain: Vec<String>,
    /// File the final result is written to, if any
    pub output: Option<PathBuf>,
}

/// Converts content from one language to the next.
///
/// Closures `Fn(Content, &Context) -> Result<Content>` are converters. Implementors that know
/// which pair they convert can declare it, so they can be registered without naming it.
pub trait Converter: Send + Sync {
    fn convert(&self, content: Content, context: &Context) -> Result<Content>;

    fn declared_source(&self) -> Option<&str> {
        None
    }

    fn declared_target(&self) -> Option<&str> {
        None
    }
}

impl<F> Converter for F
where
    F: Fn(Content, &Context) -> Result<Content> + Send + Sync,
{
    fn convert(&self, content: Content, context: &Context) -> Result<Content> {
        self(content, context)
    }
}

pub type Filter = Arc<dyn Fn(Content, &Context) -> Result<Content> + Send + Sync>;

/// Optional steps run around a converter.
#[derive(Clone, Default)]
pub struct Filters {
    pub pre: Option<Filter>,
    pub post: Option<Filter>,
}

impl Filters {
    pub fn none() -> Self {
        Filters::default()
    }

    pub fn pre<F>(mut self, filter: F) -> Self
    where
        F: Fn(Content, &Context) -> Result<Content> + Send + Sync + 'static,
    {
        self.pre = Some(Arc::new(filter));
        self
    }

    pub fn post<F>(mut self, filter: F) -> Self
    where
        F: Fn(Content, &Context) -> Result<Content> + Send + Sync + 'static,
    {
        self.post = Some(Arc::new(filter));
        self
    }
}

/// A registered edge.
#[derive(Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub converter: Arc<dyn Converter>,
    pub filters: Filters,
}

impl Edge {
    /// Run pre-filter, converter and post-filter in turn.
    pub fn run(&self, content: Content, context: &Context) -> Result<Content> {
        let content = match &self.filters.pre {
            Some(pre) => pre(content, context)?,
            None => content,
        };
        let content = self.converter.convert(content, context)?;
        match &self.filters.post {
            Some(post) => post(content, context),
            None => Ok(content),
        }
    }
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Edge")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("pre", &self.filters.pre.is_some())
            .field("post", &self.filters.post.is_some())
            .finish()
    }
}

//! Languages: the vertices of the conversion graph
//!
//! A language knows how to turn a file or a string into [`Content`] and back. The defaults
//! treat files as UTF-8 text, binary languages read and write raw bytes.

use super::content::Content;
use crate::error::{BabelError, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub type LoadsFn = Arc<dyn Fn(&str) -> Result<Content> + Send + Sync>;
pub type DumpsFn = Arc<dyn Fn(&Content) -> Result<String> + Send + Sync>;
pub type EqualFn = Arc<dyn Fn(&Content, &Content) -> bool + Send + Sync>;

/// A registered document language.
#[derive(Clone)]
pub struct Language {
    name: String,
    file_ext: Option<String>,
    loads: LoadsFn,
    dumps: DumpsFn,
    equal: EqualFn,
    binary: bool,
    external: bool,
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name)
            .field("file_ext", &self.file_ext)
            .field("binary", &self.binary)
            .field("external", &self.external)
            .finish_non_exhaustive()
    }
}

impl Language {
    /// A text language with no file extension.
    pub fn new(name: impl Into<String>) -> Self {
        Language {
            name: name.into(),
            file_ext: None,
            loads: Arc::new(|text: &str| Ok(Content::Text(text.to_string()))),
            dumps: Arc::new(Content::to_text),
            equal: Arc::new(|a: &Content, b: &Content| a == b),
            binary: false,
            external: false,
        }
    }

    /// Extension including the leading dot, e.g. `.md`. Checked on registration.
    pub fn with_file_ext(mut self, file_ext: impl Into<String>) -> Self {
        self.file_ext = Some(file_ext.into());
        self
    }

    pub fn with_loads<F>(mut self, loads: F) -> Self
    where
        F: Fn(&str) -> Result<Content> + Send + Sync + 'static,
    {
        self.loads = Arc::new(loads);
        self
    }

    pub fn with_dumps<F>(mut self, dumps: F) -> Self
    where
        F: Fn(&Content) -> Result<String> + Send + Sync + 'static,
    {
        self.dumps = Arc::new(dumps);
        self
    }

    /// Comparator used by [`Language::assert_equal`].
    pub fn with_equal<F>(mut self, equal: F) -> Self
    where
        F: Fn(&Content, &Content) -> bool + Send + Sync + 'static,
    {
        self.equal = Arc::new(equal);
        self
    }

    /// Files are read and written as raw bytes.
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    /// Registered on behalf of an external tool.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_ext(&self) -> Option<&str> {
        self.file_ext.as_deref()
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub(crate) fn check(&self) -> Result<()> {
        match &self.file_ext {
            Some(ext) if !ext.starts_with('.') || ext.len() < 2 => {
                Err(BabelError::InvalidExtension(ext.clone()))
            }
            _ => Ok(()),
        }
    }

    pub fn loads(&self, text: &str) -> Result<Content> {
        (self.loads)(text)
    }

    pub fn dumps(&self, content: &Content) -> Result<String> {
        (self.dumps)(content)
    }

    pub fn load(&self, path: &Path) -> Result<Content> {
        if !path.exists() {
            return Err(BabelError::MissingInput(path.to_path_buf()));
        }
        if self.binary {
            return Ok(Content::Binary(fs::read(path)?));
        }
        self.loads(&fs::read_to_string(path)?)
    }

    pub fn dump(&self, content: &Content, path: &Path) -> Result<()> {
        match content {
            Content::Binary(bytes) => fs::write(path, bytes)?,
            other => fs::write(path, self.dumps(other)?)?,
        }
        Ok(())
    }

    pub fn assert_equal(&self, a: &Content, b: &Content) -> bool {
        (self.equal)(a, b)
    }
}

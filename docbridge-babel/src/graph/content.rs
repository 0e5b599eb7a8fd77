//! Values flowing through a conversion chain

use crate::error::{BabelError, Result};
use crate::pandoc;
use crate::tree::Node;
use serde_json::Value;
use std::path::PathBuf;

/// Document content in one of the shapes converters exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Ast(Node),
    Json(Value),
    Binary(Vec<u8>),
}

impl Content {
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Ast(_) => "ast",
            Content::Json(_) => "json",
            Content::Binary(_) => "binary",
        }
    }

    fn mismatch(&self, expected: &'static str) -> BabelError {
        BabelError::ContentMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            Content::Text(text) => Ok(text),
            other => Err(other.mismatch("text")),
        }
    }

    /// The AST, reading pandoc JSON when needed.
    pub fn into_ast(self) -> Result<Node> {
        match self {
            Content::Ast(node) => Ok(node),
            Content::Json(value) => pandoc::pandoc_to_ast(&value),
            other => Err(other.mismatch("ast")),
        }
    }

    /// Textual form: AST and JSON are written as indented pandoc JSON.
    pub fn to_text(&self) -> Result<String> {
        match self {
            Content::Text(text) => Ok(text.clone()),
            Content::Json(value) => Ok(pretty_json(value)?),
            Content::Ast(node) => Ok(pretty_json(&pandoc::ast_to_pandoc(node)?)?),
            Content::Binary(_) => Err(self.mismatch("text")),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Content::Binary(bytes) => Ok(bytes),
            Content::Text(text) => Ok(text.into_bytes()),
            other => Ok(other.to_text()?.into_bytes()),
        }
    }
}

/// Indented JSON with sorted keys and a trailing newline
pub fn pretty_json(value: &Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Ast(node)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Json(value)
    }
}

/// What a conversion starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A file, loaded with the source language
    Path(PathBuf),
    /// Content already in memory
    Content(Content),
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

impl From<&std::path::Path> for Input {
    fn from(path: &std::path::Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl From<Content> for Input {
    fn from(content: Content) -> Self {
        Input::Content(content)
    }
}

impl From<Node> for Input {
    fn from(node: Node) -> Self {
        Input::Content(Content::Ast(node))
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Content(Content::Text(text))
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Content(Content::from(text))
    }
}

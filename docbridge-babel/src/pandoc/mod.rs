//! Pandoc JSON bridge
//!
//!     Pandoc exchanges documents as JSON where every element is a tagged union
//!     `{"t": "Tag", "c": payload}` (payload omitted for payload-less elements) wrapped in the
//!     envelope `{"pandoc-api-version": [...], "meta": {...}, "blocks": [...]}`. The older
//!     `[{"unMeta": ...}, blocks]` shape is rejected.
//!
//!     - writer.rs: AST to pandoc JSON, a [`TreeTransformer`](crate::tree::TreeTransformer)
//!     - reader.rs: pandoc JSON to AST
//!     - meta.rs: metadata packing under the `docbridge` meta key
//!
//!     Text is the main impedance mismatch: pandoc splits it into `Str`/`Space`/`SoftBreak`
//!     tokens while the AST keeps plain string leaves. [`split_spaces`] and [`merge_strings`]
//!     convert between the two.

pub mod meta;
pub mod reader;
pub mod writer;

use crate::error::Result;
use crate::tree::{Child, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub use reader::PandocToAst;
pub use writer::AstToPandoc;

/// API version written in the envelope
pub const PANDOC_API_VERSION: [u64; 3] = [1, 23, 1];

/// Meta key holding the document metadata
pub const META_KEY: &str = "docbridge";

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Split text on runs of non-newline whitespace.
///
/// Words are interleaved with empty strings standing for the spaces, and no two empty strings
/// are ever adjacent: `"a  b"` gives `["a", "", "b"]`.
pub fn split_spaces(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut words = SPACES.split(text).peekable();
    while let Some(word) = words.next() {
        push_token(&mut tokens, word);
        if words.peek().is_some() {
            push_token(&mut tokens, "");
        }
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, token: &str) {
    if token.is_empty() && tokens.last().is_some_and(String::is_empty) {
        return;
    }
    tokens.push(token.to_string());
}

/// Merge consecutive string leaves and drop empty ones.
pub fn merge_strings(children: Vec<Child>) -> Vec<Child> {
    let mut out: Vec<Child> = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::Text(text) if text.is_empty() => {}
            Child::Text(text) => match out.last_mut() {
                Some(Child::Text(previous)) => previous.push_str(&text),
                _ => out.push(Child::Text(text)),
            },
            node => out.push(node),
        }
    }
    out
}

/// Convert an AST to a pandoc JSON document.
pub fn ast_to_pandoc(root: &Node) -> Result<Value> {
    AstToPandoc::new().write(root)
}

/// Convert a pandoc JSON document to an AST with the default options.
pub fn pandoc_to_ast(document: &Value) -> Result<Node> {
    PandocToAst::new().read(document)
}

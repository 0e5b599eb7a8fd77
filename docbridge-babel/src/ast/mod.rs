//! Document AST
//!
//!     The AST is a [`Node`] tree with a fixed vocabulary. Its root is named `root` and holds
//!     Block nodes; blocks hold blocks or Inline nodes; inlines hold inlines and plain text. Text
//!     is always a string leaf: `Str`, `String`, `Space` and `str` are reserved and never appear
//!     as node names.
//!
//!     Vocabulary
//!         Blocks:  Plain, Para, Header, CodeBlock, BlockQuote, BulletList, OrderedList, MathBlock
//!         Inlines: Emph, Strong, Strikeout, Code, Link, Image, LineBreak, Math
//!         Other:   root, ListItem, HorizontalRule, RawBlock, DefinitionList, Table, Div
//!
//!     Any other name is foreign. Foreign nodes are allowed in a tree (plugins use them as
//!     markers) but are elided by writers, which splice their children in place.
//!
//!     Attributes
//!         Header.level           1 to 6
//!         CodeBlock.lang         info string, possibly empty
//!         OrderedList.start      first number
//!         OrderedList.style      see [`ListStyle`]
//!         OrderedList.delimiter  `.` or `)`
//!         BulletList.bullet_char single character
//!         Link/Image.url, title
//!         Math.display           true for display math that is not alone in a paragraph
//!         root.metadata          document metadata map

pub mod build;

use crate::error::{BabelError, Result};
use crate::tree::{Child, Node};
use serde_json::{Map, Value};

pub use build::*;

pub const ROOT: &str = "root";

pub const BLOCK_NAMES: &[&str] = &[
    "Plain",
    "Para",
    "Header",
    "CodeBlock",
    "BlockQuote",
    "BulletList",
    "OrderedList",
    "MathBlock",
];

pub const INLINE_NAMES: &[&str] = &[
    "Emph",
    "Strong",
    "Strikeout",
    "Code",
    "Link",
    "Image",
    "LineBreak",
    "Math",
];

/// Names known to the pandoc bridge that are neither blocks nor inlines
pub const OTHER_NATIVE_NAMES: &[&str] = &[
    ROOT,
    "ListItem",
    "HorizontalRule",
    "RawBlock",
    "DefinitionList",
    "Table",
    "Div",
];

/// Names reserved for text, which is always a string leaf
pub const FORBIDDEN_NAMES: &[&str] = &["Str", "String", "Space", "str"];

/// Attribute keys
pub mod attr {
    pub const LEVEL: &str = "level";
    pub const LANG: &str = "lang";
    pub const START: &str = "start";
    pub const STYLE: &str = "style";
    pub const DELIMITER: &str = "delimiter";
    pub const BULLET_CHAR: &str = "bullet_char";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
    pub const DISPLAY: &str = "display";
    pub const METADATA: &str = "metadata";
}

pub const DEFAULT_BULLET_CHAR: char = '*';
pub const DEFAULT_DELIMITER: char = '.';

pub fn is_block(name: &str) -> bool {
    BLOCK_NAMES.contains(&name)
}

pub fn is_inline(name: &str) -> bool {
    INLINE_NAMES.contains(&name)
}

/// Whether the name belongs to the AST vocabulary
pub fn is_native(name: &str) -> bool {
    is_block(name) || is_inline(name) || OTHER_NATIVE_NAMES.contains(&name)
}

pub fn is_forbidden(name: &str) -> bool {
    FORBIDDEN_NAMES.contains(&name)
}

/// Numbering style of an ordered list, named as in pandoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    #[default]
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    DefaultStyle,
    Example,
}

impl ListStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ListStyle::Decimal => "Decimal",
            ListStyle::LowerAlpha => "LowerAlpha",
            ListStyle::UpperAlpha => "UpperAlpha",
            ListStyle::LowerRoman => "LowerRoman",
            ListStyle::UpperRoman => "UpperRoman",
            ListStyle::DefaultStyle => "DefaultStyle",
            ListStyle::Example => "Example",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "Decimal" => ListStyle::Decimal,
            "LowerAlpha" => ListStyle::LowerAlpha,
            "UpperAlpha" => ListStyle::UpperAlpha,
            "LowerRoman" => ListStyle::LowerRoman,
            "UpperRoman" => ListStyle::UpperRoman,
            "DefaultStyle" => ListStyle::DefaultStyle,
            "Example" => ListStyle::Example,
            _ => return None,
        })
    }
}

/// Heading level, clamped to 1..=6
pub fn level(node: &Node) -> u8 {
    node.u64_attr(attr::LEVEL).unwrap_or(1).clamp(1, 6) as u8
}

/// Code block language, empty when unset
pub fn lang(node: &Node) -> &str {
    node.str_attr(attr::LANG).unwrap_or("")
}

pub fn url(node: &Node) -> &str {
    node.str_attr(attr::URL).unwrap_or("")
}

pub fn title(node: &Node) -> &str {
    node.str_attr(attr::TITLE).unwrap_or("")
}

/// First number of an ordered list, 1 when unset
pub fn start(node: &Node) -> u64 {
    node.u64_attr(attr::START).unwrap_or(1)
}

pub fn style(node: &Node) -> ListStyle {
    node.str_attr(attr::STYLE)
        .and_then(ListStyle::parse)
        .unwrap_or_default()
}

/// Ordered list delimiter, `.` unless explicitly `)`
pub fn delimiter(node: &Node) -> char {
    match node.str_attr(attr::DELIMITER) {
        Some(")") => ')',
        _ => DEFAULT_DELIMITER,
    }
}

pub fn bullet_char(node: &Node) -> char {
    node.str_attr(attr::BULLET_CHAR)
        .and_then(|s| s.chars().next())
        .unwrap_or(DEFAULT_BULLET_CHAR)
}

pub fn is_display_math(node: &Node) -> bool {
    node.attr(attr::DISPLAY)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Document metadata stored on the root
pub fn metadata(root: &Node) -> Option<&Map<String, Value>> {
    root.attr(attr::METADATA).and_then(Value::as_object)
}

pub fn set_metadata(root: &mut Node, metadata: Map<String, Value>) {
    if metadata.is_empty() {
        root.remove_attr(attr::METADATA);
    } else {
        root.set_attr(attr::METADATA, Value::Object(metadata));
    }
}

/// Label used when printing a tree.
pub fn display_label(node: &Node) -> String {
    match node.name() {
        "Header" => format!("Header {}", level(node)),
        "Link" => format!("Link <{}>", url(node)),
        "Image" => format!("Image <{}>", url(node)),
        "OrderedList" => format!("OrderedList ({})", start(node)),
        "BulletList" => format!("BulletList ({})", bullet_char(node)),
        "CodeBlock" if !lang(node).is_empty() => format!("CodeBlock {}", lang(node)),
        name => name.to_string(),
    }
}

/// Check the AST invariants over the whole tree.
///
/// Fails on reserved text names and on any Block found below an Inline.
pub fn validate(node: &Node) -> Result<()> {
    let mut stack: Vec<(&Node, Option<&str>)> = vec![(node, None)];
    while let Some((current, inline_ancestor)) = stack.pop() {
        let name = current.name();
        if is_forbidden(name) {
            return Err(BabelError::InvalidAst(format!(
                "`{name}` is reserved, text must be a string leaf"
            )));
        }
        if let (Some(parent), true) = (inline_ancestor, is_block(name)) {
            return Err(BabelError::InvalidAst(format!(
                "block `{name}` found inside inline `{parent}`"
            )));
        }
        let next_ancestor = if is_inline(name) {
            Some(name)
        } else {
            inline_ancestor
        };
        for child in current.children().iter().rev() {
            if let Child::Node(inner) = child {
                stack.push((inner, next_ancestor));
            }
        }
    }
    Ok(())
}

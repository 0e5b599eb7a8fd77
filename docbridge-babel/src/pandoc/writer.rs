//! AST to pandoc JSON
//!
//! Native nodes map to `{"t": name, "c": children}` unless they need a specific payload
//! layout (headers, code, lists, links, math). Foreign nodes are elided and their children
//! spliced into the parent.

use super::{meta, split_spaces, META_KEY, PANDOC_API_VERSION};
use crate::ast::{self, ROOT};
use crate::error::{BabelError, Result};
use crate::tree::{Child, Handler, Node, Transformed, TreeTransformer, Visit};
use serde_json::{json, Map, Value};

/// Native names whose children are spliced like foreign nodes
const SPLICED: &[&str] = &["ListItem", "Table", "DefinitionList"];

fn element(tag: &str, content: Value) -> Value {
    json!({"t": tag, "c": content})
}

fn bare(tag: &str) -> Value {
    json!({"t": tag})
}

fn empty_attr() -> Value {
    json!(["", [], []])
}

/// Pandoc tokens for a string leaf
fn text_tokens(text: &str) -> Vec<Value> {
    let mut tokens = Vec::new();
    for word in split_spaces(text) {
        if word.is_empty() {
            tokens.push(bare("Space"));
            continue;
        }
        for (index, line) in word.split('\n').enumerate() {
            if index > 0 {
                tokens.push(bare("SoftBreak"));
            }
            if !line.is_empty() {
                tokens.push(element("Str", Value::String(line.to_string())));
            }
        }
    }
    tokens
}

#[derive(Debug, Default)]
pub struct AstToPandoc;

impl AstToPandoc {
    pub fn new() -> Self {
        AstToPandoc
    }

    /// Write a full document envelope for an AST rooted at `root`.
    pub fn write(&mut self, root: &Node) -> Result<Value> {
        if root.name() != ROOT {
            return Err(BabelError::InvalidAst(format!(
                "expected a `{ROOT}` node, found `{}`",
                root.name()
            )));
        }
        let blocks = self.transform_children(root, &Visit::root())?;
        let mut meta_slot = Map::new();
        if let Some(packed) = ast::metadata(root).and_then(meta::pack) {
            meta_slot.insert(META_KEY.to_string(), packed);
        }
        Ok(json!({
            "pandoc-api-version": PANDOC_API_VERSION,
            "meta": meta_slot,
            "blocks": blocks,
        }))
    }

    fn children_array(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Value> {
        Ok(Value::Array(self.transform_children(node, visit)?))
    }

    fn header(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let inlines = self.children_array(node, visit)?;
        Ok(Transformed::One(element(
            "Header",
            json!([ast::level(node), empty_attr(), inlines]),
        )))
    }

    fn code_block(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let lang = ast::lang(node);
        let classes: Vec<&str> = if lang.is_empty() { vec![] } else { vec![lang] };
        Ok(Transformed::One(element(
            "CodeBlock",
            json!([["", classes, []], node.text_content()]),
        )))
    }

    fn code(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        Ok(Transformed::One(element(
            "Code",
            json!([empty_attr(), node.text_content()]),
        )))
    }

    fn raw_block(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let format = node.str_attr("format").unwrap_or("html");
        Ok(Transformed::One(element(
            "RawBlock",
            json!([format, node.text_content()]),
        )))
    }

    fn div(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let blocks = self.children_array(node, visit)?;
        Ok(Transformed::One(element("Div", json!([empty_attr(), blocks]))))
    }

    /// Items of a list, one array of blocks per `ListItem`.
    fn list_items(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Vec<Value>> {
        let item_visit = Visit {
            prev: None,
            next: None,
            depth: visit.depth + 1,
        };
        let mut items = Vec::new();
        for child in node.children() {
            let blocks = match child {
                Child::Node(item) if item.name() == "ListItem" => {
                    self.transform_children(item, &item_visit)?
                }
                other => self.transform(other, &item_visit)?.into_vec(),
            };
            items.push(Value::Array(blocks));
        }
        Ok(items)
    }

    fn bullet_list(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let items = self.list_items(node, visit)?;
        Ok(Transformed::One(element("BulletList", Value::Array(items))))
    }

    fn ordered_list(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let delimiter = match ast::delimiter(node) {
            ')' => "OneParen",
            _ => "Period",
        };
        let list_attrs = json!([
            ast::start(node),
            bare(ast::style(node).as_str()),
            bare(delimiter),
        ]);
        let items = self.list_items(node, visit)?;
        Ok(Transformed::One(element(
            "OrderedList",
            json!([list_attrs, items]),
        )))
    }

    fn link(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let inlines = self.children_array(node, visit)?;
        Ok(Transformed::One(element(
            node.name(),
            json!([empty_attr(), inlines, [ast::url(node), ast::title(node)]]),
        )))
    }

    fn math(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let kind = if ast::is_display_math(node) {
            "DisplayMath"
        } else {
            "InlineMath"
        };
        Ok(Transformed::One(element(
            "Math",
            json!([bare(kind), node.text_content()]),
        )))
    }

    /// Pandoc only has inline math, display math goes in its own paragraph.
    fn math_block(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let math = element("Math", json!([bare("DisplayMath"), node.text_content()]));
        Ok(Transformed::One(element("Para", json!([math]))))
    }

    fn payloadless(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        Ok(Transformed::One(bare(node.name())))
    }
}

impl TreeTransformer for AstToPandoc {
    type Output = Value;

    fn handler(&self, name: &str) -> Option<Handler<Self>> {
        match name {
            "Header" => Some(Self::header),
            "CodeBlock" => Some(Self::code_block),
            "Code" => Some(Self::code),
            "RawBlock" => Some(Self::raw_block),
            "Div" => Some(Self::div),
            "BulletList" => Some(Self::bullet_list),
            "OrderedList" => Some(Self::ordered_list),
            "Link" | "Image" => Some(Self::link),
            "Math" => Some(Self::math),
            "MathBlock" => Some(Self::math_block),
            "LineBreak" | "HorizontalRule" => Some(Self::payloadless),
            _ => None,
        }
    }

    fn transform_node(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Value>> {
        let children = self.transform_children(node, visit)?;
        let name = node.name();
        if ast::is_native(name) && !SPLICED.contains(&name) {
            Ok(Transformed::One(element(name, Value::Array(children))))
        } else {
            Ok(Transformed::Many(children))
        }
    }

    fn transform_str(&mut self, text: &str, _visit: &Visit<'_>) -> Result<Transformed<Value>> {
        if text.is_empty() {
            return Ok(Transformed::Skip);
        }
        Ok(Transformed::Many(text_tokens(text)))
    }
}

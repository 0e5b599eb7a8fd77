//! Pandoc JSON to AST
//!
//! `Str`, `Space` and `SoftBreak` tokens become string leaves which are merged back into runs of
//! text. List items get a synthetic `ListItem` wrapper. Tags without a dedicated mapping become
//! nodes of the same name whose children are the elements found in their payload.

use super::{merge_strings, meta, META_KEY};
use crate::ast::{self, attr, ListStyle, DEFAULT_BULLET_CHAR};
use crate::error::{BabelError, Result};
use crate::tree::{Child, Node};
use serde_json::{Map, Value};

fn malformed(what: &str, value: &Value) -> BabelError {
    BabelError::MalformedJson(format!("{what}: {value}"))
}

fn tag_of(value: &Value) -> Option<&str> {
    value.get("t").and_then(Value::as_str)
}

fn nth<'v>(content: &'v Value, index: usize, tag: &str) -> Result<&'v Value> {
    content
        .get(index)
        .ok_or_else(|| malformed(&format!("`{tag}` payload is too short"), content))
}

fn as_list<'v>(value: &'v Value, tag: &str) -> Result<&'v [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(&format!("`{tag}` expects a list"), value))
}

fn as_text<'v>(value: &'v Value, tag: &str) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| malformed(&format!("`{tag}` expects a string"), value))
}

/// Reader from pandoc JSON documents.
#[derive(Debug, Clone)]
pub struct PandocToAst {
    bullet_char: char,
}

impl Default for PandocToAst {
    fn default() -> Self {
        Self::new()
    }
}

impl PandocToAst {
    pub fn new() -> Self {
        PandocToAst {
            bullet_char: DEFAULT_BULLET_CHAR,
        }
    }

    /// Bullet character given to every bullet list, pandoc does not record it.
    pub fn with_bullet_char(mut self, bullet_char: char) -> Self {
        self.bullet_char = bullet_char;
        self
    }

    /// Read a full document envelope.
    pub fn read(&self, document: &Value) -> Result<Node> {
        let envelope = match document {
            Value::Object(envelope) => envelope,
            Value::Array(_) => {
                return Err(BabelError::UnsupportedEnvelope(
                    "the legacy `[meta, blocks]` layout is not supported, \
                     use pandoc 1.18 or later"
                        .to_string(),
                ))
            }
            other => return Err(malformed("expected a document object", other)),
        };
        if !envelope.contains_key("pandoc-api-version") {
            return Err(BabelError::UnsupportedEnvelope(
                "missing `pandoc-api-version`".to_string(),
            ));
        }
        let blocks = envelope
            .get("blocks")
            .ok_or_else(|| malformed("missing `blocks`", document))?;

        let mut root = ast::root(self.read_list(as_list(blocks, "blocks")?)?);
        if let Some(meta_slot) = envelope.get("meta") {
            ast::set_metadata(&mut root, self.read_metadata(meta_slot));
        }
        Ok(root)
    }

    /// Namespaced metadata wins over top-level pandoc metadata.
    fn read_metadata(&self, meta_slot: &Value) -> Map<String, Value> {
        let mut metadata = meta::unpack_map(meta_slot);
        if let Some(Value::Object(ours)) = metadata.remove(META_KEY) {
            metadata.extend(ours);
        }
        metadata
    }

    fn read_list(&self, items: &[Value]) -> Result<Vec<Child>> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            children.push(self.read_element(item)?);
        }
        Ok(merge_strings(children))
    }

    fn container(&self, name: &str, content: &Value) -> Result<Node> {
        let children = self.read_list(as_list(content, name)?)?;
        Ok(Node::new(name)?.with_children(children))
    }

    fn list_items(&self, items: &Value, tag: &str) -> Result<Vec<Child>> {
        as_list(items, tag)?
            .iter()
            .map(|blocks| {
                let children = self.read_list(as_list(blocks, tag)?)?;
                Ok(Child::from(ast::list_item(children)))
            })
            .collect()
    }

    fn read_element(&self, value: &Value) -> Result<Child> {
        let tag = tag_of(value).ok_or_else(|| malformed("element without a tag", value))?;
        let content = value.get("c").unwrap_or(&Value::Null);
        let node = match tag {
            "Str" => return Ok(Child::from(as_text(content, tag)?)),
            "Space" => return Ok(Child::from(" ")),
            "SoftBreak" => return Ok(Child::from("\n")),
            "Header" => {
                let level = nth(content, 0, tag)?.as_u64().unwrap_or(1);
                let inlines = self.read_list(as_list(nth(content, 2, tag)?, tag)?)?;
                Node::new(tag)?
                    .with_children(inlines)
                    .with_attr(attr::LEVEL, level.clamp(1, 6))
            }
            "CodeBlock" => {
                let lang = nth(content, 0, tag)?
                    .get(1)
                    .and_then(|classes| classes.get(0))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                ast::code_block(lang, as_text(nth(content, 1, tag)?, tag)?)
            }
            "Code" => ast::code(as_text(nth(content, 1, tag)?, tag)?),
            "RawBlock" => Node::new(tag)?
                .with_children([as_text(nth(content, 1, tag)?, tag)?])
                .with_attr("format", as_text(nth(content, 0, tag)?, tag)?),
            "Div" => self.container(tag, nth(content, 1, tag)?)?,
            "BulletList" => Node::new(tag)?
                .with_children(self.list_items(content, tag)?)
                .with_attr(attr::BULLET_CHAR, self.bullet_char.to_string()),
            "OrderedList" => {
                let list_attrs = nth(content, 0, tag)?;
                let start = list_attrs.get(0).and_then(Value::as_u64).unwrap_or(1);
                let style = list_attrs
                    .get(1)
                    .and_then(tag_of)
                    .and_then(ListStyle::parse)
                    .unwrap_or_default();
                let delimiter = match list_attrs.get(2).and_then(tag_of) {
                    Some("OneParen") | Some("TwoParens") => ")",
                    _ => ".",
                };
                Node::new(tag)?
                    .with_children(self.list_items(nth(content, 1, tag)?, tag)?)
                    .with_attr(attr::START, start)
                    .with_attr(attr::STYLE, style.as_str())
                    .with_attr(attr::DELIMITER, delimiter)
            }
            "Link" | "Image" => {
                let inlines = self.read_list(as_list(nth(content, 1, tag)?, tag)?)?;
                let target = nth(content, 2, tag)?;
                let url = target.get(0).and_then(Value::as_str).unwrap_or("");
                let mut node = Node::new(tag)?
                    .with_children(inlines)
                    .with_attr(attr::URL, url);
                if let Some(title) = target.get(1).and_then(Value::as_str) {
                    if !title.is_empty() {
                        node.set_attr(attr::TITLE, title);
                    }
                }
                node
            }
            "Math" => {
                let tex = as_text(nth(content, 1, tag)?, tag)?;
                let mut node = ast::math(tex);
                if tag_of(nth(content, 0, tag)?) == Some("DisplayMath") {
                    node.set_attr(attr::DISPLAY, true);
                }
                node
            }
            "Para" => {
                let para = self.container(tag, content)?;
                match display_math_only(&para) {
                    Some(tex) => ast::math_block(&tex),
                    None => para,
                }
            }
            "LineBreak" | "HorizontalRule" => Node::new(tag)?,
            "Plain" | "BlockQuote" | "Emph" | "Strong" | "Strikeout" => {
                self.container(tag, content)?
            }
            _ => Node::new(tag)?.with_children(self.payload_elements(content)?),
        };
        Ok(Child::from(node))
    }

    /// Every element found in an unknown payload, in order.
    fn payload_elements(&self, content: &Value) -> Result<Vec<Child>> {
        let mut found = Vec::new();
        self.collect_elements(content, &mut found)?;
        Ok(merge_strings(found))
    }

    fn collect_elements(&self, value: &Value, found: &mut Vec<Child>) -> Result<()> {
        match value {
            Value::Object(_) if tag_of(value).is_some() => found.push(self.read_element(value)?),
            Value::Array(items) => {
                for item in items {
                    self.collect_elements(item, found)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// The formula of a paragraph holding nothing but display math.
fn display_math_only(para: &Node) -> Option<String> {
    match para.children() {
        [Child::Node(math)] if math.name() == "Math" && ast::is_display_math(math) => {
            Some(math.text_content())
        }
        _ => None,
    }
}

//! Builders for AST nodes.
//!
//! Names are fixed here, so none of these can fail.

use super::{attr, ListStyle, ROOT};
use crate::tree::{Child, Node};

fn container<I, C>(name: &'static str, children: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    Node::named(name).with_children(children)
}

pub fn root<I, C>(blocks: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container(ROOT, blocks)
}

pub fn para<I, C>(inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Para", inlines)
}

pub fn plain<I, C>(inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Plain", inlines)
}

pub fn header<I, C>(level: u8, inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Header", inlines).with_attr(attr::LEVEL, level.clamp(1, 6))
}

pub fn code_block(lang: &str, code: &str) -> Node {
    container("CodeBlock", [code]).with_attr(attr::LANG, lang)
}

pub fn block_quote<I, C>(blocks: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("BlockQuote", blocks)
}

pub fn list_item<I, C>(blocks: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("ListItem", blocks)
}

/// Bullet list whose items are the given block sequences.
pub fn bullet_list<I, B>(items: I, bullet_char: char) -> Node
where
    I: IntoIterator<Item = B>,
    B: IntoIterator,
    B::Item: Into<Child>,
{
    container("BulletList", items.into_iter().map(list_item))
        .with_attr(attr::BULLET_CHAR, bullet_char.to_string())
}

/// Decimal ordered list whose items are the given block sequences.
pub fn ordered_list<I, B>(items: I, start: u64, delimiter: char) -> Node
where
    I: IntoIterator<Item = B>,
    B: IntoIterator,
    B::Item: Into<Child>,
{
    container("OrderedList", items.into_iter().map(list_item))
        .with_attr(attr::START, start)
        .with_attr(attr::STYLE, ListStyle::Decimal.as_str())
        .with_attr(attr::DELIMITER, delimiter.to_string())
}

pub fn math_block(tex: &str) -> Node {
    container("MathBlock", [tex])
}

pub fn horizontal_rule() -> Node {
    Node::named("HorizontalRule")
}

pub fn emph<I, C>(inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Emph", inlines)
}

pub fn strong<I, C>(inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Strong", inlines)
}

pub fn strikeout<I, C>(inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Strikeout", inlines)
}

pub fn code(text: &str) -> Node {
    container("Code", [text])
}

pub fn link<I, C>(url: &str, inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Link", inlines).with_attr(attr::URL, url)
}

pub fn image<I, C>(url: &str, inlines: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    container("Image", inlines).with_attr(attr::URL, url)
}

pub fn line_break() -> Node {
    Node::named("LineBreak")
}

pub fn math(tex: &str) -> Node {
    container("Math", [tex])
}

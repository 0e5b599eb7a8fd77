//! Markdown parsing (Markdown → AST)
//!
//! Pipeline: Markdown string → Comrak AST → docbridge AST
//!
//! Paragraphs of tight list items become `Plain` blocks, like pandoc does, so that tightness
//! survives a round trip. A paragraph holding nothing but `$$display math$$` becomes a
//! `MathBlock`.

use crate::ast::{self, attr};
use crate::error::{BabelError, Result};
use crate::pandoc::merge_strings;
use crate::tree::transformer::DEFAULT_MAX_DEPTH;
use crate::tree::{Child, Node};
use comrak::nodes::{AstNode, ListDelimType, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a Markdown string into an AST.
///
/// Documents nested deeper than [`DEFAULT_MAX_DEPTH`] fail with
/// [`BabelError::DepthExceeded`].
pub fn parse_from_markdown(source: &str) -> Result<Node> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let document = parse_document(&arena, source, &options);
    Ok(ast::root(collect_blocks(document, false, 0)?))
}

pub(super) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    options.extension.math_dollars = true;
    options
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(BabelError::DepthExceeded(DEFAULT_MAX_DEPTH));
    }
    Ok(())
}

fn collect_blocks<'a>(parent: &'a AstNode<'a>, tight: bool, depth: usize) -> Result<Vec<Child>> {
    check_depth(depth)?;
    let mut blocks = Vec::new();
    for child in parent.children() {
        if let Some(block) = convert_block(child, tight, depth)? {
            blocks.push(Child::from(block));
        }
    }
    Ok(blocks)
}

fn convert_block<'a>(node: &'a AstNode<'a>, tight: bool, depth: usize) -> Result<Option<Node>> {
    let data = node.data.borrow();
    let block = match &data.value {
        NodeValue::Paragraph => {
            let inlines = collect_inlines(node, depth + 1)?;
            match display_math(&inlines) {
                Some(tex) => ast::math_block(&tex),
                None if tight => ast::plain(inlines),
                None => ast::para(inlines),
            }
        }
        NodeValue::Heading(heading) => ast::header(heading.level, collect_inlines(node, depth + 1)?),
        NodeValue::CodeBlock(code) => {
            let lang = code.info.split_whitespace().next().unwrap_or("");
            let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            ast::code_block(lang, literal)
        }
        NodeValue::BlockQuote => ast::block_quote(collect_blocks(node, false, depth + 1)?),
        NodeValue::ThematicBreak => ast::horizontal_rule(),
        NodeValue::HtmlBlock(html) => Node::named("RawBlock")
            .with_children([html.literal.trim_end_matches('\n')])
            .with_attr("format", "html"),
        NodeValue::List(list) => {
            let mut items = Vec::new();
            for item in node.children() {
                let blocks = collect_blocks(item, list.tight, depth + 1)?;
                items.push(Child::from(ast::list_item(blocks)));
            }
            match list.list_type {
                ListType::Bullet => Node::named("BulletList")
                    .with_children(items)
                    .with_attr(attr::BULLET_CHAR, (list.bullet_char as char).to_string()),
                ListType::Ordered => {
                    let delimiter = match list.delimiter {
                        ListDelimType::Paren => ")",
                        ListDelimType::Period => ".",
                    };
                    Node::named("OrderedList")
                        .with_children(items)
                        .with_attr(attr::START, list.start as u64)
                        .with_attr(attr::STYLE, ast::ListStyle::Decimal.as_str())
                        .with_attr(attr::DELIMITER, delimiter)
                }
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(block))
}

/// The formula of a paragraph holding a single display math span.
fn display_math(inlines: &[Child]) -> Option<String> {
    match inlines {
        [Child::Node(math)] if math.name() == "Math" && ast::is_display_math(math) => {
            Some(math.text_content())
        }
        _ => None,
    }
}

fn collect_inlines<'a>(parent: &'a AstNode<'a>, depth: usize) -> Result<Vec<Child>> {
    check_depth(depth)?;
    let mut out = Vec::new();
    for child in parent.children() {
        convert_inline(child, &mut out, depth)?;
    }
    Ok(merge_strings(out))
}

fn convert_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Child>, depth: usize) -> Result<()> {
    let data = node.data.borrow();
    let inline = match &data.value {
        NodeValue::Text(text) => Child::from(text.as_str()),
        NodeValue::SoftBreak => Child::from("\n"),
        NodeValue::LineBreak => Child::from(ast::line_break()),
        NodeValue::HtmlInline(html) => Child::from(html.as_str()),
        NodeValue::Code(code) => Child::from(ast::code(&code.literal)),
        NodeValue::Emph => Child::from(ast::emph(collect_inlines(node, depth + 1)?)),
        NodeValue::Strong => Child::from(ast::strong(collect_inlines(node, depth + 1)?)),
        NodeValue::Strikethrough => Child::from(ast::strikeout(collect_inlines(node, depth + 1)?)),
        NodeValue::Link(link) | NodeValue::Image(link) => {
            let inlines = collect_inlines(node, depth + 1)?;
            let mut converted = if matches!(data.value, NodeValue::Image(_)) {
                ast::image(&link.url, inlines)
            } else {
                ast::link(&link.url, inlines)
            };
            if !link.title.is_empty() {
                converted.set_attr(attr::TITLE, link.title.as_str());
            }
            Child::from(converted)
        }
        NodeValue::Math(math) => {
            let mut converted = ast::math(&math.literal);
            if math.display_math {
                converted.set_attr(attr::DISPLAY, true);
            }
            Child::from(converted)
        }
        _ => {
            check_depth(depth + 1)?;
            for child in node.children() {
                convert_inline(child, out, depth + 1)?;
            }
            return Ok(());
        }
    };
    out.push(inline);
    Ok(())
}

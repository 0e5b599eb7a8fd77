//! Markdown serialization (AST → Markdown)
//!
//! [`MarkdownRenderer`] is a tree transformer producing strings. Block handlers append the
//! separator to the next block themselves, looking at their next sibling: one newline after a
//! `Plain` block (tight lists), a blank line otherwise.

use crate::ast::{self, ROOT};
use crate::error::{BabelError, Result};
use crate::tree::{Child, Concat, Handler, Node, Transformed, TreeTransformer, Visit};

/// Render an AST as Markdown.
pub fn serialize_to_markdown(root: &Node) -> Result<String> {
    MarkdownRenderer::new().render(root)
}

#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    bullet_char: Option<char>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer::default()
    }

    /// Bullet used for bullet lists that do not record one.
    pub fn with_bullet_char(mut self, bullet_char: char) -> Self {
        self.bullet_char = Some(bullet_char);
        self
    }

    pub fn render(&mut self, root: &Node) -> Result<String> {
        if root.name() != ROOT {
            return Err(BabelError::InvalidAst(format!(
                "expected a `{ROOT}` node, found `{}`",
                root.name()
            )));
        }
        let body = self.fold_children(root, &Visit::root(), &Concat)?;
        let body = body.trim_end_matches('\n');
        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{body}\n"))
    }

    fn inlines(&mut self, node: &Node, visit: &Visit<'_>) -> Result<String> {
        self.fold_children(node, visit, &Concat)
    }

    fn para(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let text = self.inlines(node, visit)?;
        Ok(block(text, node, visit))
    }

    fn header(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let hashes = "#".repeat(ast::level(node) as usize);
        let text = self.inlines(node, visit)?;
        Ok(block(format!("{hashes} {text}"), node, visit))
    }

    fn code_block(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let code = node.text_content();
        let fence = "`".repeat(longest_run(&code, '`').max(2) + 1);
        let lang = ast::lang(node);
        let text = format!("{fence}{lang}\n{code}\n{fence}");
        Ok(block(text, node, visit))
    }

    fn block_quote(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let inner = self.fold_children(node, visit, &Concat)?;
        let quoted: Vec<String> = inner
            .trim_end_matches('\n')
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect();
        Ok(block(quoted.join("\n"), node, visit))
    }

    fn bullet_list(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let bullet = node
            .str_attr(ast::attr::BULLET_CHAR)
            .and_then(|s| s.chars().next())
            .or(self.bullet_char)
            .unwrap_or(ast::DEFAULT_BULLET_CHAR);
        let text = self.list(node, visit, |_| format!("{bullet} "))?;
        Ok(block(text, node, visit))
    }

    fn ordered_list(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let start = ast::start(node);
        let delimiter = ast::delimiter(node);
        let text = self.list(node, visit, |index| {
            format!("{}{delimiter} ", start + index as u64)
        })?;
        Ok(block(text, node, visit))
    }

    /// Render list items with their marker, indenting continuation lines under it.
    fn list<M>(&mut self, node: &Node, visit: &Visit<'_>, marker: M) -> Result<String>
    where
        M: Fn(usize) -> String,
    {
        let separator = if is_tight(node) { "\n" } else { "\n\n" };
        let item_visit = Visit {
            prev: None,
            next: None,
            depth: visit.depth + 1,
        };
        let mut items = Vec::new();
        for (index, child) in node.children().iter().enumerate() {
            let content = match child {
                Child::Node(item) if item.name() == "ListItem" => {
                    self.fold_children(item, &item_visit, &Concat)?
                }
                other => self.transform(other, &item_visit)?.into_vec().concat(),
            };
            let prefix = marker(index);
            let indent = " ".repeat(prefix.chars().count());
            let mut lines = content.trim_end_matches('\n').split('\n');
            let mut rendered = format!("{prefix}{}", lines.next().unwrap_or(""));
            for line in lines {
                rendered.push('\n');
                if !line.is_empty() {
                    rendered.push_str(&indent);
                    rendered.push_str(line);
                }
            }
            items.push(rendered);
        }
        Ok(items.join(separator))
    }

    fn raw_block(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        Ok(block(node.text_content(), node, visit))
    }

    fn math_block(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        Ok(block(format!("$${}$$", node.text_content()), node, visit))
    }

    fn horizontal_rule(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        Ok(block("---".to_string(), node, visit))
    }

    fn wrap(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let marker = match node.name() {
            "Emph" => "*",
            "Strong" => "**",
            _ => "~~",
        };
        let text = self.inlines(node, visit)?;
        Ok(Transformed::One(format!("{marker}{text}{marker}")))
    }

    fn code(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<String>> {
        let code = node.text_content();
        let ticks = "`".repeat(longest_run(&code, '`') + 1);
        let pad = if code.starts_with('`') || code.ends_with('`') {
            " "
        } else {
            ""
        };
        Ok(Transformed::One(format!("{ticks}{pad}{code}{pad}{ticks}")))
    }

    fn link(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let text = self.inlines(node, visit)?;
        let bang = if node.name() == "Image" { "!" } else { "" };
        let url = ast::url(node);
        let title = ast::title(node);
        let target = if title.is_empty() {
            url.to_string()
        } else {
            format!("{url} \"{}\"", title.replace('"', "\\\""))
        };
        Ok(Transformed::One(format!("{bang}[{text}]({target})")))
    }

    fn line_break(&mut self, _node: &Node, _visit: &Visit<'_>) -> Result<Transformed<String>> {
        Ok(Transformed::One("\\\n".to_string()))
    }

    fn math(&mut self, node: &Node, _visit: &Visit<'_>) -> Result<Transformed<String>> {
        let dollars = if ast::is_display_math(node) { "$$" } else { "$" };
        Ok(Transformed::One(format!(
            "{dollars}{}{dollars}",
            node.text_content()
        )))
    }
}

impl TreeTransformer for MarkdownRenderer {
    type Output = String;

    fn handler(&self, name: &str) -> Option<Handler<Self>> {
        match name {
            "Para" | "Plain" => Some(Self::para),
            "Header" => Some(Self::header),
            "CodeBlock" => Some(Self::code_block),
            "BlockQuote" => Some(Self::block_quote),
            "BulletList" => Some(Self::bullet_list),
            "OrderedList" => Some(Self::ordered_list),
            "RawBlock" => Some(Self::raw_block),
            "MathBlock" => Some(Self::math_block),
            "HorizontalRule" => Some(Self::horizontal_rule),
            "Emph" | "Strong" | "Strikeout" => Some(Self::wrap),
            "Code" => Some(Self::code),
            "Link" | "Image" => Some(Self::link),
            "LineBreak" => Some(Self::line_break),
            "Math" => Some(Self::math),
            _ => None,
        }
    }

    /// Unknown nodes render their children in place.
    fn transform_node(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let text = self.fold_children(node, visit, &Concat)?;
        let holds_blocks = node
            .children()
            .iter()
            .any(|child| child.name().is_some_and(ast::is_block));
        if holds_blocks {
            let text = text.trim_end_matches('\n').to_string();
            Ok(block(text, node, visit))
        } else {
            Ok(Transformed::One(text))
        }
    }

    fn transform_str(&mut self, text: &str, _visit: &Visit<'_>) -> Result<Transformed<String>> {
        Ok(Transformed::One(text.to_string()))
    }
}

/// Block text followed by the separator its next sibling needs.
fn block(mut text: String, node: &Node, visit: &Visit<'_>) -> Transformed<String> {
    if visit.next.is_some() {
        text.push_str(if node.name() == "Plain" { "\n" } else { "\n\n" });
    }
    Transformed::One(text)
}

/// A list is tight unless one of its items holds a `Para`.
fn is_tight(list: &Node) -> bool {
    !list.children().iter().any(|item| {
        item.as_node().is_some_and(|item| {
            item.children()
                .iter()
                .any(|block| block.name() == Some("Para"))
        })
    })
}

fn longest_run(text: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

//! ASCII-art rendering of [`Node`] trees.
//!
//! Used for debugging and for diffing trees in tests. Every node is printed
//! on its own line, children are attached with box-drawing branches:
//!
//! ```text
//! root
//! ├─ Para
//! │  ├─ hello
//! │  └─ Emph
//! │     └─ world
//! └─ Header 2
//!    └─ Title
//! ```
//!
//! String leaves have their newlines escaped and are elided in the middle
//! once they exceed the label budget.

use super::node::Node;
use super::transformer::{Transformed, TreeTransformer, Visit};
use crate::error::Result;

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const PIPE: &str = "│  ";
const BLANK: &str = "   ";
const ELISION: &str = " (...) ";

/// Default number of characters kept for a string leaf.
pub const DEFAULT_MAX_LABEL: usize = 40;

/// Tree transformer producing the ASCII rendering of a tree.
pub struct TreePrinter {
    label: fn(&Node) -> String,
    max_label: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        TreePrinter {
            label: crate::ast::display_label,
            max_label: DEFAULT_MAX_LABEL,
        }
    }

    /// Use another function to label nodes.
    pub fn with_labels(mut self, label: fn(&Node) -> String) -> Self {
        self.label = label;
        self
    }

    pub fn with_max_label(mut self, max_label: usize) -> Self {
        self.max_label = max_label;
        self
    }

    pub fn print(&mut self, node: &Node) -> Result<String> {
        let out = self.transform_tree(node, &Visit::root())?;
        Ok(out.into_vec().join("\n"))
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeTransformer for TreePrinter {
    type Output = String;

    fn transform_node(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<String>> {
        let children = self.transform_children(node, visit)?;
        let mut out = (self.label)(node);
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            let last = index + 1 == count;
            for (line_index, line) in child.split('\n').enumerate() {
                let prefix = match (line_index == 0, last) {
                    (true, false) => BRANCH,
                    (true, true) => LAST_BRANCH,
                    (false, false) => PIPE,
                    (false, true) => BLANK,
                };
                out.push('\n');
                out.push_str(prefix);
                out.push_str(line);
            }
        }
        Ok(Transformed::One(out))
    }

    fn transform_str(&mut self, text: &str, _visit: &Visit<'_>) -> Result<Transformed<String>> {
        let escaped = text.replace('\n', "\\n");
        Ok(Transformed::One(shorten(&escaped, self.max_label)))
    }
}

/// Elide the middle of `text` so that it holds at most `max` characters.
pub fn shorten(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELISION.chars().count());
    let tail = keep / 2;
    let head = keep - tail;
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(len - tail).collect();
    format!("{start}{ELISION}{end}")
}

/// Render a tree with the default printer.
pub fn show_tree(node: &Node) -> Result<String> {
    TreePrinter::new().print(node)
}

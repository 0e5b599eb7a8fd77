//! Tree format
//!
//! A visual representation of the AST, one node per line, meant for debugging conversions:
//!
//! ```text
//! root
//! ├─ Header 1
//! │  └─ Title
//! └─ BulletList (*)
//!    ├─ ListItem
//!    │  └─ Plain
//!    │     └─ first item
//!    └─ ListItem
//!       └─ Plain
//!          └─ second (...) item
//! ```
//!
//! Nodes are labelled with their name plus their main attribute (level, url, start, bullet or
//! language). Text leaves are escaped and elided past the label budget. The format is output
//! only.

use crate::error::Result;
use crate::graph::{Content, Context};
use crate::tree::TreePrinter;

/// Converter `ast → tree`, eliding text leaves longer than `max_label` characters.
pub fn ast_to_tree(max_label: usize) -> impl Fn(Content, &Context) -> Result<Content> + Send + Sync {
    move |content: Content, _context: &Context| {
        let root = content.into_ast()?;
        let mut printer = TreePrinter::new().with_max_label(max_label);
        let mut rendered = printer.print(&root)?;
        rendered.push('\n');
        Ok(Content::Text(rendered))
    }
}

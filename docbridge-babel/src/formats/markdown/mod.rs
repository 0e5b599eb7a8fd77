//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the AST and CommonMark Markdown.
//!
//! # Library Choice
//!
//! Parsing is delegated to `comrak` (CommonMark compliant, with the strikethrough and dollar
//! math extensions enabled). Rendering is our own [`MarkdownRenderer`], a tree transformer, so
//! that the output follows the AST exactly instead of comrak's formatting choices.
//!
//! # Element Mapping Table
//!
//! | AST node        | Markdown                | Export Notes                    | Import Notes                       |
//! |-----------------|-------------------------|---------------------------------|------------------------------------|
//! | Para            | Paragraph               | Blank line after                | Direct                             |
//! | Plain           | Paragraph in tight list | Single newline after            | Tight list paragraphs only         |
//! | Header          | # Heading               | Level → number of `#`           | ATX and setext                     |
//! | CodeBlock       | Fenced code             | Fence grows past inner backticks| Info string first word → lang      |
//! | BlockQuote      | > quote                 | `>` on blank lines              | Direct                             |
//! | BulletList      | * item                  | Stored bullet or configured one | Bullet character kept              |
//! | OrderedList     | 1. item                 | start + index, `.` or `)`       | Start and delimiter kept           |
//! | HorizontalRule  | ---                     | Direct                          | Any thematic break                 |
//! | MathBlock       | $$x$$                   | Alone in its paragraph          | Paragraph with only display math   |
//! | RawBlock        | HTML block              | Verbatim                        | HTML blocks                        |
//! | Emph / Strong   | *x* / **x**             | Direct                          | Both `*` and `_`                   |
//! | Strikeout       | ~~x~~                   | Direct                          | Extension                          |
//! | Code            | `x`                     | Backtick count grows as needed  | Direct                             |
//! | Link / Image    | [x](url "title")        | Title when present              | Title kept when present            |
//! | LineBreak       | backslash newline       | Direct                          | Hard breaks                        |
//! | Math            | $x$                     | `$$` when display               | Extension                          |
//!
//! # Lossy Conversions
//!
//! - Setext headings come back as ATX headings
//! - `_emphasis_` comes back as `*emphasis*`
//! - Markdown special characters in text are not escaped on export
//! - Inline HTML is kept as plain text

pub mod parser;
pub mod serializer;

use crate::error::Result;
use crate::graph::{Content, Context};

pub use parser::parse_from_markdown;
pub use serializer::{serialize_to_markdown, MarkdownRenderer};

/// Converter `markdown → ast`
pub fn markdown_to_ast(content: Content, _context: &Context) -> Result<Content> {
    let source = content.into_text()?;
    Ok(Content::Ast(parse_from_markdown(&source)?))
}

/// Converter `ast → markdown`, `bullet_char` is used for lists that do not record one.
pub fn ast_to_markdown(
    bullet_char: Option<char>,
) -> impl Fn(Content, &Context) -> Result<Content> + Send + Sync {
    move |content: Content, _context: &Context| {
        let root = content.into_ast()?;
        let mut renderer = MarkdownRenderer::new();
        if let Some(bullet) = bullet_char {
            renderer = renderer.with_bullet_char(bullet);
        }
        Ok(Content::Text(renderer.render(&root)?))
    }
}

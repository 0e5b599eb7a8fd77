//! Plugins shipped with the crate.

use super::{Plugin, PluginOptions};
use crate::error::Result;
use crate::formats::markdown::{ast_to_markdown, markdown_to_ast};
use crate::formats::pandoc::{is_binary_writer, known_extension, Pandoc};
use crate::formats::tree::ast_to_tree;
use crate::graph::{Content, GraphBuilder, Language};
use crate::pandoc::PandocToAst;
use serde_json::Value;
use tracing::{debug, warn};

/// The `ast` language: pandoc JSON files holding the AST.
#[derive(Debug, Default)]
pub struct AstPlugin;

impl AstPlugin {
    /// Bullet lists read from files get `bullet_char`.
    pub fn language(bullet_char: char) -> Language {
        Language::new("ast")
            .with_file_ext(".json")
            .with_loads(move |text| {
                let document: Value = serde_json::from_str(text)?;
                let root = PandocToAst::new()
                    .with_bullet_char(bullet_char)
                    .read(&document)?;
                Ok(Content::Ast(root))
            })
            .with_equal(|a, b| {
                match (a.clone().into_ast(), b.clone().into_ast()) {
                    (Ok(a), Ok(b)) => a == b,
                    _ => a == b,
                }
            })
    }
}

impl Plugin for AstPlugin {
    fn name(&self) -> &str {
        "ast"
    }

    fn file_extensions(&self) -> Vec<String> {
        vec![".json".to_string()]
    }

    fn attach(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()> {
        builder.register_lang(Self::language(options.bullet_char))
    }
}

/// CommonMark through comrak and the Markdown renderer.
#[derive(Debug, Default)]
pub struct MarkdownPlugin;

impl Plugin for MarkdownPlugin {
    fn name(&self) -> &str {
        "markdown"
    }

    fn file_extensions(&self) -> Vec<String> {
        vec![".md".to_string()]
    }

    fn attach(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()> {
        builder.register_lang(Language::new("markdown").with_file_ext(".md"))?;
        builder.add_edge("markdown", "ast", markdown_to_ast)?;
        builder.add_edge("ast", "markdown", ast_to_markdown(Some(options.bullet_char)))
    }
}

/// ASCII tree rendering of the AST, output only.
#[derive(Debug, Default)]
pub struct TreePlugin;

impl Plugin for TreePlugin {
    fn name(&self) -> &str {
        "tree"
    }

    fn file_extensions(&self) -> Vec<String> {
        vec![".tree".to_string()]
    }

    fn attach(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()> {
        builder.register_lang(Language::new("tree").with_file_ext(".tree"))?;
        builder.add_edge("ast", "tree", ast_to_tree(options.tree_max_label))
    }
}

/// Every format the installed pandoc reads or writes.
///
/// Registers nothing when pandoc cannot be found.
#[derive(Debug, Default)]
pub struct PandocPlugin;

impl PandocPlugin {
    fn language(format: &str) -> Language {
        let mut language = Language::new(format).external();
        if let Some(ext) = known_extension(format) {
            language = language.with_file_ext(ext);
        }
        if is_binary_writer(format) {
            language = language.binary();
        }
        language
    }
}

impl Plugin for PandocPlugin {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn requires_external_tool(&self) -> bool {
        true
    }

    fn attach(&self, builder: &mut GraphBuilder, options: &PluginOptions) -> Result<()> {
        let Some(pandoc) = Pandoc::locate(options.pandoc_binary.as_deref()) else {
            debug!("pandoc not found, skipping its formats");
            return Ok(());
        };
        let (inputs, outputs) = match (pandoc.input_formats(), pandoc.output_formats()) {
            (Ok(inputs), Ok(outputs)) => (inputs, outputs),
            (Err(err), _) | (_, Err(err)) => {
                warn!(binary = %pandoc.binary().display(), error = %err, "cannot list pandoc formats");
                return Ok(());
            }
        };
        debug!(
            binary = %pandoc.binary().display(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "attaching pandoc formats"
        );
        for format in &inputs {
            builder.register_lang(Self::language(format))?;
            builder.add_edge(format, "ast", pandoc.reader(format, options.bullet_char))?;
        }
        for format in &outputs {
            builder.register_lang(Self::language(format))?;
            builder.add_edge("ast", format, pandoc.writer(format))?;
        }
        Ok(())
    }
}

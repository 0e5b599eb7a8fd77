//! AST-based conversion between markup formats
//!
//!     Every document is converted through a common tree, the AST: a `markdown -> rst`
//!     conversion parses Markdown into the AST, then writes the AST as reStructuredText. The AST
//!     mirrors pandoc's document model, so that any format pandoc knows is one converter away.
//!
//!     TLDR: for format authors:
//!         - A format is a language (name, file extension, load/dump) plus converters from and/or
//!           to `ast`. Register both through a plugin.
//!         - Converters are plain functions `Fn(Content, &Context) -> Result<Content>`.
//!         - Walking trees is done with the TreeTransformer trait, one handler per node name.
//!         - Test formats through the conversion graph (tests/graph) and in isolation (tests/<format>).
//!
//! Architecture
//!
//!     Four layers, each only using the ones above it:
//!
//!     - tree: the generic Node tree and the TreeTransformer traversal.
//!     - ast: the pandoc-like node vocabulary on top of Node, with builders and validation.
//!     - pandoc: the bridge between the AST and pandoc's JSON document model.
//!     - graph: languages and converters as a directed graph; a conversion is the shortest chain
//!       of converters (BFS) between two languages.
//!
//!     On top sit the built-in formats (formats/) and the plugins populating the graph (plugin/).
//!
//!     This is a pure lib: it powers docbridge-cli but supposes no shell environment. The only
//!     process it spawns is an external converter (pandoc or a manifest command).
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── tree                    # Node, TreeTransformer, TreePrinter
//!     ├── ast                     # node vocabulary, builders, validation
//!     ├── pandoc                  # AST <-> pandoc JSON
//!     ├── graph                   # GraphBuilder, ConversionGraph, BFS
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # comrak AST -> AST
//!     │   │   ├── serializer.rs   # AST -> Markdown text
//!     │   │   └── mod.rs
//!     │   ├── pandoc.rs           # pandoc binary
//!     │   ├── command.rs          # manifest commands
//!     │   └── tree.rs             # ASCII tree output
//!     ├── plugin                  # Plugin trait, registry, manifests, discovery
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── common                  # shared fixtures
//!     ├── markdown
//!     ├── pandoc
//!     ├── graph
//!     └── plugins
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round trips
//!
//!     Markdown to AST and back is stable for the CommonMark subset the renderer covers. The AST
//!     to pandoc JSON and back is lossless for native nodes. Nodes with foreign names are kept
//!     in the AST but elided by the pandoc writer (only their content survives), so that round
//!     trip is lossy for them.
//!
//! Library Choices
//!
//!     Markdown is parsed by comrak, everything else is offloaded to pandoc. We never write a
//!     parser for a format pandoc or a crate already handles; the work here is adapting trees.

pub mod ast;
pub mod error;
pub mod formats;
pub mod graph;
pub mod pandoc;
pub mod plugin;
pub mod tree;

pub use error::{BabelError, Result};
pub use graph::{Content, ConversionGraph, ConvertOptions, GraphBuilder, Input, Language};
pub use plugin::{discover_plugins, Plugin, PluginOptions, PluginRegistry};
pub use tree::{Child, Node, TreeTransformer};

/// Conversion graph with the built-in plugins only.
pub fn default_graph(options: &PluginOptions) -> Result<ConversionGraph> {
    PluginRegistry::with_builtins().build_graph(options)
}

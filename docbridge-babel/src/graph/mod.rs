//! Conversion graph
//!
//!     Languages are the vertices, converters the directed edges. A conversion from `a` to `b`
//!     is the shortest chain of converters linking them (breadth-first search, see path.rs),
//!     usually going through the `ast` hub: `markdown -> ast -> rst`.
//!
//!     The graph is built in two phases. Plugins register on a [`GraphBuilder`], then
//!     [`GraphBuilder::build`] freezes it into a [`ConversionGraph`] which only answers lookups
//!     and runs conversions. Nothing can be registered once conversions started.
//!
//!     .
//!     ├── builder.rs      # registration (write phase)
//!     ├── conversion.rs   # lookups and chain execution (read phase)
//!     ├── content.rs      # Content / Input sum types
//!     ├── converter.rs    # Converter trait, filters, Context
//!     ├── language.rs     # Language records
//!     └── path.rs         # BFS helpers

pub mod builder;
pub mod content;
pub mod conversion;
pub mod converter;
pub mod language;
pub mod path;

pub use builder::GraphBuilder;
pub use content::{pretty_json, Content, Input};
pub use conversion::{canonical, ConversionGraph, ConvertOptions};
pub use converter::{Context, Converter, Edge, Filter, Filters};
pub use language::Language;
pub use path::{connected_component, find_path};

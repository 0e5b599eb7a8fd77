//! Built-in formats
//!
//! The converters registered by the built-in plugins. Each module exposes plain functions or
//! closures usable as [`Converter`](crate::graph::Converter)s.

pub mod command;
pub mod markdown;
pub mod pandoc;
pub mod tree;

pub use command::CommandConverter;
pub use markdown::{parse_from_markdown, serialize_to_markdown, MarkdownRenderer};
pub use pandoc::Pandoc;

//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ AST conversion.

mod export;
mod import;
mod roundtrip;

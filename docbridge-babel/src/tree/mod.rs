//! Generic tree model
//!
//!     Everything the conversion pipeline walks is a [`Node`]: a named container whose children
//!     are sub-nodes or string leaves. The AST (see ../ast) is a vocabulary over these nodes, not
//!     a separate type, which keeps foreign nodes (names we know nothing about) representable.
//!
//!     - node.rs: the node and child types
//!     - transformer.rs: the recursive visitor every format writer is built on
//!     - printer.rs: ASCII rendering, used for debugging and the `tree` language

pub mod node;
pub mod printer;
pub mod transformer;

pub use node::{Child, Node};
pub use printer::{show_tree, TreePrinter};
pub use transformer::{
    Collect, Concat, Fold, Handler, Joined, Transformed, TreeTransformer, Visit,
};

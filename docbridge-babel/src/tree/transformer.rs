//! Generic recursive visitor over [`Node`] trees.
//!
//! A transformer resolves a handler for every node by its name through
//! [`TreeTransformer::handler`], a flat lookup from tag to function. Nodes
//! without a dedicated handler go to [`TreeTransformer::transform_node`] and
//! string leaves go to [`TreeTransformer::transform_str`].
//!
//! Handlers are responsible for descending: they call
//! [`TreeTransformer::transform_children`] when they need the transformed
//! children, or [`TreeTransformer::fold_children`] to reduce them with a
//! [`Fold`] strategy.
//!
//! Each child is visited with a [`Visit`] that exposes its immediate previous
//! and next siblings, so position-sensitive writers (e.g. "is another block
//! coming after this one?") do not need to mutate the tree.

use super::node::{Child, Node};
use crate::error::{BabelError, Result};

/// Recursion bound applied by [`TreeTransformer::transform_tree`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Position of the item being transformed among its siblings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visit<'a> {
    pub prev: Option<&'a Child>,
    pub next: Option<&'a Child>,
    pub depth: usize,
}

impl<'a> Visit<'a> {
    /// Context for the top of a tree: no siblings, depth zero.
    pub fn root() -> Self {
        Visit::default()
    }

    pub fn is_first(&self) -> bool {
        self.prev.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Name of the next sibling if it is a node
    pub fn next_name(&self) -> Option<&'a str> {
        self.next.and_then(Child::name)
    }

    /// Name of the previous sibling if it is a node
    pub fn prev_name(&self) -> Option<&'a str> {
        self.prev.and_then(Child::name)
    }
}

/// Result of transforming a single item.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed<O> {
    /// Nothing to insert in the parent
    Skip,
    One(O),
    /// Spliced into the parent's list, one level deep
    Many(Vec<O>),
}

impl<O> Transformed<O> {
    pub fn into_vec(self) -> Vec<O> {
        match self {
            Transformed::Skip => Vec::new(),
            Transformed::One(item) => vec![item],
            Transformed::Many(items) => items,
        }
    }
}

/// Per-name handler. Methods with the matching signature coerce to it.
pub type Handler<T> =
    fn(&mut T, &Node, &Visit<'_>) -> Result<Transformed<<T as TreeTransformer>::Output>>;

/// Reduction of a node's transformed children into a single value.
pub trait Fold<O> {
    type Folded;

    fn fold(&self, items: Vec<O>) -> Self::Folded;
}

/// Concatenates textual outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concat;

impl<O: AsRef<str>> Fold<O> for Concat {
    type Folded = String;

    fn fold(&self, items: Vec<O>) -> String {
        items.iter().map(AsRef::as_ref).collect()
    }
}

/// Joins textual outputs with a separator.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'s>(pub &'s str);

impl<O: AsRef<str>> Fold<O> for Joined<'_> {
    type Folded = String;

    fn fold(&self, items: Vec<O>) -> String {
        let parts: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        parts.join(self.0)
    }
}

/// Keeps the outputs as a list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collect;

impl<O> Fold<O> for Collect {
    type Folded = Vec<O>;

    fn fold(&self, items: Vec<O>) -> Vec<O> {
        items
    }
}

/// Transform a [`Node`] tree, bottom-up, by dispatching on node names.
pub trait TreeTransformer: Sized {
    type Output;

    /// Handler registered for a node name. The default has none.
    fn handler(&self, _name: &str) -> Option<Handler<Self>> {
        None
    }

    /// Fallback for nodes without a dedicated handler.
    fn transform_node(&mut self, node: &Node, visit: &Visit<'_>)
        -> Result<Transformed<Self::Output>>;

    /// Transformation of a string leaf.
    fn transform_str(&mut self, text: &str, visit: &Visit<'_>) -> Result<Transformed<Self::Output>>;

    fn max_depth(&self) -> usize {
        DEFAULT_MAX_DEPTH
    }

    /// Transform a child, node or string.
    fn transform(&mut self, child: &Child, visit: &Visit<'_>) -> Result<Transformed<Self::Output>> {
        match child {
            Child::Text(text) => self.transform_str(text, visit),
            Child::Node(node) => self.transform_tree(node, visit),
        }
    }

    /// Transform a node with the handler resolved for its name.
    fn transform_tree(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Transformed<Self::Output>> {
        if visit.depth > self.max_depth() {
            return Err(BabelError::DepthExceeded(self.max_depth()));
        }
        match self.handler(node.name()) {
            Some(handler) => handler(self, node, visit),
            None => self.transform_node(node, visit),
        }
    }

    /// Transform every child of `node` left to right.
    ///
    /// `Many` results are flattened one level and `Skip` results dropped.
    fn transform_children(&mut self, node: &Node, visit: &Visit<'_>) -> Result<Vec<Self::Output>> {
        let children = node.children();
        let mut out = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let child_visit = Visit {
                prev: index.checked_sub(1).map(|i| &children[i]),
                next: children.get(index + 1),
                depth: visit.depth + 1,
            };
            match self.transform(child, &child_visit)? {
                Transformed::Skip => {}
                Transformed::One(item) => out.push(item),
                Transformed::Many(items) => out.extend(items),
            }
        }
        Ok(out)
    }

    /// Transform the children of `node` and reduce them with `fold`.
    fn fold_children<F>(&mut self, node: &Node, visit: &Visit<'_>, fold: &F) -> Result<F::Folded>
    where
        F: Fold<Self::Output>,
    {
        let items = self.transform_children(node, visit)?;
        Ok(fold.fold(items))
    }
}

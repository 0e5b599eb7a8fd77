//! Generic named tree nodes.
//!
//! A [`Node`] is a named container with ordered children and free-form
//! attributes. Children are either sub-nodes or raw string leaves, which is
//! encoded by the [`Child`] enum so that nothing else can ever be appended.

use crate::error::{BabelError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// A child of a [`Node`]: either a sub-tree or a string leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Node(Node),
    Text(String),
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            Child::Node(_) => None,
        }
    }

    /// Name of the child node, `None` for string leaves
    pub fn name(&self) -> Option<&str> {
        self.as_node().map(|node| node.name())
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

/// A named, ordered tree node with arbitrary attributes.
///
/// Cloning a node copies the whole sub-tree, so two trees never share
/// children.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    children: Vec<Child>,
    attrs: BTreeMap<String, Value>,
}

impl Node {
    /// Create an empty node. Empty names are rejected.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BabelError::InvalidNode(
                "node names must not be empty".to_string(),
            ));
        }
        Ok(Node {
            name,
            children: Vec::new(),
            attrs: BTreeMap::new(),
        })
    }

    /// Create a node from a name known at compile time.
    pub(crate) fn named(name: &'static str) -> Self {
        debug_assert!(!name.is_empty());
        Node {
            name: name.to_string(),
            children: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the node, keeping children and attributes.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BabelError::InvalidNode(
                "node names must not be empty".to_string(),
            ));
        }
        self.name = name;
        Ok(())
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }

    pub fn set_children(&mut self, children: Vec<Child>) {
        self.children = children;
    }

    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a node or a string and return a handle to the stored child.
    pub fn add_child(&mut self, child: impl Into<Child>) -> &mut Child {
        self.children.push(child.into());
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<Value> {
        self.attrs.remove(key)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// String attribute, `None` if absent or not a string
    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Unsigned integer attribute, `None` if absent or not a non-negative integer
    pub fn u64_attr(&self, key: &str) -> Option<u64> {
        self.attrs.get(key).and_then(Value::as_u64)
    }

    /// Concatenation of every string leaf below this node, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    for child in &node.children {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Node(inner) => collect_text(inner, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(Node::new(""), Err(BabelError::InvalidNode(_))));
        assert!(matches!(Node::new("  "), Err(BabelError::InvalidNode(_))));
    }

    #[test]
    fn test_add_child_returns_stored_child() {
        let mut root = Node::new("root").unwrap();
        let child = root.add_child(Node::new("1").unwrap());
        if let Child::Node(node) = child {
            node.add_child("1.1");
        }
        root.add_child("2");

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].name(), Some("1"));
        assert_eq!(root.children()[1].as_text(), Some("2"));
        assert_eq!(root.text_content(), "1.12");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Node::new("root")
            .unwrap()
            .with_children([Node::new("a").unwrap().with_children(["x"])]);
        let mut copy = original.clone();
        if let Some(Child::Node(inner)) = copy.children_mut().get_mut(0) {
            inner.add_child("y");
        }

        assert_eq!(original.text_content(), "x");
        assert_eq!(copy.text_content(), "xy");
        assert_ne!(original, copy);
    }

    #[test]
    fn test_equality_covers_attributes() {
        let a = Node::new("Header").unwrap().with_attr("level", 1);
        let b = Node::new("Header").unwrap().with_attr("level", 2);
        assert_ne!(a, b);
        assert_eq!(a, Node::new("Header").unwrap().with_attr("level", 1));
    }
}

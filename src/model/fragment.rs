//! Owned, detached model trees
//!
//! Parsers and converters build fragments without touching the document;
//! [`crate::editing::Writer::insert_fragment`] materializes them inside a
//! batch so the insertion is logged like any other edit.

use std::collections::BTreeMap;

/// A node of an owned model tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Element {
        name: String,
        attributes: BTreeMap<String, String>,
        children: Vec<FragmentNode>,
    },
    Text(String),
}

impl FragmentNode {
    /// Element without attributes
    pub fn element(name: &str, children: Vec<FragmentNode>) -> Self {
        FragmentNode::Element {
            name: name.to_string(),
            attributes: BTreeMap::new(),
            children,
        }
    }

    pub fn text(text: &str) -> Self {
        FragmentNode::Text(text.to_string())
    }

    /// Builder-style attribute setter (no-op on text)
    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        if let FragmentNode::Element { attributes, .. } = &mut self {
            attributes.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FragmentNode::Element { name, .. } => Some(name),
            FragmentNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[FragmentNode] {
        match self {
            FragmentNode::Element { children, .. } => children,
            FragmentNode::Text(_) => &[],
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            FragmentNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            FragmentNode::Text(_) => None,
        }
    }
}

/// An ordered list of top-level fragment nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<FragmentNode>,
}

impl Fragment {
    pub fn new(nodes: Vec<FragmentNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<FragmentNode> for Fragment {
    fn from(node: FragmentNode) -> Self {
        Fragment { nodes: vec![node] }
    }
}

//! Node types stored in the document arena

use std::collections::BTreeMap;
use std::fmt;

/// Name of the synthetic root element every document owns
pub const ROOT_NAME: &str = "$root";

/// Index of a node in the document arena.
///
/// Ids are never reused: removed nodes stay in the arena (detached) so an
/// undo can put the very same node back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element node: a name, attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes are kept sorted so serialization is deterministic
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<NodeId>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

/// A node slot in the arena
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
}

impl NodeData {
    pub(crate) fn element(element: Element) -> Self {
        Self {
            kind: NodeKind::Element(element),
            parent: None,
        }
    }

    pub(crate) fn text(text: String) -> Self {
        Self {
            kind: NodeKind::Text(text),
            parent: None,
        }
    }

    /// Number of model offsets this node occupies in its parent
    pub(crate) fn offset_size(&self) -> usize {
        match &self.kind {
            NodeKind::Element(_) => 1,
            NodeKind::Text(text) => text.chars().count(),
        }
    }
}

//! Document model - an arena of element and text nodes under a single root
//!
//! All structural mutation goes through [`crate::editing::Writer`], which
//! logs every change as an [`Operation`](crate::editing::Operation). The
//! crate-private `attach`/`detach`/`replace_attribute` primitives below are
//! the only code that touches parent/child links.

use std::collections::BTreeMap;

use super::fragment::FragmentNode;
use super::node::{Element, NodeData, NodeId, NodeKind, ROOT_NAME};
use super::position::Position;

/// The document tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root element
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::element(Element::new(ROOT_NAME))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created (attached or not)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // === Node creation (detached) ===

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::element(Element::new(name)))
    }

    /// Create a detached element with attributes
    pub fn create_element_with(
        &mut self,
        name: &str,
        attributes: BTreeMap<String, String>,
    ) -> NodeId {
        let mut element = Element::new(name);
        element.attributes = attributes;
        self.push(NodeData::element(element))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::text(text.to_string()))
    }

    /// Materialize a fragment node (and its subtree) as a detached node
    pub fn create_from_fragment(&mut self, node: &FragmentNode) -> NodeId {
        match node {
            FragmentNode::Text(text) => self.create_text(text),
            FragmentNode::Element {
                name,
                attributes,
                children,
            } => {
                let id = self.create_element_with(name, attributes.clone());
                for child in children {
                    let child_id = self.create_from_fragment(child);
                    let index = self.child_count(id);
                    self.attach(child_id, id, index);
                }
                id
            }
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    // === Queries ===

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|d| &d.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id)? {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    /// Element name, `None` for text nodes
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Check whether `id` is an element called `name`
    pub fn is(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    /// Text payload, `None` for elements
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element(_) => None,
        }
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id)?.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> Option<&BTreeMap<String, String>> {
        self.element(id).map(|e| &e.attributes)
    }

    /// Children of an element (empty for text nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Children that are elements called `name`
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.is(child, name))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id)?.parent
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.child(parent, index + 1)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    /// Ancestors of `id`, nearest first, starting with `id` itself
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Nearest element called `name` among `id` and its ancestors
    pub fn find_ancestor(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.ancestors_inclusive(id).find(|&n| self.is(n, name))
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors_inclusive(id).any(|n| n == self.root)
    }

    /// Pre-order list of `id` and all its descendants
    pub fn descendants_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Number of model offsets the node occupies in its parent
    pub fn offset_size(&self, id: NodeId) -> usize {
        self.data(id).map(NodeData::offset_size).unwrap_or(0)
    }

    /// Offset just past the last child of an element
    pub fn max_offset(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .map(|&c| self.offset_size(c))
            .sum()
    }

    /// Model offset at which `id` starts inside its parent
    pub fn start_offset(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let mut offset = 0;
        for &child in self.children(parent) {
            if child == id {
                return Some(offset);
            }
            offset += self.offset_size(child);
        }
        None
    }

    /// Node that starts exactly at `offset` in `parent`
    pub fn node_at_offset(&self, parent: NodeId, offset: usize) -> Option<NodeId> {
        let mut current = 0;
        for &child in self.children(parent) {
            if current == offset {
                return Some(child);
            }
            current += self.offset_size(child);
            if current > offset {
                return None;
            }
        }
        None
    }

    /// Child index at which a node inserted at `offset` must go
    pub fn index_at_offset(&self, parent: NodeId, offset: usize) -> usize {
        let mut current = 0;
        for (index, &child) in self.children(parent).iter().enumerate() {
            if current >= offset {
                return index;
            }
            current += self.offset_size(child);
        }
        self.child_count(parent)
    }

    /// Concatenated text of a subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants_inclusive(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// An element is empty when it holds no text and no elements
    pub fn is_empty_element(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .all(|&c| self.text(c).is_some_and(str::is_empty))
    }

    /// Path of model offsets from the root down to `position`
    ///
    /// Paths compare lexicographically in document order.
    pub fn path(&self, position: &Position) -> Vec<usize> {
        let mut path = vec![position.offset];
        let mut node = position.parent;
        while let Some(offset) = self.start_offset(node) {
            path.push(offset);
            match self.parent(node) {
                Some(parent) => node = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    // === Mutation primitives (used by the writer and fragment creation) ===

    /// Insert a detached node into `parent` at child `index`
    pub(crate) fn attach(&mut self, node: NodeId, parent: NodeId, index: usize) {
        let Some(NodeKind::Element(element)) = self.nodes.get_mut(parent.0).map(|d| &mut d.kind)
        else {
            tracing::warn!("attach: {} is not an element", parent);
            return;
        };
        let index = index.min(element.children.len());
        element.children.insert(index, node);
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.parent = Some(parent);
        }
    }

    /// Detach `node` from its parent, returning where it was
    pub(crate) fn detach(&mut self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(node)?;
        let index = self.index_in_parent(node)?;
        if let Some(NodeKind::Element(element)) = self.nodes.get_mut(parent.0).map(|d| &mut d.kind)
        {
            element.children.remove(index);
        }
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.parent = None;
        }
        Some((parent, index))
    }

    /// Set (`Some`) or clear (`None`) an attribute, returning the old value
    pub(crate) fn replace_attribute(
        &mut self,
        node: NodeId,
        key: &str,
        value: Option<String>,
    ) -> Option<String> {
        let Some(NodeKind::Element(element)) = self.nodes.get_mut(node.0).map(|d| &mut d.kind)
        else {
            return None;
        };
        match value {
            Some(value) => element.attributes.insert(key.to_string(), value),
            None => element.attributes.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_with_text(doc: &mut Document, text: &str) -> NodeId {
        let p = doc.create_element("paragraph");
        let t = doc.create_text(text);
        doc.attach(t, p, 0);
        p
    }

    #[test]
    fn test_attach_and_detach() {
        let mut doc = Document::new();
        let p = paragraph_with_text(&mut doc, "foo");
        doc.attach(p, doc.root(), 0);

        assert!(doc.is_attached(p));
        assert_eq!(doc.index_in_parent(p), Some(0));

        let (parent, index) = doc.detach(p).unwrap();
        assert_eq!(parent, doc.root());
        assert_eq!(index, 0);
        assert!(!doc.is_attached(p));
        assert_eq!(doc.child_count(doc.root()), 0);
    }

    #[test]
    fn test_offsets_count_text_chars() {
        let mut doc = Document::new();
        let p = doc.create_element("paragraph");
        let a = doc.create_text("ab");
        let b = doc.create_element("softBreak");
        let c = doc.create_text("cde");
        doc.attach(a, p, 0);
        doc.attach(b, p, 1);
        doc.attach(c, p, 2);

        assert_eq!(doc.max_offset(p), 6);
        assert_eq!(doc.node_at_offset(p, 2), Some(b));
        assert_eq!(doc.node_at_offset(p, 1), None);
        assert_eq!(doc.start_offset(c), Some(3));
        assert_eq!(doc.index_at_offset(p, 3), 2);
    }

    #[test]
    fn test_find_ancestor_and_text_content() {
        let mut doc = Document::new();
        let p = paragraph_with_text(&mut doc, "hello");
        doc.attach(p, doc.root(), 0);
        let text = doc.child(p, 0).unwrap();

        assert_eq!(doc.find_ancestor(text, "paragraph"), Some(p));
        assert_eq!(doc.find_ancestor(text, "table"), None);
        assert_eq!(doc.text_content(doc.root()), "hello");
    }

    #[test]
    fn test_path_orders_positions() {
        let mut doc = Document::new();
        let first = paragraph_with_text(&mut doc, "one");
        let second = paragraph_with_text(&mut doc, "two");
        doc.attach(first, doc.root(), 0);
        doc.attach(second, doc.root(), 1);

        let a = doc.path(&Position::new(first, 3));
        let b = doc.path(&Position::new(second, 0));
        assert_eq!(a, vec![0, 3]);
        assert_eq!(b, vec![1, 0]);
        assert!(a < b);
    }

    #[test]
    fn test_replace_attribute_returns_old_value() {
        let mut doc = Document::new();
        let cell = doc.create_element("tableCell");
        assert_eq!(doc.replace_attribute(cell, "colspan", Some("2".into())), None);
        assert_eq!(
            doc.replace_attribute(cell, "colspan", Some("3".into())),
            Some("2".to_string())
        );
        assert_eq!(doc.replace_attribute(cell, "colspan", None), Some("3".to_string()));
        assert_eq!(doc.attribute(cell, "colspan"), None);
    }
}

//! The writer: the only way to mutate a document inside a change block

use std::collections::BTreeMap;

use crate::model::{Document, Fragment, NodeId, Position, Selection};

use super::operation::Operation;

/// Mutable access to the document for the duration of one batch.
///
/// Every structural change is applied immediately and appended to the
/// batch's operation log.
pub struct Writer<'a> {
    doc: &'a mut Document,
    operations: Vec<Operation>,
    selection: Selection,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(doc: &'a mut Document, selection: Selection) -> Self {
        Self {
            doc,
            operations: Vec::new(),
            selection,
        }
    }

    /// Read access to the document as edited so far
    pub fn doc(&self) -> &Document {
        self.doc
    }

    /// Operations applied so far in this batch
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub(crate) fn finish(self) -> (Vec<Operation>, Selection) {
        (self.operations, self.selection)
    }

    // === Node creation (detached, not logged until inserted) ===

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.doc.create_element(name)
    }

    pub fn create_element_with(
        &mut self,
        name: &str,
        attributes: BTreeMap<String, String>,
    ) -> NodeId {
        self.doc.create_element_with(name, attributes)
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.doc.create_text(text)
    }

    // === Structural edits ===

    /// Insert `node` into `parent` at child `index`.
    ///
    /// An attached node is moved instead.
    pub fn insert(&mut self, node: NodeId, parent: NodeId, index: usize) {
        if self.doc.parent(node).is_some() {
            self.move_to(node, parent, index);
            return;
        }
        let index = index.min(self.doc.child_count(parent));
        self.apply_operation(&Operation::Insert {
            node,
            parent,
            index,
        });
    }

    /// Insert `node` as the last child of `parent`
    pub fn append(&mut self, node: NodeId, parent: NodeId) {
        let index = self.doc.child_count(parent);
        self.insert(node, parent, index);
    }

    /// Insert `node` at a model position
    pub fn insert_at(&mut self, node: NodeId, position: Position) {
        let index = self.doc.index_at_offset(position.parent, position.offset);
        self.insert(node, position.parent, index);
    }

    /// Create a text node and insert it
    pub fn insert_text(&mut self, text: &str, parent: NodeId, index: usize) -> NodeId {
        let node = self.doc.create_text(text);
        self.insert(node, parent, index);
        node
    }

    /// Materialize a fragment and insert its top-level nodes
    pub fn insert_fragment(
        &mut self,
        fragment: &Fragment,
        parent: NodeId,
        index: usize,
    ) -> Vec<NodeId> {
        let mut inserted = Vec::with_capacity(fragment.nodes.len());
        for (i, node) in fragment.nodes.iter().enumerate() {
            let id = self.doc.create_from_fragment(node);
            self.insert(id, parent, index + i);
            inserted.push(id);
        }
        inserted
    }

    /// Detach `node` from the tree (it stays in the arena)
    pub fn remove(&mut self, node: NodeId) {
        let (Some(parent), Some(index)) = (self.doc.parent(node), self.doc.index_in_parent(node))
        else {
            tracing::debug!("writer: remove of detached node {}", node);
            return;
        };
        self.apply_operation(&Operation::Remove {
            node,
            parent,
            index,
        });
    }

    /// Move `node` to `parent` at `index` (index counted after detaching)
    pub fn move_to(&mut self, node: NodeId, parent: NodeId, index: usize) {
        let (Some(from_parent), Some(from_index)) =
            (self.doc.parent(node), self.doc.index_in_parent(node))
        else {
            self.insert(node, parent, index);
            return;
        };
        let remaining = self.doc.child_count(parent) - usize::from(from_parent == parent);
        self.apply_operation(&Operation::Move {
            node,
            from_parent,
            from_index,
            to_parent: parent,
            to_index: index.min(remaining),
        });
    }

    /// Move all children of `from` to the end of `to`
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.doc.children(from).to_vec();
        for child in children {
            self.append(child, to);
        }
    }

    /// Remove every child of `node`
    pub fn clear(&mut self, node: NodeId) {
        let children = self.doc.children(node).to_vec();
        for child in children.into_iter().rev() {
            self.remove(child);
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, key: &str, value: impl ToString) {
        let value = value.to_string();
        let old = self.doc.attribute(node, key).map(str::to_string);
        if old.as_deref() == Some(value.as_str()) {
            return;
        }
        self.apply_operation(&Operation::SetAttribute {
            node,
            key: key.to_string(),
            old,
            new: Some(value),
        });
    }

    pub fn remove_attribute(&mut self, node: NodeId, key: &str) {
        let Some(old) = self.doc.attribute(node, key).map(str::to_string) else {
            return;
        };
        self.apply_operation(&Operation::SetAttribute {
            node,
            key: key.to_string(),
            old: Some(old),
            new: None,
        });
    }

    /// Apply a pre-built operation and log it.
    ///
    /// Used for history replay. Returns false when the operation no longer
    /// fits the tree.
    pub fn apply_operation(&mut self, operation: &Operation) -> bool {
        if !operation.apply(self.doc) {
            tracing::warn!("writer: skipping stale operation {:?}", operation);
            return false;
        }
        self.operations.push(operation.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FragmentNode;

    fn writer_test<R>(f: impl FnOnce(&mut Writer) -> R) -> (Document, Vec<Operation>, R) {
        let mut doc = Document::new();
        let caret = Selection::at_start(doc.root());
        let mut writer = Writer::new(&mut doc, caret);
        let result = f(&mut writer);
        let (operations, _) = writer.finish();
        (doc, operations, result)
    }

    #[test]
    fn test_insert_and_remove_are_logged() {
        let (doc, ops, p) = writer_test(|w| {
            let p = w.create_element("paragraph");
            let root = w.doc().root();
            w.append(p, root);
            w.insert_text("foo", p, 0);
            p
        });
        assert_eq!(ops.len(), 2);
        assert_eq!(doc.text_content(p), "foo");
    }

    #[test]
    fn test_set_attribute_skips_noop() {
        let (doc, ops, cell) = writer_test(|w| {
            let cell = w.create_element("tableCell");
            w.set_attribute(cell, "colspan", 2);
            w.set_attribute(cell, "colspan", 2);
            w.remove_attribute(cell, "rowspan");
            cell
        });
        assert_eq!(ops.len(), 1);
        assert_eq!(doc.attribute(cell, "colspan"), Some("2"));
    }

    #[test]
    fn test_move_within_parent() {
        let (doc, ops, (a, b)) = writer_test(|w| {
            let root = w.doc().root();
            let a = w.create_element("paragraph");
            let b = w.create_element("paragraph");
            w.append(a, root);
            w.append(b, root);
            w.move_to(a, root, 5);
            (a, b)
        });
        assert_eq!(doc.children(doc.root()), &[b, a]);
        assert!(matches!(ops[2], Operation::Move { to_index: 1, .. }));
    }

    #[test]
    fn test_insert_fragment() {
        let fragment = Fragment::new(vec![
            FragmentNode::element("paragraph", vec![FragmentNode::text("a")]),
            FragmentNode::element("paragraph", vec![FragmentNode::text("b")]),
        ]);
        let (doc, ops, ids) = writer_test(|w| {
            let root = w.doc().root();
            w.insert_fragment(&fragment, root, 0)
        });
        assert_eq!(ops.len(), 2);
        assert_eq!(doc.text_content(ids[1]), "b");
        assert_eq!(doc.text_content(doc.root()), "ab");
    }
}

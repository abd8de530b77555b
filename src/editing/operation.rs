//! Typed structural operations recorded by the writer

use crate::model::{Document, NodeId};

/// A single structural change to the document.
///
/// Every variant carries enough state to be inverted, so a batch of
/// operations can be undone by applying the inverses in reverse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// A detached node was attached to `parent` at child `index`
    Insert {
        node: NodeId,
        parent: NodeId,
        index: usize,
    },
    /// `node` was detached from `parent`, where it sat at child `index`
    Remove {
        node: NodeId,
        parent: NodeId,
        index: usize,
    },
    /// `node` moved between (or within) parents
    Move {
        node: NodeId,
        from_parent: NodeId,
        from_index: usize,
        to_parent: NodeId,
        to_index: usize,
    },
    /// An attribute changed; `None` means absent
    SetAttribute {
        node: NodeId,
        key: String,
        old: Option<String>,
        new: Option<String>,
    },
}

impl Operation {
    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        match self {
            Operation::Insert {
                node,
                parent,
                index,
            } => Operation::Remove {
                node: *node,
                parent: *parent,
                index: *index,
            },
            Operation::Remove {
                node,
                parent,
                index,
            } => Operation::Insert {
                node: *node,
                parent: *parent,
                index: *index,
            },
            Operation::Move {
                node,
                from_parent,
                from_index,
                to_parent,
                to_index,
            } => Operation::Move {
                node: *node,
                from_parent: *to_parent,
                from_index: *to_index,
                to_parent: *from_parent,
                to_index: *from_index,
            },
            Operation::SetAttribute {
                node,
                key,
                old,
                new,
            } => Operation::SetAttribute {
                node: *node,
                key: key.clone(),
                old: new.clone(),
                new: old.clone(),
            },
        }
    }

    /// Apply the operation to the document.
    ///
    /// Returns false (and leaves the document alone) when the operation no
    /// longer matches the tree, e.g. the node to remove was already moved.
    pub(crate) fn apply(&self, doc: &mut Document) -> bool {
        match self {
            Operation::Insert {
                node,
                parent,
                index,
            } => {
                if doc.parent(*node).is_some() || *index > doc.child_count(*parent) {
                    return false;
                }
                doc.attach(*node, *parent, *index);
                true
            }
            Operation::Remove {
                node,
                parent,
                index,
            } => {
                if doc.parent(*node) != Some(*parent) || doc.index_in_parent(*node) != Some(*index)
                {
                    return false;
                }
                doc.detach(*node).is_some()
            }
            Operation::Move {
                node,
                from_parent,
                to_parent,
                to_index,
                ..
            } => {
                if doc.parent(*node) != Some(*from_parent) {
                    return false;
                }
                doc.detach(*node);
                doc.attach(*node, *to_parent, *to_index);
                true
            }
            Operation::SetAttribute { node, key, new, .. } => {
                if doc.element(*node).is_none() {
                    return false;
                }
                doc.replace_attribute(*node, key, new.clone());
                true
            }
        }
    }

    /// Parents whose child lists this operation changed
    pub fn affected_parents(&self) -> Vec<NodeId> {
        match self {
            Operation::Insert { parent, .. } | Operation::Remove { parent, .. } => vec![*parent],
            Operation::Move {
                from_parent,
                to_parent,
                ..
            } => vec![*from_parent, *to_parent],
            Operation::SetAttribute { .. } => Vec::new(),
        }
    }

    /// The node the operation is about
    pub fn node(&self) -> NodeId {
        match self {
            Operation::Insert { node, .. }
            | Operation::Remove { node, .. }
            | Operation::Move { node, .. }
            | Operation::SetAttribute { node, .. } => *node,
        }
    }
}

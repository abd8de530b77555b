//! Positions and selections in the document tree
//!
//! A position is a model offset inside an element: text nodes count one
//! offset per character, element children count one each.

use std::cmp::Ordering;

use super::document::Document;
use super::node::NodeId;

/// A place between two offsets of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub parent: NodeId,
    pub offset: usize,
}

impl Position {
    pub const fn new(parent: NodeId, offset: usize) -> Self {
        Self { parent, offset }
    }

    /// Position right before `node` in its parent
    pub fn before(doc: &Document, node: NodeId) -> Option<Self> {
        Some(Self::new(doc.parent(node)?, doc.start_offset(node)?))
    }

    /// Position right after `node` in its parent
    pub fn after(doc: &Document, node: NodeId) -> Option<Self> {
        let before = Self::before(doc, node)?;
        Some(Self::new(before.parent, before.offset + doc.offset_size(node)))
    }

    /// Document-order comparison
    pub fn compare(&self, other: &Position, doc: &Document) -> Ordering {
        if self.parent == other.parent {
            return self.offset.cmp(&other.offset);
        }
        doc.path(self).cmp(&doc.path(other))
    }
}

/// A selection with anchor (fixed point) and head (moving point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the caret is (moving point)
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no range)
    pub fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Select the whole content of an element
    pub fn in_element(doc: &Document, element: NodeId) -> Self {
        Self::new(
            Position::new(element, 0),
            Position::new(element, doc.max_offset(element)),
        )
    }

    /// Caret at the start of an element
    pub fn at_start(element: NodeId) -> Self {
        Self::collapsed(Position::new(element, 0))
    }

    /// Select `node` itself as an object (range from before to after it)
    pub fn on(doc: &Document, node: NodeId) -> Option<Self> {
        Some(Self::new(
            Position::before(doc, node)?,
            Position::after(doc, node)?,
        ))
    }

    /// Check if selection is collapsed (anchor == head)
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// The earlier of anchor and head
    pub fn first_position(&self, doc: &Document) -> Position {
        match self.anchor.compare(&self.head, doc) {
            Ordering::Greater => self.head,
            _ => self.anchor,
        }
    }

    /// The later of anchor and head
    pub fn last_position(&self, doc: &Document) -> Position {
        match self.anchor.compare(&self.head, doc) {
            Ordering::Greater => self.anchor,
            _ => self.head,
        }
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self, doc: &Document) -> bool {
        self.head.compare(&self.anchor, doc) == Ordering::Less
    }

    /// The element enclosed by the selection, if it spans exactly one element
    pub fn selected_element(&self, doc: &Document) -> Option<NodeId> {
        if self.anchor.parent != self.head.parent {
            return None;
        }
        let start = self.anchor.offset.min(self.head.offset);
        let end = self.anchor.offset.max(self.head.offset);
        if end != start + 1 {
            return None;
        }
        let node = doc.node_at_offset(self.anchor.parent, start)?;
        doc.element(node).map(|_| node)
    }

    /// Whether both ends still point into attached elements and valid offsets
    pub fn is_valid(&self, doc: &Document) -> bool {
        [self.anchor, self.head].iter().all(|pos| {
            doc.element(pos.parent).is_some()
                && doc.is_attached(pos.parent)
                && pos.offset <= doc.max_offset(pos.parent)
        })
    }
}

//! Batches: the unit of change, history and notification

use crate::model::Selection;

use super::operation::Operation;

/// Why a batch was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchKind {
    /// A regular edit, recorded in history
    #[default]
    Default,
    /// Applied by undo
    Undo,
    /// Applied by redo
    Redo,
    /// Not recorded in history (e.g. loading data)
    Transparent,
}

/// All operations applied by one `Editor::change` call, post-fixer
/// edits included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub operations: Vec<Operation>,
    pub selection_before: Selection,
    pub selection_after: Selection,
    pub kind: BatchKind,
}

impl Batch {
    /// The batch that reverts this one
    pub fn inverse(&self, kind: BatchKind) -> Batch {
        Batch {
            operations: self.operations.iter().rev().map(Operation::inverse).collect(),
            selection_before: self.selection_after,
            selection_after: self.selection_before,
            kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

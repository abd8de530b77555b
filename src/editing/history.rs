//! Edit history (undo/redo) over committed batches.

use super::batch::Batch;

/// Edit history with undo/redo stacks.
///
/// Both stacks hold batches exactly as they were applied: undoing pops a
/// batch from the undo stack, the editor applies its inverse, and the
/// applied inverse goes onto the redo stack (and vice versa). Post-fixer
/// edits made while undoing are therefore part of what redo reverts.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<Batch>,
    redo_stack: Vec<Batch>,
    max_size: usize,
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push a new user batch onto the undo stack (clears redo stack)
    pub fn push(&mut self, batch: Batch) {
        self.redo_stack.clear();
        self.push_undo(batch);
    }

    fn push_undo(&mut self, batch: Batch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max size
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the batch to undo
    pub fn pop_undo(&mut self) -> Option<Batch> {
        self.undo_stack.pop()
    }

    /// Pop the batch to redo
    pub fn pop_redo(&mut self) -> Option<Batch> {
        self.redo_stack.pop()
    }

    /// Record the batch an undo actually applied
    pub fn push_undone(&mut self, applied: Batch) {
        self.redo_stack.push(applied);
    }

    /// Record the batch a redo actually applied (keeps the redo stack)
    pub fn push_redone(&mut self, applied: Batch) {
        self.push_undo(applied);
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of batches in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of batches in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

//! Transactional editing: typed operations, batches, writer and history

mod batch;
pub mod history;
mod operation;
mod writer;

pub use batch::{Batch, BatchKind};
pub use history::EditHistory;
pub use operation::Operation;
pub use writer::Writer;

/// A batch-completion hook.
///
/// Called exactly once per batch, after the change block and before the
/// batch is recorded or announced. Returns true when it changed anything.
pub type PostFixer = fn(&mut Writer<'_>) -> bool;

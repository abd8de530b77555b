//! tessera - table document-model engine
//!
//! A small tree document model (arena, positions, schema, transactional
//! writer with undo) and table support built on it: grid geometry, a
//! post-fixer that keeps every table rectangular, table commands, Tab
//! navigation between cells and conversion to and from HTML.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod convert;
pub mod editing;
pub mod editor;
pub mod import;
pub mod input;
pub mod markup;
pub mod model;
pub mod table;
pub mod tracing;

// Re-export commonly used types
pub use config::EngineConfig;
pub use editor::{Command, Editor};
pub use model::{Document, NodeId, Selection};
pub use table::{table_editor, TableCommandId};

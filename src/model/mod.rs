//! Document model
//!
//! An arena of element and text nodes under a `$root` element, plus the
//! position/selection types that point into it and the schema registry that
//! describes which elements may appear where.

pub mod document;
pub mod fragment;
pub mod markup;
pub mod node;
pub mod position;
pub mod schema;

pub use document::Document;
pub use fragment::{Fragment, FragmentNode};
pub use node::{Element, NodeId, NodeKind, ROOT_NAME};
pub use position::{Position, Selection};
pub use schema::{ElementDefinition, Schema};

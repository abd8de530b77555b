//! Tag-tree reader shared by the model markup and the view HTML parsers
//!
//! Built on tree-sitter-html, which never gives up on malformed input: stray
//! end tags, unclosed elements and junk between tags all produce a best-effort
//! tree. Text is recovered from the source byte ranges between child nodes so
//! whitespace and entities survive exactly as written.

mod escape;
mod reader;

pub use escape::{decode_entities, escape_attribute, escape_text};
pub use reader::{read_tags, TagNode};

/// Error type for markup parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The tree-sitter parser could not be set up or gave no tree
    Parser(String),
    /// A selection marker (`[` or `]`) is missing its counterpart
    UnbalancedSelection,
    /// More than one selection range was marked
    MultipleSelections,
    /// An element the reader does not know how to convert
    UnexpectedElement(String),
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupError::Parser(msg) => write!(f, "Markup parser error: {}", msg),
            MarkupError::UnbalancedSelection => {
                write!(f, "Selection markers are unbalanced (expected '[' and ']')")
            }
            MarkupError::MultipleSelections => write!(f, "Only one selection range is supported"),
            MarkupError::UnexpectedElement(name) => write!(f, "Unexpected element <{}>", name),
        }
    }
}

impl std::error::Error for MarkupError {}

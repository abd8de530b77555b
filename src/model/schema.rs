//! Schema registry: which elements may live where
//!
//! The schema only declares rules. Nothing here rejects edits; callers ask
//! `allows_child` when they need to pick an insertion point.

use std::collections::HashMap;

use super::node::ROOT_NAME;

/// Pseudo child name standing for text nodes
pub const TEXT: &str = "$text";

/// Rules for one element kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: String,
    /// Parents this element may be inserted into
    pub allowed_in: Vec<String>,
    /// Attributes the element carries
    pub allowed_attributes: Vec<String>,
    /// Whether text may be a direct child
    pub allows_text: bool,
    /// Selectable as a whole (e.g. a table)
    pub is_object: bool,
    /// Selection and editing do not cross its boundary (e.g. a cell)
    pub is_limit: bool,
}

impl ElementDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn allow_in(mut self, parents: &[&str]) -> Self {
        self.allowed_in
            .extend(parents.iter().map(|p| p.to_string()));
        self
    }

    pub fn attributes(mut self, attributes: &[&str]) -> Self {
        self.allowed_attributes
            .extend(attributes.iter().map(|a| a.to_string()));
        self
    }

    pub fn with_text(mut self) -> Self {
        self.allows_text = true;
        self
    }

    pub fn object(mut self) -> Self {
        self.is_object = true;
        self
    }

    pub fn limit(mut self) -> Self {
        self.is_limit = true;
        self
    }
}

/// All registered element definitions
#[derive(Debug, Clone)]
pub struct Schema {
    definitions: HashMap<String, ElementDefinition>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Schema with the root and paragraphs registered
    pub fn new() -> Self {
        let mut schema = Self {
            definitions: HashMap::new(),
        };
        schema.register(ElementDefinition::new(ROOT_NAME).limit());
        schema.register(
            ElementDefinition::new("paragraph")
                .allow_in(&[ROOT_NAME])
                .with_text(),
        );
        schema
    }

    /// Register (or replace) a definition
    pub fn register(&mut self, definition: ElementDefinition) {
        tracing::trace!("schema: registering {}", definition.name);
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// Add an extra allowed parent to an existing definition
    pub fn extend_allowed_in(&mut self, name: &str, parent: &str) {
        if let Some(definition) = self.definitions.get_mut(name) {
            if !definition.allowed_in.iter().any(|p| p == parent) {
                definition.allowed_in.push(parent.to_string());
            }
        }
    }

    pub fn definition(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Whether `child` (an element name or [`TEXT`]) may be placed in `parent`
    pub fn allows_child(&self, parent: &str, child: &str) -> bool {
        if child == TEXT {
            return self
                .definition(parent)
                .is_some_and(|definition| definition.allows_text);
        }
        self.definition(child)
            .is_some_and(|definition| definition.allowed_in.iter().any(|p| p == parent))
    }

    pub fn allows_attribute(&self, element: &str, attribute: &str) -> bool {
        self.definition(element)
            .is_some_and(|d| d.allowed_attributes.iter().any(|a| a == attribute))
    }

    pub fn is_object(&self, name: &str) -> bool {
        self.definition(name).is_some_and(|d| d.is_object)
    }

    pub fn is_limit(&self, name: &str) -> bool {
        self.definition(name).is_some_and(|d| d.is_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_allowed_in_root() {
        let schema = Schema::new();
        assert!(schema.allows_child(ROOT_NAME, "paragraph"));
        assert!(schema.allows_child("paragraph", TEXT));
        assert!(!schema.allows_child(ROOT_NAME, TEXT));
    }

    #[test]
    fn test_unknown_elements_are_not_allowed() {
        let schema = Schema::new();
        assert!(!schema.allows_child(ROOT_NAME, "widget"));
        assert!(!schema.is_object("widget"));
    }

    #[test]
    fn test_extend_allowed_in() {
        let mut schema = Schema::new();
        schema.register(ElementDefinition::new("box").allow_in(&[ROOT_NAME]).object());
        schema.extend_allowed_in("box", "paragraph");
        schema.extend_allowed_in("box", "paragraph");

        assert!(schema.allows_child("paragraph", "box"));
        assert_eq!(schema.definition("box").unwrap().allowed_in.len(), 2);
        assert!(schema.is_object("box"));
    }
}

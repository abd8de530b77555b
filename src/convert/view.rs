//! View tree: the HTML-shaped output of downcasting

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of the view tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewNode {
    Element(ViewElement),
    Text(String),
}

impl ViewNode {
    pub fn text(text: &str) -> Self {
        ViewNode::Text(text.to_string())
    }

    pub fn as_element(&self) -> Option<&ViewElement> {
        match self {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text(_) => None,
        }
    }
}

impl From<ViewElement> for ViewNode {
    fn from(element: ViewElement) -> Self {
        ViewNode::Element(element)
    }
}

/// A view element: tag name, attributes, children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<ViewNode>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: impl Into<ViewNode>) {
        self.children.push(child.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Whether the `class` attribute lists `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Child elements called `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ViewElement> {
        self.children
            .iter()
            .filter_map(ViewNode::as_element)
            .filter(move |e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_class() {
        let figure = ViewElement::new("figure").with_attribute("class", "image table wide");
        assert!(figure.has_class("table"));
        assert!(!figure.has_class("tab"));
    }

    #[test]
    fn test_serializes_as_json() {
        let td = ViewElement::new("td").with_children(vec![ViewNode::text("a")]);
        let json = serde_json::to_string(&ViewNode::from(td)).unwrap();
        assert_eq!(json, r#"{"element":{"name":"td","children":[{"text":"a"}]}}"#);
    }
}

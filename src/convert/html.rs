//! HTML text ⇄ view tree

use std::fmt::Write;

use crate::markup::{escape_attribute, escape_text, read_tags, MarkupError, TagNode};

use super::view::{ViewElement, ViewNode};

/// Parse HTML into view nodes. Tag and attribute names are lowercased.
pub fn parse(source: &str) -> Result<Vec<ViewNode>, MarkupError> {
    Ok(read_tags(source)?.into_iter().map(to_view).collect())
}

fn to_view(node: TagNode) -> ViewNode {
    match node {
        TagNode::Text(text) => ViewNode::Text(text),
        TagNode::Element {
            name,
            attributes,
            children,
        } => {
            let mut element = ViewElement::new(&name.to_ascii_lowercase())
                .with_children(children.into_iter().map(to_view).collect());
            for (key, value) in attributes {
                element.attributes.entry(key.to_ascii_lowercase()).or_insert(value);
            }
            element.into()
        }
    }
}

/// Serialize view nodes as HTML
pub fn stringify(nodes: &[ViewNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &ViewNode) {
    match node {
        ViewNode::Text(text) => out.push_str(&escape_text(text)),
        ViewNode::Element(element) => {
            let _ = write!(out, "<{}", element.name);
            for (key, value) in &element.attributes {
                let _ = write!(out, " {}=\"{}\"", key, escape_attribute(value));
            }
            out.push('>');
            for child in &element.children {
                write_node(out, child);
            }
            let _ = write!(out, "</{}>", element.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases_names() {
        let nodes = parse(r#"<TD COLSPAN="2">a</TD>"#).unwrap();
        let td = nodes[0].as_element().unwrap();
        assert_eq!(td.name, "td");
        assert_eq!(td.attribute("colspan"), Some("2"));
    }

    #[test]
    fn test_stringify_escapes() {
        let p = ViewElement::new("p")
            .with_attribute("title", "a\"b")
            .with_children(vec![ViewNode::text("x < y & z")]);
        assert_eq!(
            stringify(&[p.into()]),
            r#"<p title="a&quot;b">x &lt; y &amp; z</p>"#
        );
    }
}

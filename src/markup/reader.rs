//! tree-sitter-html backed tag reader

use tree_sitter::{Node, Parser};

use super::escape::decode_entities;
use super::MarkupError;

/// A node of the generic tag tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagNode {
    Element {
        /// Tag name exactly as written
        name: String,
        /// Attributes in source order, values decoded
        attributes: Vec<(String, String)>,
        children: Vec<TagNode>,
    },
    Text(String),
}

impl TagNode {
    pub fn name(&self) -> Option<&str> {
        match self {
            TagNode::Element { name, .. } => Some(name),
            TagNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[TagNode] {
        match self {
            TagNode::Element { children, .. } => children,
            TagNode::Text(_) => &[],
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            TagNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str()),
            TagNode::Text(_) => None,
        }
    }

    /// True for text nodes made only of whitespace
    pub fn is_blank_text(&self) -> bool {
        matches!(self, TagNode::Text(text) if text.trim().is_empty())
    }
}

/// Parse markup into a list of top-level tag nodes
pub fn read_tags(source: &str) -> Result<Vec<TagNode>, MarkupError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|e| MarkupError::Parser(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| MarkupError::Parser("parser returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!("markup has syntax errors, reading tolerantly");
    }

    Ok(read_content(root, 0, source.len(), source))
}

/// Read the content of `container` between byte offsets `start` and `end`
fn read_content(container: Node<'_>, start: usize, end: usize, source: &str) -> Vec<TagNode> {
    let mut out = Vec::new();
    let mut consumed = start;

    for child in boundary_children(container) {
        if child.start_byte() < consumed || child.end_byte() > end {
            continue;
        }
        push_text(&mut out, slice(source, consumed, child.start_byte()));
        if child.kind() == "element" {
            if let Some(element) = read_element(child, source) {
                out.push(element);
            }
        }
        // Comments, doctypes, script/style bodies and stray tags are dropped.
        consumed = child.end_byte();
    }

    push_text(&mut out, slice(source, consumed, end));
    out
}

/// Named children that interrupt text runs, with ERROR nodes flattened
fn boundary_children<'t>(container: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = container.walk();
    let children: Vec<Node<'t>> = container.named_children(&mut cursor).collect();

    let mut out = Vec::new();
    for child in children {
        match child.kind() {
            "text" | "entity" => {}
            "start_tag" | "self_closing_tag" | "end_tag" if container.kind() == "element" => {}
            "ERROR" => out.extend(boundary_children(child)),
            _ => out.push(child),
        }
    }
    out
}

fn read_element(node: Node<'_>, source: &str) -> Option<TagNode> {
    let mut cursor = node.walk();
    let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();

    let mut tag = None;
    let mut self_closing = false;
    let mut content_end = node.end_byte();
    for part in &parts {
        match part.kind() {
            "start_tag" => tag = Some(*part),
            "self_closing_tag" => {
                tag = Some(*part);
                self_closing = true;
            }
            "end_tag" => content_end = part.start_byte(),
            _ => {}
        }
    }
    let tag = tag?;

    let mut name = String::new();
    let mut attributes = Vec::new();
    let mut tag_cursor = tag.walk();
    let tag_parts: Vec<Node<'_>> = tag.named_children(&mut tag_cursor).collect();
    for part in tag_parts {
        match part.kind() {
            "tag_name" => name = node_text(part, source).to_string(),
            "attribute" => {
                if let Some(attribute) = read_attribute(part, source) {
                    attributes.push(attribute);
                }
            }
            _ => {}
        }
    }
    if name.is_empty() {
        return None;
    }

    let children = if self_closing {
        Vec::new()
    } else {
        read_content(node, tag.end_byte(), content_end, source)
    };

    Some(TagNode::Element {
        name,
        attributes,
        children,
    })
}

fn read_attribute(node: Node<'_>, source: &str) -> Option<(String, String)> {
    let mut cursor = node.walk();
    let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();

    let mut name = None;
    let mut value = String::new();
    for part in parts {
        match part.kind() {
            "attribute_name" => name = Some(node_text(part, source).to_string()),
            "attribute_value" => value = decode_entities(node_text(part, source)),
            "quoted_attribute_value" => {
                let raw = node_text(part, source);
                let inner = raw
                    .strip_prefix(['"', '\''])
                    .and_then(|r| r.strip_suffix(['"', '\'']))
                    .unwrap_or("");
                value = decode_entities(inner);
            }
            _ => {}
        }
    }
    name.map(|n| (n, value))
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    slice(source, node.start_byte(), node.end_byte())
}

fn slice(source: &str, start: usize, end: usize) -> &str {
    source.get(start..end).unwrap_or("")
}

fn push_text(out: &mut Vec<TagNode>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = decode_entities(raw);
    if let Some(TagNode::Text(last)) = out.last_mut() {
        last.push_str(&decoded);
    } else {
        out.push(TagNode::Text(decoded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element_names(nodes: &[TagNode]) -> Vec<&str> {
        nodes.iter().filter_map(TagNode::name).collect()
    }

    #[test]
    fn test_read_nested_elements() {
        let nodes = read_tags("<table><tr><td>foo</td></tr></table>").unwrap();
        assert_eq!(element_names(&nodes), vec!["table"]);

        let tr = &nodes[0].children()[0];
        let td = &tr.children()[0];
        assert_eq!(td.name(), Some("td"));
        assert_eq!(td.children(), &[TagNode::Text("foo".to_string())]);
    }

    #[test]
    fn test_read_attributes() {
        let nodes = read_tags(r#"<td colspan="2" rowspan=3 data-x="a &amp; b">x</td>"#).unwrap();
        assert_eq!(nodes[0].attribute("colspan"), Some("2"));
        assert_eq!(nodes[0].attribute("rowspan"), Some("3"));
        assert_eq!(nodes[0].attribute("data-x"), Some("a & b"));
    }

    #[test]
    fn test_text_keeps_whitespace_and_markers() {
        let nodes = read_tags("[<p> a b </p>]").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], TagNode::Text("[".to_string()));
        assert_eq!(nodes[1].children(), &[TagNode::Text(" a b ".to_string())]);
        assert_eq!(nodes[2], TagNode::Text("]".to_string()));
    }

    #[test]
    fn test_case_preserved_for_custom_tags() {
        let nodes = read_tags("<tableRow><tableCell></tableCell></tableRow>").unwrap();
        assert_eq!(nodes[0].name(), Some("tableRow"));
        assert_eq!(nodes[0].children()[0].name(), Some("tableCell"));
        assert!(nodes[0].children()[0].children().is_empty());
    }

    #[test]
    fn test_comments_are_dropped() {
        let nodes = read_tags("<p>a<!-- note -->b</p>").unwrap();
        assert_eq!(
            nodes[0].children(),
            &[TagNode::Text("a".to_string()), TagNode::Text("b".to_string())]
        );
    }
}

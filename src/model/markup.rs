//! Model markup: a compact textual form of the document tree
//!
//! Elements are written with their model names and attributes
//! (`<table headingRows="1"><tableRow><tableCell>foo</tableCell>...`).
//! A selection is marked with `[` and `]` inside text or between elements;
//! `[]` is a collapsed caret.

use std::collections::BTreeMap;

use crate::markup::{escape_attribute, escape_text, read_tags, MarkupError, TagNode};

use super::document::Document;
use super::fragment::{Fragment, FragmentNode};
use super::node::{NodeId, NodeKind};
use super::position::{Position, Selection};

/// Where a selection marker sits inside a parsed fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPosition {
    /// Child indices from the fragment's top level down to the containing
    /// element. Empty when the marker sits between top-level nodes.
    pub path: Vec<usize>,
    /// Model offset inside the containing element
    pub offset: usize,
}

/// Result of parsing model markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkup {
    pub fragment: Fragment,
    /// `(anchor, head)` when the source carried selection markers
    pub selection: Option<(MarkerPosition, MarkerPosition)>,
}

impl ParsedMarkup {
    /// Map the markers onto nodes after the fragment was inserted
    ///
    /// `inserted` are the ids of the fragment's top-level nodes, inserted
    /// into `parent` starting at model offset `base_offset`.
    pub fn resolve_selection(
        &self,
        doc: &Document,
        inserted: &[NodeId],
        parent: NodeId,
        base_offset: usize,
    ) -> Option<Selection> {
        let (anchor, head) = self.selection.as_ref()?;
        let resolve = |marker: &MarkerPosition| -> Option<Position> {
            let Some((&first, rest)) = marker.path.split_first() else {
                return Some(Position::new(parent, base_offset + marker.offset));
            };
            let mut node = *inserted.get(first)?;
            for &index in rest {
                node = doc.child(node, index)?;
            }
            Some(Position::new(node, marker.offset))
        };
        Some(Selection::new(resolve(anchor)?, resolve(head)?))
    }
}

/// Parse model markup into a fragment plus optional selection markers
pub fn parse(source: &str) -> Result<ParsedMarkup, MarkupError> {
    let tags = read_tags(source)?;

    let mut markers = Markers::default();
    let nodes = convert_children(&tags, &[], true, &mut markers)?;

    let selection = match (markers.anchor, markers.head) {
        (None, None) => None,
        (Some(anchor), Some(head)) => Some((anchor, head)),
        _ => return Err(MarkupError::UnbalancedSelection),
    };

    Ok(ParsedMarkup {
        fragment: Fragment::new(nodes),
        selection,
    })
}

#[derive(Default)]
struct Markers {
    anchor: Option<MarkerPosition>,
    head: Option<MarkerPosition>,
}

impl Markers {
    fn open(&mut self, path: &[usize], offset: usize) -> Result<(), MarkupError> {
        if self.anchor.is_some() {
            return Err(MarkupError::MultipleSelections);
        }
        self.anchor = Some(MarkerPosition {
            path: path.to_vec(),
            offset,
        });
        Ok(())
    }

    fn close(&mut self, path: &[usize], offset: usize) -> Result<(), MarkupError> {
        if self.anchor.is_none() {
            return Err(MarkupError::UnbalancedSelection);
        }
        if self.head.is_some() {
            return Err(MarkupError::MultipleSelections);
        }
        self.head = Some(MarkerPosition {
            path: path.to_vec(),
            offset,
        });
        Ok(())
    }
}

fn convert_children(
    tags: &[TagNode],
    path: &[usize],
    top_level: bool,
    markers: &mut Markers,
) -> Result<Vec<FragmentNode>, MarkupError> {
    let mut out: Vec<FragmentNode> = Vec::new();
    let mut offset = 0;

    for tag in tags {
        match tag {
            TagNode::Text(raw) => {
                let mut text = String::new();
                for ch in raw.chars() {
                    match ch {
                        '[' => markers.open(path, offset + text.chars().count())?,
                        ']' => markers.close(path, offset + text.chars().count())?,
                        _ => text.push(ch),
                    }
                }
                // Layout whitespace between block tags is not content.
                let layout_only = text.trim().is_empty() && (top_level || text.contains('\n'));
                if text.is_empty() || layout_only {
                    continue;
                }
                offset += text.chars().count();
                match out.last_mut() {
                    Some(FragmentNode::Text(last)) => last.push_str(&text),
                    _ => out.push(FragmentNode::Text(text)),
                }
            }
            TagNode::Element {
                name,
                attributes,
                children,
            } => {
                let mut child_path = path.to_vec();
                child_path.push(out.len());
                let children = convert_children(children, &child_path, false, markers)?;
                let attributes: BTreeMap<String, String> = attributes.iter().cloned().collect();
                out.push(FragmentNode::Element {
                    name: name.clone(),
                    attributes,
                    children,
                });
                offset += 1;
            }
        }
    }

    Ok(out)
}

/// Stringify the children of the root, with optional selection markers
pub fn stringify(doc: &Document, selection: Option<&Selection>) -> String {
    let markers = MarkerSet::new(doc, selection);
    let mut out = String::new();
    write_children(doc, doc.root(), &markers, &mut out);
    out
}

/// Stringify a single node (the node itself and its subtree)
pub fn stringify_node(doc: &Document, node: NodeId) -> String {
    let markers = MarkerSet::new(doc, None);
    let mut out = String::new();
    write_node(doc, node, &markers, &mut out);
    out
}

/// Selection markers to weave into the output
struct MarkerSet {
    entries: Vec<(Position, &'static str)>,
}

impl MarkerSet {
    fn new(doc: &Document, selection: Option<&Selection>) -> Self {
        let entries = match selection {
            None => Vec::new(),
            Some(sel) if sel.is_collapsed() => vec![(sel.anchor, "[]")],
            Some(sel) => vec![
                (sel.first_position(doc), "["),
                (sel.last_position(doc), "]"),
            ],
        };
        Self { entries }
    }

    fn write_at(&self, parent: NodeId, offset: usize, out: &mut String) {
        for (position, marker) in &self.entries {
            if position.parent == parent && position.offset == offset {
                out.push_str(marker);
            }
        }
    }
}

fn write_children(doc: &Document, parent: NodeId, markers: &MarkerSet, out: &mut String) {
    let mut offset = 0;
    for &child in doc.children(parent) {
        match doc.kind(child) {
            Some(NodeKind::Text(text)) => {
                for ch in text.chars() {
                    markers.write_at(parent, offset, out);
                    out.push_str(&escape_text(ch.encode_utf8(&mut [0; 4])));
                    offset += 1;
                }
            }
            Some(NodeKind::Element(_)) => {
                markers.write_at(parent, offset, out);
                write_node(doc, child, markers, out);
                offset += 1;
            }
            None => {}
        }
    }
    markers.write_at(parent, offset, out);
}

fn write_node(doc: &Document, node: NodeId, markers: &MarkerSet, out: &mut String) {
    match doc.kind(node) {
        Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
        Some(NodeKind::Element(element)) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attributes {
                out.push_str(&format!(" {}=\"{}\"", key, escape_attribute(value)));
            }
            out.push('>');
            write_children(doc, node, markers, out);
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_parsed(doc: &mut Document, parsed: &ParsedMarkup) -> Vec<NodeId> {
        let root = doc.root();
        let mut ids = Vec::new();
        for node in &parsed.fragment.nodes {
            let id = doc.create_from_fragment(node);
            let index = doc.child_count(root);
            doc.attach(id, root, index);
            ids.push(id);
        }
        ids
    }

    #[test]
    fn test_parse_table_markup() {
        let parsed = parse(
            "<table headingRows=\"1\"><tableRow><tableCell>a</tableCell></tableRow></table>",
        )
        .unwrap();
        let table = &parsed.fragment.nodes[0];
        assert_eq!(table.name(), Some("table"));
        assert_eq!(table.attribute("headingRows"), Some("1"));
        let cell = &table.children()[0].children()[0];
        assert_eq!(cell.children(), &[FragmentNode::text("a")]);
        assert!(parsed.selection.is_none());
    }

    #[test]
    fn test_collapsed_marker_in_empty_cell() {
        let parsed = parse("<table><tableRow><tableCell>[]</tableCell></tableRow></table>").unwrap();
        let (anchor, head) = parsed.selection.clone().unwrap();
        assert_eq!(anchor, head);
        assert_eq!(anchor.path, vec![0, 0, 0]);
        assert_eq!(anchor.offset, 0);
        assert!(parsed.fragment.nodes[0].children()[0].children()[0]
            .children()
            .is_empty());
    }

    #[test]
    fn test_range_markers_inside_text() {
        let parsed = parse("<paragraph>f[oo]</paragraph>").unwrap();
        let (anchor, head) = parsed.selection.clone().unwrap();
        assert_eq!((anchor.offset, head.offset), (1, 3));
        assert_eq!(parsed.fragment.nodes[0].children(), &[FragmentNode::text("foo")]);
    }

    #[test]
    fn test_object_selection_between_top_level_nodes() {
        let parsed = parse("<paragraph>x</paragraph>[<table></table>]").unwrap();
        let (anchor, head) = parsed.selection.clone().unwrap();
        assert!(anchor.path.is_empty());
        assert_eq!((anchor.offset, head.offset), (1, 2));
    }

    #[test]
    fn test_unbalanced_markers() {
        assert_eq!(
            parse("<paragraph>[foo</paragraph>"),
            Err(MarkupError::UnbalancedSelection)
        );
        assert_eq!(
            parse("<paragraph>]foo</paragraph>"),
            Err(MarkupError::UnbalancedSelection)
        );
        assert_eq!(
            parse("<paragraph>[a][b]</paragraph>"),
            Err(MarkupError::MultipleSelections)
        );
    }

    #[test]
    fn test_stringify_round_trip_with_selection() {
        let source = "<paragraph>foo</paragraph><table headingRows=\"1\"><tableRow><tableCell>1[2]</tableCell><tableCell></tableCell></tableRow></table>";
        let parsed = parse(source).unwrap();
        let mut doc = Document::new();
        let ids = insert_parsed(&mut doc, &parsed);
        let selection = parsed.resolve_selection(&doc, &ids, doc.root(), 0).unwrap();

        assert_eq!(stringify(&doc, Some(&selection)), source);
    }

    #[test]
    fn test_stringify_escapes_text() {
        let parsed = parse("<paragraph>a &lt; b</paragraph>").unwrap();
        let mut doc = Document::new();
        let ids = insert_parsed(&mut doc, &parsed);
        assert_eq!(doc.text_content(ids[0]), "a < b");
        assert_eq!(stringify_node(&doc, ids[0]), "<paragraph>a &lt; b</paragraph>");
    }

    #[test]
    fn test_layout_whitespace_is_dropped() {
        let parsed = parse("<table>\n  <tableRow>\n    <tableCell> x </tableCell>\n  </tableRow>\n</table>\n")
            .unwrap();
        assert_eq!(parsed.fragment.nodes.len(), 1);
        let row = &parsed.fragment.nodes[0].children()[0];
        assert_eq!(parsed.fragment.nodes[0].children().len(), 1);
        assert_eq!(row.children()[0].children(), &[FragmentNode::text(" x ")]);
    }
}

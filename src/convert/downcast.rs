//! Model → view conversion
//!
//! A table becomes `figure.table > table > (thead?, tbody?) > tr > (th|td)`.
//! Cells in heading rows or starting in heading columns render as `th`.
//! A `th` in a heading row that also starts in a heading column carries
//! `scope="row"`, so the column boundary survives tables whose rows are
//! all heading rows.

use crate::model::{Document, NodeId, NodeKind};
use crate::table::utils::{
    heading_columns, heading_rows, rows, COLSPAN, ROWSPAN, TABLE, TABLE_CELL,
};
use crate::table::walker::TableWalker;

use super::view::{ViewElement, ViewNode};

pub(super) const SCOPE: &str = "scope";

/// View tree of the whole document
pub fn downcast_document(doc: &Document) -> Vec<ViewNode> {
    downcast_children(doc, doc.root())
}

fn downcast_children(doc: &Document, parent: NodeId) -> Vec<ViewNode> {
    doc.children(parent)
        .iter()
        .filter_map(|&child| downcast_node(doc, child))
        .collect()
}

fn downcast_node(doc: &Document, node: NodeId) -> Option<ViewNode> {
    match doc.kind(node)? {
        NodeKind::Text(text) => Some(ViewNode::Text(text.clone())),
        NodeKind::Element(element) => Some(match element.name.as_str() {
            TABLE => downcast_table(doc, node).into(),
            "paragraph" => ViewElement::new("p")
                .with_children(downcast_children(doc, node))
                .into(),
            name => {
                let mut view = ViewElement::new(name).with_children(downcast_children(doc, node));
                view.attributes = element.attributes.clone();
                view.into()
            }
        }),
    }
}

/// View tree of one table
pub fn downcast_table(doc: &Document, table: NodeId) -> ViewElement {
    let row_count = rows(doc, table).len();
    let heading_rows = heading_rows(doc, table).min(row_count);
    let heading_columns = heading_columns(doc, table);

    let mut trs: Vec<ViewElement> = (0..row_count).map(|_| ViewElement::new("tr")).collect();
    for slot in TableWalker::new(doc, table) {
        if !doc.is(slot.cell, TABLE_CELL) {
            continue;
        }
        let in_heading_row = slot.row < heading_rows;
        let in_heading_column = slot.column < heading_columns;
        let mut cell = ViewElement::new(if in_heading_row || in_heading_column { "th" } else { "td" })
            .with_children(downcast_children(doc, slot.cell));
        if in_heading_row && in_heading_column {
            cell = cell.with_attribute(SCOPE, "row");
        }
        if slot.colspan > 1 {
            cell = cell.with_attribute(COLSPAN, slot.colspan);
        }
        if slot.rowspan > 1 {
            cell = cell.with_attribute(ROWSPAN, slot.rowspan);
        }
        trs[slot.row].push(cell);
    }

    let body = trs.split_off(heading_rows);
    let mut view_table = ViewElement::new("table");
    if !trs.is_empty() {
        view_table.push(ViewElement::new("thead").with_children(into_nodes(trs)));
    }
    if !body.is_empty() {
        view_table.push(ViewElement::new("tbody").with_children(into_nodes(body)));
    }

    ViewElement::new("figure")
        .with_attribute("class", "table")
        .with_children(vec![view_table.into()])
}

fn into_nodes(elements: Vec<ViewElement>) -> Vec<ViewNode> {
    elements.into_iter().map(ViewNode::from).collect()
}

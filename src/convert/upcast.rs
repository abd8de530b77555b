//! View → model conversion
//!
//! Accepts `figure.table` wrappers or bare `table` elements, with or
//! without `thead`/`tbody`. Rows in the leading `thead` become heading
//! rows. The heading column count is the shortest leading run of heading
//! slots over the body rows (over all rows when every row is a heading
//! row), counted in grid columns with row spans carried down. Elements the
//! schema does not allow at their place are dropped, unknown elements are
//! unwrapped.

use crate::model::schema::TEXT;
use crate::model::{Fragment, FragmentNode, Schema, ROOT_NAME};
use crate::table::utils::{parse_span, COLSPAN, HEADING_COLUMNS, HEADING_ROWS, ROWSPAN, TABLE, TABLE_CELL, TABLE_ROW};

use super::downcast::SCOPE;
use super::view::{ViewElement, ViewNode};

const PARAGRAPH: &str = "paragraph";

/// Convert a view tree into a model fragment for the root
pub fn upcast(nodes: &[ViewNode], schema: &Schema) -> Fragment {
    let converted = upcast_children(nodes, ROOT_NAME, schema);

    // Loose text at the root is wrapped in paragraphs.
    let mut out: Vec<FragmentNode> = Vec::new();
    for node in converted {
        match node {
            FragmentNode::Text(text) => match out.last_mut() {
                Some(FragmentNode::Element { name, children, .. }) if name == "$auto" => {
                    children.push(FragmentNode::Text(text));
                }
                _ => out.push(FragmentNode::element("$auto", vec![FragmentNode::Text(text)])),
            },
            element => out.push(element),
        }
    }
    for node in &mut out {
        if let FragmentNode::Element { name, .. } = node {
            if name == "$auto" {
                *name = PARAGRAPH.to_string();
            }
        }
    }
    Fragment::new(out)
}

/// Convert the children of a view element placed into model `parent`
fn upcast_children(nodes: &[ViewNode], parent: &str, schema: &Schema) -> Vec<FragmentNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            ViewNode::Text(text) => {
                if text.trim().is_empty() && (parent == ROOT_NAME || text.contains('\n')) {
                    continue;
                }
                // Text at the root is kept here and wrapped by the caller.
                if parent == ROOT_NAME || schema.allows_child(parent, TEXT) {
                    push_text(&mut out, text);
                }
            }
            ViewNode::Element(element) => upcast_element(element, parent, schema, &mut out),
        }
    }
    out
}

fn upcast_element(element: &ViewElement, parent: &str, schema: &Schema, out: &mut Vec<FragmentNode>) {
    let name = element.name.to_ascii_lowercase();
    match name.as_str() {
        "figure" if element.has_class("table") || element.children_named("table").next().is_some() => {
            for child in element.children.iter().filter_map(ViewNode::as_element) {
                if child.name.eq_ignore_ascii_case("table") {
                    upcast_element(child, parent, schema, out);
                }
            }
        }
        "table" => {
            if schema.allows_child(parent, TABLE) {
                out.push(upcast_table(element, schema));
            } else {
                tracing::debug!("upcast: dropping table not allowed in {}", parent);
            }
        }
        "p" => {
            let paragraph = FragmentNode::element(PARAGRAPH, upcast_children(&element.children, PARAGRAPH, schema));
            if schema.allows_child(parent, PARAGRAPH) {
                out.push(paragraph);
            } else {
                // Flatten into the parent (e.g. a cell holding text).
                for child in paragraph.children() {
                    if let FragmentNode::Text(text) = child {
                        push_text(out, text);
                    }
                }
            }
        }
        "br" => {
            if parent == ROOT_NAME || schema.allows_child(parent, TEXT) {
                push_text(out, "\n");
            }
        }
        _ => {
            for child in upcast_children(&element.children, parent, schema) {
                match child {
                    FragmentNode::Text(text) => push_text(out, &text),
                    element => out.push(element),
                }
            }
        }
    }
}

fn push_text(out: &mut Vec<FragmentNode>, text: &str) {
    match out.last_mut() {
        Some(FragmentNode::Text(last)) => last.push_str(text),
        _ => out.push(FragmentNode::Text(text.to_string())),
    }
}

/// Rows of a view table, with the number of leading heading rows
fn collect_rows(table: &ViewElement) -> (Vec<&ViewElement>, usize) {
    let mut rows = Vec::new();
    let mut heading_rows = 0;
    for child in table.children.iter().filter_map(ViewNode::as_element) {
        match child.name.to_ascii_lowercase().as_str() {
            "thead" => {
                let before = rows.len();
                rows.extend(section_rows(child));
                if before == heading_rows {
                    heading_rows = rows.len();
                }
            }
            "tbody" | "tfoot" => rows.extend(section_rows(child)),
            "tr" => rows.push(child),
            _ => {}
        }
    }
    (rows, heading_rows)
}

fn section_rows(section: &ViewElement) -> impl Iterator<Item = &ViewElement> {
    section
        .children
        .iter()
        .filter_map(ViewNode::as_element)
        .filter(|e| e.name.eq_ignore_ascii_case("tr"))
}

fn is_cell(element: &ViewElement) -> bool {
    element.name.eq_ignore_ascii_case("td") || element.name.eq_ignore_ascii_case("th")
}

fn view_cells(row: &ViewElement) -> impl Iterator<Item = &ViewElement> {
    row.children
        .iter()
        .filter_map(ViewNode::as_element)
        .filter(|e| is_cell(e))
}

/// Whether a view cell heads its columns.
///
/// In a body row any `th` does. In a heading row every cell is a `th`, so
/// only the ones marked `scope="row"` count.
fn heads_column(cell: &ViewElement, in_heading_row: bool) -> bool {
    cell.name.eq_ignore_ascii_case("th")
        && (!in_heading_row || cell.attribute(SCOPE).is_some_and(|s| s.eq_ignore_ascii_case("row")))
}

/// Leading heading columns shared by the rows.
///
/// Rows are laid out like the model walker does: slots still covered by a
/// rowspan from above are skipped before the next cell is placed, and take
/// the heading status of their anchor cell.
fn heading_column_count(rows: &[&ViewElement], heading_rows: usize) -> usize {
    // Per grid column: rows still covered below, and whether the anchor heads.
    let mut overlaps: Vec<(usize, bool)> = Vec::new();
    let mut runs = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let in_heading_row = index < heading_rows;
        let covered: Vec<Option<bool>> = overlaps
            .iter_mut()
            .map(|(remaining, heads)| {
                (*remaining > 0).then(|| {
                    *remaining -= 1;
                    *heads
                })
            })
            .collect();

        let mut slots = Vec::new();
        let mut cells = view_cells(row);
        let mut column = 0;
        loop {
            if let Some(Some(heads)) = covered.get(column) {
                slots.push(*heads);
                column += 1;
                continue;
            }
            let Some(cell) = cells.next() else {
                break;
            };
            let colspan = parse_span(cell.attribute(COLSPAN));
            let rowspan = parse_span(cell.attribute(ROWSPAN));
            let heads = heads_column(cell, in_heading_row);
            if overlaps.len() < column + colspan {
                overlaps.resize(column + colspan, (0, false));
            }
            for slot in &mut overlaps[column..column + colspan] {
                *slot = (rowspan - 1, heads);
            }
            slots.extend(std::iter::repeat(heads).take(colspan));
            column += colspan;
        }

        runs.push(slots.iter().take_while(|&&heads| heads).count());
    }

    let considered = if heading_rows < runs.len() {
        &runs[heading_rows..]
    } else {
        &runs[..]
    };
    considered.iter().copied().min().unwrap_or(0)
}

fn upcast_table(table: &ViewElement, schema: &Schema) -> FragmentNode {
    let (rows, heading_rows) = collect_rows(table);

    let heading_columns = heading_column_count(&rows, heading_rows);

    let model_rows = rows
        .iter()
        .map(|row| {
            let cells = view_cells(row).map(|cell| upcast_cell(cell, schema)).collect();
            FragmentNode::element(TABLE_ROW, cells)
        })
        .collect();

    let mut node = FragmentNode::element(TABLE, model_rows);
    if heading_rows > 0 {
        node = node.with_attribute(HEADING_ROWS, heading_rows);
    }
    if heading_columns > 0 {
        node = node.with_attribute(HEADING_COLUMNS, heading_columns);
    }
    node
}

fn upcast_cell(cell: &ViewElement, schema: &Schema) -> FragmentNode {
    let mut node = FragmentNode::element(TABLE_CELL, upcast_children(&cell.children, TABLE_CELL, schema));
    for key in [COLSPAN, ROWSPAN] {
        let span = parse_span(cell.attribute(key));
        if span > 1 {
            node = node.with_attribute(key, span);
        }
    }
    node
}

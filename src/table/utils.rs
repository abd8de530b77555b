//! Attribute access and selection queries for table elements

use crate::editing::Writer;
use crate::model::{Document, NodeId, Selection};

pub const TABLE: &str = "table";
pub const TABLE_ROW: &str = "tableRow";
pub const TABLE_CELL: &str = "tableCell";

pub const HEADING_ROWS: &str = "headingRows";
pub const HEADING_COLUMNS: &str = "headingColumns";
pub const COLSPAN: &str = "colspan";
pub const ROWSPAN: &str = "rowspan";

/// Largest `colspan`/`rowspan` the engine lays out. Larger values are
/// read as this one.
pub const MAX_SPAN: usize = 1000;

/// Numeric value of a span attribute; digit strings too long to parse
/// saturate
fn span_number(value: Option<&str>) -> Option<u128> {
    let v = value?.trim();
    v.parse::<u128>()
        .ok()
        .or_else(|| (!v.is_empty() && v.bytes().all(|b| b.is_ascii_digit())).then_some(u128::MAX))
}

/// Parse a span attribute; absent, non-numeric or zero values mean 1
pub fn parse_span(value: Option<&str>) -> usize {
    span_number(value)
        .filter(|&v| v >= 1)
        .map_or(1, |v| v.min(MAX_SPAN as u128) as usize)
}

/// Whether a span attribute holds a number above `MAX_SPAN`
pub fn is_oversized_span(value: Option<&str>) -> bool {
    span_number(value).is_some_and(|v| v > MAX_SPAN as u128)
}

/// Parse a heading attribute; absent or non-numeric values mean 0
pub fn parse_heading(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

pub fn colspan(doc: &Document, cell: NodeId) -> usize {
    parse_span(doc.attribute(cell, COLSPAN))
}

pub fn rowspan(doc: &Document, cell: NodeId) -> usize {
    parse_span(doc.attribute(cell, ROWSPAN))
}

pub fn heading_rows(doc: &Document, table: NodeId) -> usize {
    parse_heading(doc.attribute(table, HEADING_ROWS))
}

pub fn heading_columns(doc: &Document, table: NodeId) -> usize {
    parse_heading(doc.attribute(table, HEADING_COLUMNS))
}

/// Set `colspan`/`rowspan`; a span of 1 removes the attribute
pub fn set_span(writer: &mut Writer<'_>, cell: NodeId, key: &str, value: usize) {
    if value > 1 {
        writer.set_attribute(cell, key, value);
    } else {
        writer.remove_attribute(cell, key);
    }
}

/// Set `headingRows`/`headingColumns`; 0 removes the attribute
pub fn set_heading(writer: &mut Writer<'_>, table: NodeId, key: &str, value: usize) {
    if value > 0 {
        writer.set_attribute(table, key, value);
    } else {
        writer.remove_attribute(table, key);
    }
}

/// Row elements of a table, in order
pub fn rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    doc.children_named(table, TABLE_ROW).collect()
}

/// Cell elements of a row, in order
pub fn cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.children_named(row, TABLE_CELL).collect()
}

/// Create a detached empty cell with the given spans
pub fn create_cell(writer: &mut Writer<'_>, colspan: usize, rowspan: usize) -> NodeId {
    let cell = writer.create_element(TABLE_CELL);
    set_span(writer, cell, COLSPAN, colspan);
    set_span(writer, cell, ROWSPAN, rowspan);
    cell
}

/// Create a detached empty 1×1 cell
pub fn create_empty_cell(writer: &mut Writer<'_>) -> NodeId {
    writer.create_element(TABLE_CELL)
}

/// Cell containing the start of the selection
pub fn selected_cell(doc: &Document, selection: &Selection) -> Option<NodeId> {
    let position = selection.first_position(doc);
    doc.find_ancestor(position.parent, TABLE_CELL)
}

/// Table that is object-selected or contains the selection start
pub fn selected_table(doc: &Document, selection: &Selection) -> Option<NodeId> {
    if let Some(element) = selection.selected_element(doc) {
        if doc.is(element, TABLE) {
            return Some(element);
        }
    }
    let position = selection.first_position(doc);
    doc.find_ancestor(position.parent, TABLE)
}

/// Table owning a cell (cell → row → table)
pub fn table_of_cell(doc: &Document, cell: NodeId) -> Option<NodeId> {
    let row = doc.parent(cell)?;
    let table = doc.parent(row)?;
    doc.is(table, TABLE).then_some(table)
}

/// Row index of a row element inside its table
pub fn row_index(doc: &Document, row: NodeId) -> Option<usize> {
    let table = doc.parent(row)?;
    rows(doc, table).iter().position(|&r| r == row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span(None), 1);
        assert_eq!(parse_span(Some("3")), 3);
        assert_eq!(parse_span(Some("0")), 1);
        assert_eq!(parse_span(Some("-2")), 1);
        assert_eq!(parse_span(Some("wide")), 1);
    }

    #[test]
    fn test_parse_span_clamps_to_max() {
        assert_eq!(parse_span(Some("1000")), MAX_SPAN);
        assert_eq!(parse_span(Some("1001")), MAX_SPAN);
        assert_eq!(parse_span(Some("3000000000")), MAX_SPAN);
        assert_eq!(parse_span(Some("999999999999999999999999999999999999999999")), MAX_SPAN);

        assert!(is_oversized_span(Some("1001")));
        assert!(is_oversized_span(Some("999999999999999999999999999999999999999999")));
        assert!(!is_oversized_span(Some("1000")));
        assert!(!is_oversized_span(Some("abc")));
        assert!(!is_oversized_span(None));
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading(None), 0);
        assert_eq!(parse_heading(Some("2")), 2);
        assert_eq!(parse_heading(Some("x")), 0);
    }
}

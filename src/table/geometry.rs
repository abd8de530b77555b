//! Grid geometry over a table: widths, cell coordinates and header status
//!
//! Everything here is recomputed from the live document on each call.

use crate::model::{Document, NodeId};

use super::utils::{heading_columns, heading_rows, rows, table_of_cell};
use super::walker::TableWalker;

/// Derived facts about one cell (or one covered slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCellInfo {
    pub cell: NodeId,
    pub row: usize,
    pub start_column: usize,
    /// Exclusive end of the occupied column range
    pub end_column: usize,
    pub is_header_row: bool,
    pub is_header_column: bool,
    /// False when describing a slot covered by another cell's span
    pub is_anchor: bool,
}

/// Effective width of each row: its own colspans plus the columns covered
/// by rowspans from rows above
pub fn row_widths(doc: &Document, table: NodeId) -> Vec<usize> {
    let mut widths = vec![0; rows(doc, table).len()];
    for slot in TableWalker::new(doc, table).include_spanned() {
        widths[slot.row] += 1;
    }
    widths
}

/// Width of the widest row
pub fn column_count(doc: &Document, table: NodeId) -> usize {
    row_widths(doc, table).into_iter().max().unwrap_or(0)
}

pub fn row_count(doc: &Document, table: NodeId) -> usize {
    rows(doc, table).len()
}

/// Info for the `cell_index`-th physical cell of row `row`
pub fn cell_info(
    doc: &Document,
    table: NodeId,
    row: usize,
    cell_index: usize,
) -> Option<TableCellInfo> {
    let slot = TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .find(|slot| slot.cell_index == cell_index)?;
    Some(info_for(doc, table, slot.cell, row, slot.column, slot.colspan, true))
}

/// Info for the grid slot at (`row`, `column`)
pub fn slot_info(doc: &Document, table: NodeId, row: usize, column: usize) -> Option<TableCellInfo> {
    let slot = TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .include_spanned()
        .find(|slot| slot.column == column)?;
    Some(info_for(
        doc,
        table,
        slot.cell,
        row,
        slot.anchor_column,
        slot.colspan,
        slot.is_anchor(),
    ))
}

fn info_for(
    doc: &Document,
    table: NodeId,
    cell: NodeId,
    row: usize,
    start_column: usize,
    colspan: usize,
    is_anchor: bool,
) -> TableCellInfo {
    TableCellInfo {
        cell,
        row,
        start_column,
        end_column: start_column + colspan,
        is_header_row: row < heading_rows(doc, table),
        is_header_column: start_column < heading_columns(doc, table),
        is_anchor,
    }
}

/// Grid coordinates (row, column) of a cell's anchor slot
pub fn cell_location(doc: &Document, cell: NodeId) -> Option<(usize, usize)> {
    let table = table_of_cell(doc, cell)?;
    TableWalker::new(doc, table)
        .find(|slot| slot.cell == cell)
        .map(|slot| (slot.row, slot.column))
}

/// The cell occupying (`row`, `column`), whether as anchor or by span
pub fn cell_at(doc: &Document, table: NodeId, row: usize, column: usize) -> Option<NodeId> {
    TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .include_spanned()
        .find(|slot| slot.column == column)
        .map(|slot| slot.cell)
}

/// The full grid: each slot holds the cell covering it, `None` for holes
pub fn grid(doc: &Document, table: NodeId) -> Vec<Vec<Option<NodeId>>> {
    let columns = column_count(doc, table);
    let mut grid = vec![vec![None; columns]; row_count(doc, table)];
    for slot in TableWalker::new(doc, table).include_spanned() {
        if let Some(entry) = grid[slot.row].get_mut(slot.column) {
            *entry = Some(slot.cell);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::markup;
    use crate::table::utils::cells;

    fn load(source: &str) -> (Document, NodeId) {
        let parsed = markup::parse(source).unwrap();
        let mut doc = Document::new();
        let table = doc.create_from_fragment(&parsed.fragment.nodes[0]);
        let root = doc.root();
        doc.attach(table, root, 0);
        (doc, table)
    }

    #[test]
    fn test_widths_count_carried_rowspans() {
        let (doc, table) = load(
            "<table>\
            <tableRow><tableCell colspan=\"6\">00</tableCell></tableRow>\
            <tableRow><tableCell rowspan=\"2\">10</tableCell><tableCell>11</tableCell><tableCell colspan=\"3\">12</tableCell></tableRow>\
            <tableRow><tableCell>21</tableCell><tableCell>22</tableCell></tableRow>\
            </table>",
        );
        assert_eq!(row_widths(&doc, table), vec![6, 5, 3]);
        assert_eq!(column_count(&doc, table), 6);
    }

    #[test]
    fn test_cell_info_and_headers() {
        let (doc, table) = load(
            "<table headingRows=\"1\" headingColumns=\"1\">\
            <tableRow><tableCell>a</tableCell><tableCell>b</tableCell></tableRow>\
            <tableRow><tableCell colspan=\"2\">c</tableCell></tableRow>\
            </table>",
        );
        let b = cell_info(&doc, table, 0, 1).unwrap();
        assert_eq!((b.start_column, b.end_column), (1, 2));
        assert!(b.is_header_row);
        assert!(!b.is_header_column);

        let c = cell_info(&doc, table, 1, 0).unwrap();
        assert_eq!((c.start_column, c.end_column), (0, 2));
        assert!(!c.is_header_row);
        assert!(c.is_header_column);
        assert!(cell_info(&doc, table, 1, 1).is_none());
    }

    #[test]
    fn test_slot_info_for_covered_slot() {
        let (doc, table) = load(
            "<table>\
            <tableRow><tableCell rowspan=\"2\">a</tableCell><tableCell>b</tableCell></tableRow>\
            <tableRow><tableCell>c</tableCell></tableRow>\
            </table>",
        );
        let covered = slot_info(&doc, table, 1, 0).unwrap();
        assert!(!covered.is_anchor);
        let a = cells(&doc, rows(&doc, table)[0])[0];
        assert_eq!(covered.cell, a);
        assert_eq!(cell_at(&doc, table, 1, 0), Some(a));

        let c = cells(&doc, rows(&doc, table)[1])[0];
        assert_eq!(cell_location(&doc, c), Some((1, 1)));
    }

    #[test]
    fn test_grid_leaves_holes() {
        let (doc, table) = load(
            "<table>\
            <tableRow><tableCell>a</tableCell><tableCell>b</tableCell></tableRow>\
            <tableRow><tableCell>c</tableCell></tableRow>\
            </table>",
        );
        let grid = grid(&doc, table);
        assert_eq!(grid.len(), 2);
        assert!(grid[1][1].is_none());
        assert!(grid[0].iter().all(Option::is_some));
    }
}

//! Row-major iteration over the grid slots of a table
//!
//! Rows are processed one at a time. Rowspans reaching down from earlier
//! rows are tracked in a flat per-column array of remaining row counts,
//! so a slot covered from above is skipped before the next physical cell
//! is placed.

use std::collections::VecDeque;

use crate::model::{Document, NodeId};

use super::utils::{cells, colspan, rows, rowspan};

/// One slot of the table grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    pub row: usize,
    pub column: usize,
    /// The anchor cell occupying the slot
    pub cell: NodeId,
    pub colspan: usize,
    pub rowspan: usize,
    /// For anchors: the cell's index in its row element. For spanned
    /// slots: the index a cell inserted at this slot would get.
    pub cell_index: usize,
    /// True when the slot is covered by a span rather than holding the
    /// anchor itself
    pub is_spanned: bool,
    pub anchor_row: usize,
    pub anchor_column: usize,
}

impl CellSlot {
    pub fn is_anchor(&self) -> bool {
        !self.is_spanned
    }
}

#[derive(Debug, Clone, Copy)]
struct Overlap {
    remaining: usize,
    cell: NodeId,
    colspan: usize,
    rowspan: usize,
    anchor_row: usize,
    anchor_column: usize,
}

/// Iterator over [`CellSlot`]s
pub struct TableWalker<'a> {
    doc: &'a Document,
    rows: Vec<NodeId>,
    start_row: usize,
    end_row: Option<usize>,
    include_spanned: bool,
    next_row: usize,
    overlaps: Vec<Option<Overlap>>,
    buffer: VecDeque<CellSlot>,
}

impl<'a> TableWalker<'a> {
    pub fn new(doc: &'a Document, table: NodeId) -> Self {
        Self {
            doc,
            rows: rows(doc, table),
            start_row: 0,
            end_row: None,
            include_spanned: false,
            next_row: 0,
            overlaps: Vec::new(),
            buffer: VecDeque::new(),
        }
    }

    /// Skip slots of rows before `row`
    pub fn start_row(mut self, row: usize) -> Self {
        self.start_row = row;
        self
    }

    /// Stop after `row` (inclusive)
    pub fn end_row(mut self, row: usize) -> Self {
        self.end_row = Some(row);
        self
    }

    /// Also yield slots covered by colspans and rowspans
    pub fn include_spanned(mut self) -> Self {
        self.include_spanned = true;
        self
    }

    fn last_row(&self) -> Option<usize> {
        let last = self.rows.len().checked_sub(1)?;
        Some(self.end_row.map_or(last, |end| end.min(last)))
    }

    /// Walk one row, filling the buffer when the row is in range
    fn walk_row(&mut self, row: usize) {
        let emit = row >= self.start_row;

        // Slots covered from above are consumed by this row.
        let covered: Vec<Option<Overlap>> = self
            .overlaps
            .iter_mut()
            .map(|slot| match slot {
                Some(overlap) if overlap.remaining > 0 => {
                    let current = *overlap;
                    overlap.remaining -= 1;
                    Some(current)
                }
                _ => None,
            })
            .collect();

        let mut column = 0;
        let mut placed = 0;
        let row_cells = cells(self.doc, self.rows[row]);

        for (cell_index, &cell) in row_cells.iter().enumerate() {
            while let Some(Some(overlap)) = covered.get(column) {
                if emit {
                    self.push_spanned(row, column, overlap, placed);
                }
                column += 1;
            }

            let colspan = colspan(self.doc, cell);
            let rowspan = rowspan(self.doc, cell);
            if emit {
                self.buffer.push_back(CellSlot {
                    row,
                    column,
                    cell,
                    colspan,
                    rowspan,
                    cell_index,
                    is_spanned: false,
                    anchor_row: row,
                    anchor_column: column,
                });
            }
            placed += 1;

            let anchor = Overlap {
                remaining: rowspan - 1,
                cell,
                colspan,
                rowspan,
                anchor_row: row,
                anchor_column: column,
            };
            for offset in 0..colspan {
                if emit && offset > 0 {
                    self.push_spanned(row, column + offset, &anchor, placed);
                }
                if rowspan > 1 {
                    let index = column + offset;
                    if self.overlaps.len() <= index {
                        self.overlaps.resize(index + 1, None);
                    }
                    self.overlaps[index] = Some(anchor);
                }
            }
            column += colspan;
        }

        // Rowspans reaching past the row's last physical cell
        for (index, overlap) in covered.iter().enumerate().skip(column) {
            if let (true, Some(overlap)) = (emit, overlap) {
                self.push_spanned(row, index, overlap, placed);
            }
        }
    }

    fn push_spanned(&mut self, row: usize, column: usize, overlap: &Overlap, cell_index: usize) {
        if !self.include_spanned {
            return;
        }
        self.buffer.push_back(CellSlot {
            row,
            column,
            cell: overlap.cell,
            colspan: overlap.colspan,
            rowspan: overlap.rowspan,
            cell_index,
            is_spanned: true,
            anchor_row: overlap.anchor_row,
            anchor_column: overlap.anchor_column,
        });
    }
}

impl Iterator for TableWalker<'_> {
    type Item = CellSlot;

    fn next(&mut self) -> Option<CellSlot> {
        loop {
            if let Some(slot) = self.buffer.pop_front() {
                return Some(slot);
            }
            let last = self.last_row()?;
            if self.next_row > last {
                return None;
            }
            let row = self.next_row;
            self.next_row += 1;
            self.walk_row(row);
        }
    }
}

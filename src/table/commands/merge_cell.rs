//! mergeTableCellRight / Left / Down / Up
//!
//! Two cells merge when they touch along a whole edge: the neighbour must
//! start right where the cell ends (or end where it starts) and have the
//! same span in the other direction. Vertical merges also may not cross
//! the heading rows boundary. The merged span may not exceed `MAX_SPAN`.

use crate::editing::Writer;
use crate::editor::Editor;
use crate::model::{Document, NodeId, Selection};
use crate::table::structure::remove_row_at;
use crate::table::utils::{
    colspan, heading_rows, row_index, rowspan, set_span, COLSPAN, MAX_SPAN, ROWSPAN, TABLE_CELL,
};
use crate::table::walker::{CellSlot, TableWalker};

use super::CellContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    Right,
    Left,
    Down,
    Up,
}

impl MergeDirection {
    fn is_horizontal(self) -> bool {
        matches!(self, MergeDirection::Right | MergeDirection::Left)
    }

    /// Whether the current cell absorbs the neighbour (or vice versa)
    fn expands_current(self) -> bool {
        matches!(self, MergeDirection::Right | MergeDirection::Down)
    }
}

fn slot_at(doc: &Document, table: NodeId, row: usize, column: usize) -> Option<CellSlot> {
    TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .include_spanned()
        .find(|slot| slot.column == column)
}

/// The cell to merge with, if the merge is possible
fn mergeable_neighbour(
    doc: &Document,
    context: &CellContext,
    direction: MergeDirection,
) -> Option<NodeId> {
    let CellContext {
        table,
        row,
        column,
        colspan,
        rowspan,
        ..
    } = *context;

    let neighbour = match direction {
        MergeDirection::Right => slot_at(doc, table, row, column + colspan)?,
        MergeDirection::Left => slot_at(doc, table, row, column.checked_sub(1)?)?,
        MergeDirection::Down => slot_at(doc, table, row + rowspan, column)?,
        MergeDirection::Up => slot_at(doc, table, row.checked_sub(1)?, column)?,
    };

    let touches = match direction {
        MergeDirection::Right => {
            neighbour.anchor_row == row && neighbour.anchor_column == column + colspan
        }
        MergeDirection::Left => {
            neighbour.anchor_row == row && neighbour.anchor_column + neighbour.colspan == column
        }
        MergeDirection::Down => {
            neighbour.anchor_column == column && neighbour.anchor_row == row + rowspan
        }
        MergeDirection::Up => {
            neighbour.anchor_column == column && neighbour.anchor_row + neighbour.rowspan == row
        }
    };
    if !touches {
        return None;
    }

    if direction.is_horizontal() {
        if neighbour.rowspan != rowspan || colspan + neighbour.colspan > MAX_SPAN {
            return None;
        }
    } else {
        if neighbour.colspan != colspan || rowspan + neighbour.rowspan > MAX_SPAN {
            return None;
        }
        let heading = heading_rows(doc, table);
        if (row < heading) != (neighbour.anchor_row < heading) {
            return None;
        }
    }

    Some(neighbour.cell)
}

pub(super) fn is_enabled(editor: &Editor, direction: MergeDirection) -> bool {
    CellContext::from_selection(editor)
        .and_then(|context| mergeable_neighbour(editor.document(), &context, direction))
        .is_some()
}

pub(super) fn execute(editor: &mut Editor, direction: MergeDirection) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let Some(neighbour) = mergeable_neighbour(editor.document(), &context, direction) else {
        return false;
    };

    let (kept, removed) = if direction.expands_current() {
        (context.cell, neighbour)
    } else {
        (neighbour, context.cell)
    };

    editor.change(|writer| {
        merge_cells(writer, context.table, kept, removed, direction.is_horizontal());
        let selection = Selection::in_element(writer.doc(), kept);
        writer.set_selection(selection);
    });
    true
}

/// Merge `removed` into `kept` (which is the upper-left one of the pair)
fn merge_cells(
    writer: &mut Writer<'_>,
    table: NodeId,
    kept: NodeId,
    removed: NodeId,
    horizontal: bool,
) {
    let doc = writer.doc();
    let (key, span) = if horizontal {
        (COLSPAN, colspan(doc, kept) + colspan(doc, removed))
    } else {
        (ROWSPAN, rowspan(doc, kept) + rowspan(doc, removed))
    };
    let removed_row = doc.parent(removed);
    let removed_is_empty = doc.is_empty_element(removed);
    let kept_is_empty = doc.is_empty_element(kept);

    if !removed_is_empty {
        if kept_is_empty {
            writer.clear(kept);
        }
        writer.move_children(removed, kept);
    }
    set_span(writer, kept, key, span);
    writer.remove(removed);

    // A vertical merge can leave the lower row without cells.
    if let Some(row) = removed_row {
        let doc = writer.doc();
        if doc.children_named(row, TABLE_CELL).next().is_none() {
            if let Some(index) = row_index(doc, row) {
                remove_row_at(writer, table, index);
            }
        }
    }
}

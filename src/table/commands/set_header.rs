//! setTableRowHeader / setTableColumnHeader

use crate::editor::Editor;
use crate::table::structure::split_at_row_boundary;
use crate::table::utils::{
    heading_columns, heading_rows, set_heading, HEADING_COLUMNS, HEADING_ROWS,
};

use super::CellContext;

pub(super) fn is_enabled(editor: &Editor) -> bool {
    CellContext::from_selection(editor).is_some()
}

/// Whether the selection is in a heading row
pub(super) fn row_value(editor: &Editor) -> bool {
    CellContext::from_selection(editor)
        .is_some_and(|c| c.row < heading_rows(editor.document(), c.table))
}

/// Whether the selection is in a heading column
pub(super) fn column_value(editor: &Editor) -> bool {
    CellContext::from_selection(editor)
        .is_some_and(|c| c.column < heading_columns(editor.document(), c.table))
}

/// Inside the heading: shrink it to end before `index`. Outside: grow it
/// to include `index`.
fn toggled(current: usize, index: usize) -> usize {
    if index < current {
        index
    } else {
        index + 1
    }
}

pub(super) fn execute_row(editor: &mut Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let value = toggled(heading_rows(editor.document(), context.table), context.row);

    editor.change(|writer| {
        if value > 0 {
            split_at_row_boundary(writer, context.table, value);
        }
        set_heading(writer, context.table, HEADING_ROWS, value);
    });
    true
}

pub(super) fn execute_column(editor: &mut Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let value = toggled(heading_columns(editor.document(), context.table), context.column);

    editor.change(|writer| {
        set_heading(writer, context.table, HEADING_COLUMNS, value);
    });
    true
}

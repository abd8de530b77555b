//! removeTableRow

use crate::editor::Editor;
use crate::model::{Position, Selection};
use crate::table::geometry::{cell_at, row_count};
use crate::table::structure::remove_row_at;

use super::CellContext;

pub(super) fn is_enabled(editor: &Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    row_count(editor.document(), context.table) > 1 || editor.config().remove_last_removes_table
}

pub(super) fn execute(editor: &mut Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let rows = row_count(editor.document(), context.table);

    if rows <= 1 {
        let Some(position) = Position::before(editor.document(), context.table) else {
            return false;
        };
        editor.change(|writer| {
            writer.remove(context.table);
            writer.set_selection(Selection::collapsed(position));
        });
        tracing::debug!("removeTableRow: removed the last row with its table");
        return true;
    }

    editor.change(|writer| {
        remove_row_at(writer, context.table, context.row);
        let target_row = context.row.min(rows - 2);
        if let Some(cell) = cell_at(writer.doc(), context.table, target_row, context.column) {
            writer.set_selection(Selection::at_start(cell));
        }
    });
    true
}

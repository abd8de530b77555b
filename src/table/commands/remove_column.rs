//! removeTableColumn

use crate::editor::Editor;
use crate::model::{Position, Selection};
use crate::table::geometry::{cell_at, column_count};
use crate::table::structure::remove_column_at;

use super::CellContext;

pub(super) fn is_enabled(editor: &Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    column_count(editor.document(), context.table) > 1
        || editor.config().remove_last_removes_table
}

pub(super) fn execute(editor: &mut Editor) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let columns = column_count(editor.document(), context.table);

    if columns <= 1 {
        let Some(position) = Position::before(editor.document(), context.table) else {
            return false;
        };
        editor.change(|writer| {
            writer.remove(context.table);
            writer.set_selection(Selection::collapsed(position));
        });
        tracing::debug!("removeTableColumn: removed the last column with its table");
        return true;
    }

    editor.change(|writer| {
        remove_column_at(writer, context.table, context.column);
        let target_column = context.column.min(columns - 2);
        if let Some(cell) = cell_at(writer.doc(), context.table, context.row, target_column) {
            writer.set_selection(Selection::at_start(cell));
        }
    });
    true
}

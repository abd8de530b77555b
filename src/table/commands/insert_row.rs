//! insertTableRowAbove / insertTableRowBelow

use crate::editor::Editor;
use crate::model::Selection;
use crate::table::structure::insert_rows;
use crate::table::utils::{heading_rows, set_heading, HEADING_ROWS, TABLE_CELL};

use super::CellContext;

pub(super) fn is_enabled(editor: &Editor) -> bool {
    CellContext::from_selection(editor).is_some()
}

pub(super) fn execute(editor: &mut Editor, below: bool) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let at = if below {
        context.row + context.rowspan
    } else {
        context.row
    };

    editor.change(|writer| {
        let heading = heading_rows(writer.doc(), context.table);
        let inserted = insert_rows(writer, context.table, at, 1);
        if at < heading {
            set_heading(writer, context.table, HEADING_ROWS, heading + 1);
        }
        let first_cell = inserted
            .first()
            .and_then(|&row| writer.doc().children_named(row, TABLE_CELL).next());
        if let Some(cell) = first_cell {
            writer.set_selection(Selection::at_start(cell));
        }
    });
    true
}

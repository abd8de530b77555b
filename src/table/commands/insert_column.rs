//! insertTableColumnBefore / insertTableColumnAfter

use crate::editor::Editor;
use crate::table::structure::insert_columns;
use crate::table::utils::{heading_columns, set_heading, HEADING_COLUMNS};

use super::CellContext;

pub(super) fn is_enabled(editor: &Editor) -> bool {
    CellContext::from_selection(editor).is_some()
}

pub(super) fn execute(editor: &mut Editor, after: bool) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };
    let at = if after {
        context.column + context.colspan
    } else {
        context.column
    };

    editor.change(|writer| {
        let heading = heading_columns(writer.doc(), context.table);
        insert_columns(writer, context.table, at, 1);
        if at < heading {
            set_heading(writer, context.table, HEADING_COLUMNS, heading + 1);
        }
    });
    true
}

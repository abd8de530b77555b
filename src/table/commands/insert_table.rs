//! insertTable: a `rows × columns` table of empty cells at the selection

use crate::editor::Editor;
use crate::model::{NodeId, Selection};
use crate::table::utils::{create_empty_cell, TABLE, TABLE_ROW};

/// Where the table goes: (parent, child index)
fn insertion_point(editor: &Editor) -> Option<(NodeId, usize)> {
    let doc = editor.document();
    let schema = editor.schema();
    let position = editor.selection().first_position(doc);
    let block = position.parent;
    let block_name = doc.name(block)?;

    if schema.allows_child(block_name, TABLE) {
        return Some((block, doc.index_at_offset(block, position.offset)));
    }

    let parent = doc.parent(block)?;
    if !schema.allows_child(doc.name(parent)?, TABLE) {
        return None;
    }
    let index = doc.index_in_parent(block)?;
    // A caret at the start of a non-empty block puts the table before it.
    if position.offset == 0 && !doc.is_empty_element(block) {
        Some((parent, index))
    } else {
        Some((parent, index + 1))
    }
}

pub(super) fn is_enabled(editor: &Editor) -> bool {
    insertion_point(editor).is_some()
}

pub(super) fn execute(editor: &mut Editor) -> bool {
    let Some((parent, index)) = insertion_point(editor) else {
        return false;
    };
    let rows = editor.config().default_table_rows.max(1);
    let columns = editor.config().default_table_columns.max(1);

    editor.change(|writer| {
        let table = writer.create_element(TABLE);
        let mut first_cell = None;
        for _ in 0..rows {
            let row = writer.create_element(TABLE_ROW);
            for _ in 0..columns {
                let cell = create_empty_cell(writer);
                writer.append(cell, row);
                first_cell.get_or_insert(cell);
            }
            writer.append(row, table);
        }
        writer.insert(table, parent, index);
        if let Some(cell) = first_cell {
            writer.set_selection(Selection::at_start(cell));
        }
    });
    tracing::debug!("insertTable: {}x{} table at {}[{}]", rows, columns, parent, index);
    true
}

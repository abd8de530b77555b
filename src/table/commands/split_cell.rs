//! splitTableCellVertically / splitTableCellHorizontally
//!
//! Only spanning cells split. The original cell keeps the larger half of
//! the span and a new empty cell takes the rest.

use crate::editor::Editor;
use crate::table::structure::insertion_index;
use crate::table::utils::{create_cell, rows, set_span, COLSPAN, ROWSPAN};

use super::CellContext;

/// Halve a span: (kept by the original, given to the new cell)
fn halves(span: usize) -> (usize, usize) {
    let kept = span.div_ceil(2);
    (kept, span - kept)
}

pub(super) fn is_enabled(editor: &Editor, vertically: bool) -> bool {
    CellContext::from_selection(editor).is_some_and(|context| {
        if vertically {
            context.colspan > 1
        } else {
            context.rowspan > 1
        }
    })
}

pub(super) fn execute(editor: &mut Editor, vertically: bool) -> bool {
    let Some(context) = CellContext::from_selection(editor) else {
        return false;
    };

    if vertically {
        let (kept, rest) = halves(context.colspan);
        editor.change(|writer| {
            let Some(row) = writer.doc().parent(context.cell) else {
                return;
            };
            let Some(index) = writer.doc().index_in_parent(context.cell) else {
                return;
            };
            set_span(writer, context.cell, COLSPAN, kept);
            let cell = create_cell(writer, rest, context.rowspan);
            writer.insert(cell, row, index + 1);
        });
    } else {
        let (kept, rest) = halves(context.rowspan);
        let target = context.row + kept;
        editor.change(|writer| {
            let doc = writer.doc();
            let Some(&row) = rows(doc, context.table).get(target) else {
                return;
            };
            let index = insertion_index(doc, context.table, target, context.column);
            set_span(writer, context.cell, ROWSPAN, kept);
            let cell = create_cell(writer, context.colspan, rest);
            writer.insert(cell, row, index);
        });
    }
    true
}

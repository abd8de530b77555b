//! Tab / Shift+Tab navigation between table cells
//!
//! Registered as a keydown handler, so it sees events before any listener.
//! Events it handles are fully consumed (default prevented and propagation
//! stopped); everything else passes through untouched.

use crate::editor::Editor;
use crate::input::{KeyCode, KeyEventData};
use crate::model::{NodeId, Selection};

use super::structure::insert_rows;
use super::utils::{rows, selected_cell, table_of_cell, TABLE, TABLE_CELL};
use super::walker::TableWalker;

/// Where the selection is relative to tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    /// The whole table is object-selected
    OnTable(NodeId),
    /// The selection starts inside a cell
    InCell { table: NodeId, cell: NodeId },
    Outside,
}

/// Classify the current selection
pub fn navigation_state(editor: &Editor) -> NavigationState {
    let doc = editor.document();
    let selection = editor.selection();

    if let Some(element) = selection.selected_element(doc) {
        if doc.is(element, TABLE) {
            return NavigationState::OnTable(element);
        }
    }
    selected_cell(doc, &selection)
        .and_then(|cell| Some(NavigationState::InCell {
            table: table_of_cell(doc, cell)?,
            cell,
        }))
        .unwrap_or(NavigationState::Outside)
}

/// Keydown handler for table navigation
pub fn handle_tab(editor: &mut Editor, event: &mut KeyEventData) {
    let mods = event.modifiers;
    if event.key != KeyCode::Tab || mods.ctrl() || mods.alt() || mods.meta() {
        return;
    }
    let backward = mods.shift();

    match navigation_state(editor) {
        NavigationState::Outside => {}
        NavigationState::OnTable(table) => {
            if backward {
                return;
            }
            let first = TableWalker::new(editor.document(), table).next().map(|s| s.cell);
            if let Some(cell) = first {
                select_cell(editor, cell);
            }
            consume(event);
        }
        NavigationState::InCell { table, cell } => {
            consume(event);
            if backward {
                move_backward(editor, table, cell);
            } else {
                move_forward(editor, table, cell);
            }
        }
    }
}

fn consume(event: &mut KeyEventData) {
    event.prevent_default();
    event.stop_propagation();
}

fn anchors(editor: &Editor, table: NodeId) -> Vec<NodeId> {
    TableWalker::new(editor.document(), table)
        .map(|slot| slot.cell)
        .collect()
}

fn move_forward(editor: &mut Editor, table: NodeId, cell: NodeId) {
    let anchors = anchors(editor, table);
    let Some(index) = anchors.iter().position(|&c| c == cell) else {
        return;
    };

    if let Some(&next) = anchors.get(index + 1) {
        tracing::trace!("navigation: tab to {}", next);
        select_cell(editor, next);
        return;
    }

    if !editor.config().tab_grows_table {
        return;
    }
    let row_count = rows(editor.document(), table).len();
    editor.change(|writer| {
        let inserted = insert_rows(writer, table, row_count, 1);
        let first = inserted
            .first()
            .and_then(|&row| writer.doc().children_named(row, TABLE_CELL).next());
        if let Some(first) = first {
            let selection = Selection::in_element(writer.doc(), first);
            writer.set_selection(selection);
        }
    });
    tracing::debug!("navigation: tab in last cell appended a row to {}", table);
}

fn move_backward(editor: &mut Editor, table: NodeId, cell: NodeId) {
    let anchors = anchors(editor, table);
    let previous = anchors
        .iter()
        .position(|&c| c == cell)
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| anchors.get(index).copied());
    if let Some(previous) = previous {
        tracing::trace!("navigation: shift+tab to {}", previous);
        select_cell(editor, previous);
    }
}

fn select_cell(editor: &mut Editor, cell: NodeId) {
    let selection = Selection::in_element(editor.document(), cell);
    editor.set_selection(selection);
}

//! Structural table edits shared by commands, navigation and the post-fixer

use crate::editing::Writer;
use crate::model::{Document, NodeId};

use super::geometry::column_count;
use super::utils::{
    create_cell, create_empty_cell, heading_columns, heading_rows, rows, set_heading, set_span,
    COLSPAN, HEADING_COLUMNS, HEADING_ROWS, ROWSPAN, TABLE_ROW,
};
use super::walker::TableWalker;

/// Physical index a cell placed at (`row`, `column`) must get
pub fn insertion_index(doc: &Document, table: NodeId, row: usize, column: usize) -> usize {
    TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .filter(|slot| slot.column < column)
        .count()
}

/// Insert `count` rows of empty cells before row `at` (or at the end).
///
/// Cells from above whose rowspan crosses `at` grow instead of getting a
/// new cell below them. Returns the new row elements.
pub fn insert_rows(writer: &mut Writer<'_>, table: NodeId, at: usize, count: usize) -> Vec<NodeId> {
    let doc = writer.doc();
    let table_rows = rows(doc, table);
    let at = at.min(table_rows.len());
    let width = column_count(doc, table);

    let mut crossing = Vec::new();
    let mut covered = 0;
    if at < table_rows.len() {
        for slot in TableWalker::new(doc, table)
            .start_row(at)
            .end_row(at)
            .include_spanned()
        {
            if slot.is_spanned && slot.anchor_row < at {
                covered += 1;
                if slot.column == slot.anchor_column {
                    crossing.push((slot.cell, slot.rowspan));
                }
            }
        }
    }
    let index = table_rows
        .get(at)
        .and_then(|&row| doc.index_in_parent(row))
        .unwrap_or_else(|| doc.child_count(table));

    for (cell, span) in crossing {
        set_span(writer, cell, ROWSPAN, span + count);
    }

    let mut inserted = Vec::with_capacity(count);
    for i in 0..count {
        let row = writer.create_element(TABLE_ROW);
        for _ in 0..width.saturating_sub(covered) {
            let cell = create_empty_cell(writer);
            writer.append(cell, row);
        }
        writer.insert(row, table, index + i);
        inserted.push(row);
    }

    tracing::trace!("table: inserted {} row(s) at {}", count, at);
    inserted
}

/// Insert `count` columns of empty cells before column `at`.
///
/// Where `at` falls inside a colspan, that cell grows once (in its anchor
/// row) instead.
pub fn insert_columns(writer: &mut Writer<'_>, table: NodeId, at: usize, count: usize) {
    let doc = writer.doc();
    let table_rows = rows(doc, table);

    enum Action {
        InsertAt(NodeId, usize),
        Append(NodeId),
        Widen(NodeId, usize),
    }
    let mut actions = Vec::new();

    for (row_index, &row) in table_rows.iter().enumerate() {
        let slot = TableWalker::new(doc, table)
            .start_row(row_index)
            .end_row(row_index)
            .include_spanned()
            .find(|slot| slot.column == at);

        match slot {
            None => actions.push(Action::Append(row)),
            Some(slot) if slot.anchor_column == at => {
                actions.push(Action::InsertAt(row, slot.cell_index));
            }
            Some(slot) if slot.anchor_row == row_index => {
                actions.push(Action::Widen(slot.cell, slot.colspan));
            }
            // Covered by a cell widened in its anchor row.
            Some(_) => {}
        }
    }

    for action in actions {
        match action {
            Action::InsertAt(row, index) => {
                for i in 0..count {
                    let cell = create_empty_cell(writer);
                    writer.insert(cell, row, index + i);
                }
            }
            Action::Append(row) => {
                for _ in 0..count {
                    let cell = create_empty_cell(writer);
                    writer.append(cell, row);
                }
            }
            Action::Widen(cell, span) => set_span(writer, cell, COLSPAN, span + count),
        }
    }

    tracing::trace!("table: inserted {} column(s) at {}", count, at);
}

/// Remove row `row`.
///
/// Cells from above spanning into it shrink; cells of the row spanning
/// further down move to the next row with one row less. `headingRows`
/// shrinks when the row was a heading row.
pub fn remove_row_at(writer: &mut Writer<'_>, table: NodeId, row: usize) {
    let doc = writer.doc();
    let table_rows = rows(doc, table);
    let Some(&row_element) = table_rows.get(row) else {
        return;
    };

    let mut shrink = Vec::new();
    let mut move_down = Vec::new();
    for slot in TableWalker::new(doc, table)
        .start_row(row)
        .end_row(row)
        .include_spanned()
    {
        if slot.is_spanned {
            if slot.anchor_row < row && slot.column == slot.anchor_column {
                shrink.push((slot.cell, slot.rowspan));
            }
        } else if slot.rowspan > 1 {
            move_down.push((slot.cell, slot.rowspan, slot.column));
        }
    }

    let next_anchor_columns: Vec<usize> = match table_rows.get(row + 1) {
        Some(_) => TableWalker::new(doc, table)
            .start_row(row + 1)
            .end_row(row + 1)
            .map(|slot| slot.column)
            .collect(),
        None => Vec::new(),
    };
    let heading = heading_rows(doc, table);

    for (cell, span) in shrink {
        set_span(writer, cell, ROWSPAN, span - 1);
    }

    if let Some(&next_row) = table_rows.get(row + 1) {
        for (moved, (cell, span, column)) in move_down.into_iter().enumerate() {
            let index = next_anchor_columns.iter().filter(|&&c| c < column).count() + moved;
            set_span(writer, cell, ROWSPAN, span - 1);
            writer.move_to(cell, next_row, index);
        }
    }

    writer.remove(row_element);

    if row < heading {
        set_heading(writer, table, HEADING_ROWS, heading - 1);
    }
    tracing::trace!("table: removed row {}", row);
}

/// Remove column `column`: 1-wide cells go, wider cells lose one column.
/// `headingColumns` shrinks when the column was a heading column.
pub fn remove_column_at(writer: &mut Writer<'_>, table: NodeId, column: usize) {
    let doc = writer.doc();
    let mut remove = Vec::new();
    let mut narrow = Vec::new();
    for slot in TableWalker::new(doc, table).include_spanned() {
        if slot.column != column || slot.row != slot.anchor_row {
            continue;
        }
        if slot.colspan > 1 {
            narrow.push((slot.cell, slot.colspan));
        } else {
            remove.push(slot.cell);
        }
    }
    let heading = heading_columns(doc, table);

    for (cell, span) in narrow {
        set_span(writer, cell, COLSPAN, span - 1);
    }
    for cell in remove {
        writer.remove(cell);
    }

    if column < heading {
        set_heading(writer, table, HEADING_COLUMNS, heading - 1);
    }
    tracing::trace!("table: removed column {}", column);
}

/// Split cells crossing the boundary above row `boundary` so no cell lives
/// on both sides of it
pub fn split_at_row_boundary(writer: &mut Writer<'_>, table: NodeId, boundary: usize) {
    let doc = writer.doc();
    let table_rows = rows(doc, table);
    if boundary == 0 || boundary >= table_rows.len() {
        return;
    }

    let mut splits = Vec::new();
    for slot in TableWalker::new(doc, table).end_row(boundary - 1) {
        if slot.row + slot.rowspan > boundary {
            let kept = boundary - slot.row;
            splits.push((slot.cell, slot.column, slot.colspan, kept, slot.rowspan - kept));
        }
    }
    let target_columns: Vec<usize> = TableWalker::new(doc, table)
        .start_row(boundary)
        .end_row(boundary)
        .map(|slot| slot.column)
        .collect();
    let target_row = table_rows[boundary];

    for (moved, (cell, column, span, kept, rest)) in splits.into_iter().enumerate() {
        set_span(writer, cell, ROWSPAN, kept);
        let new_cell = create_cell(writer, span, rest);
        let index = target_columns.iter().filter(|&&c| c < column).count() + moved;
        writer.insert(new_cell, target_row, index);
    }
}

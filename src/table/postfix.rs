//! Table post-fixer: repairs table structure at the end of every batch
//!
//! Repairs only ever add: rows shorter than the table's widest row are
//! padded with empty cells at their end, and heading attributes are
//! clamped to the table size. Nothing is removed or merged, so edits
//! coming from several sources (or from undo) never lose content. Span
//! attributes above `MAX_SPAN` are rewritten to `MAX_SPAN`, the width the
//! geometry already reads them as.

use std::collections::BTreeSet;

use crate::editing::{Operation, Writer};
use crate::model::{Document, NodeId};

use super::geometry::row_widths;
use super::utils::{
    cells, create_empty_cell, heading_columns, heading_rows, is_oversized_span, rows, set_heading,
    set_span, COLSPAN, HEADING_COLUMNS, HEADING_ROWS, MAX_SPAN, ROWSPAN, TABLE,
};

/// The hook registered on the editor
pub fn table_post_fixer(writer: &mut Writer<'_>) -> bool {
    let tables = touched_tables(writer.doc(), writer.operations());
    let mut changed = false;
    for table in tables {
        changed |= fix_table(writer, table);
    }
    changed
}

/// Attached tables affected by any of the operations
pub fn touched_tables(doc: &Document, operations: &[Operation]) -> Vec<NodeId> {
    let mut tables = BTreeSet::new();

    for operation in operations {
        match operation {
            Operation::Insert { node, .. } | Operation::Move { node, .. } => {
                tables.extend(
                    doc.descendants_inclusive(*node)
                        .into_iter()
                        .filter(|&n| doc.is(n, TABLE)),
                );
            }
            Operation::SetAttribute { node, .. } => {
                tables.extend(doc.find_ancestor(*node, TABLE));
            }
            Operation::Remove { .. } => {}
        }
        for parent in operation.affected_parents() {
            tables.extend(doc.find_ancestor(parent, TABLE));
        }
    }

    tables
        .into_iter()
        .filter(|&table| doc.is_attached(table))
        .collect()
}

/// Pad short rows and clamp headings. Returns whether anything changed.
pub fn fix_table(writer: &mut Writer<'_>, table: NodeId) -> bool {
    let mut changed = clamp_spans(writer, table);

    let doc = writer.doc();
    let table_rows = rows(doc, table);
    let widths = row_widths(doc, table);
    let columns = widths.iter().copied().max().unwrap_or(0);
    let heading_rows = heading_rows(doc, table);
    let heading_columns = heading_columns(doc, table);

    for (&row, &width) in table_rows.iter().zip(&widths) {
        if width < columns {
            tracing::debug!(
                "post-fixer: padding row {} of table {} from {} to {} columns",
                row,
                table,
                width,
                columns
            );
            for _ in width..columns {
                let cell = create_empty_cell(writer);
                writer.append(cell, row);
            }
            changed = true;
        }
    }

    if heading_rows > table_rows.len() {
        tracing::debug!(
            "post-fixer: clamping headingRows of table {} to {}",
            table,
            table_rows.len()
        );
        set_heading(writer, table, HEADING_ROWS, table_rows.len());
        changed = true;
    }
    if heading_columns > columns {
        tracing::debug!(
            "post-fixer: clamping headingColumns of table {} to {}",
            table,
            columns
        );
        set_heading(writer, table, HEADING_COLUMNS, columns);
        changed = true;
    }

    changed
}

/// Rewrite span attributes above `MAX_SPAN`
fn clamp_spans(writer: &mut Writer<'_>, table: NodeId) -> bool {
    let doc = writer.doc();
    let oversized: Vec<(NodeId, &'static str)> = rows(doc, table)
        .into_iter()
        .flat_map(|row| cells(doc, row))
        .flat_map(|cell| [(cell, COLSPAN), (cell, ROWSPAN)])
        .filter(|&(cell, key)| is_oversized_span(doc.attribute(cell, key)))
        .collect();

    for &(cell, key) in &oversized {
        tracing::debug!("post-fixer: clamping {} of cell {} to {}", key, cell, MAX_SPAN);
        set_span(writer, cell, key, MAX_SPAN);
    }
    !oversized.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::editor::Editor;
    use crate::table::geometry::{column_count, row_widths};
    use crate::table::table_editor;

    fn load(editor: &mut Editor, source: &str) -> NodeId {
        editor.set_data(source).unwrap();
        let root = editor.document().root();
        editor.document().child(root, 0).unwrap()
    }

    #[test]
    fn test_touched_tables_from_cell_edit() {
        let mut editor = Editor::default();
        let table = load(
            &mut editor,
            "<table><tableRow><tableCell>a</tableCell></tableRow></table><paragraph>x</paragraph>",
        );
        let cell = editor.document().child(editor.document().child(table, 0).unwrap(), 0).unwrap();

        let ops = editor.change(|w| {
            w.insert_text("b", cell, 1);
            let root = w.doc().root();
            let p = w.doc().child(root, 1).unwrap();
            w.insert_text("y", p, 1);
            w.operations().to_vec()
        });
        assert_eq!(touched_tables(editor.document(), &ops), vec![table]);
    }

    #[test]
    fn test_fix_table_is_idempotent() {
        let mut editor = Editor::default();
        let table = load(
            &mut editor,
            "<table headingRows=\"5\"><tableRow><tableCell>a</tableCell><tableCell>b</tableCell></tableRow>\
             <tableRow><tableCell>c</tableCell></tableRow></table>",
        );
        let first = editor.change(|w| fix_table(w, table));
        let second = editor.change(|w| fix_table(w, table));
        assert!(first);
        assert!(!second);
        assert_eq!(
            editor.get_data(),
            "<table headingRows=\"2\"><tableRow><tableCell>a</tableCell><tableCell>b</tableCell></tableRow>\
             <tableRow><tableCell>c</tableCell><tableCell></tableCell></tableRow></table>"
        );
    }

    #[test]
    fn test_oversized_span_is_clamped() {
        let mut editor = table_editor(EngineConfig::default());
        let table = load(
            &mut editor,
            "<table><tableRow><tableCell colspan=\"3000000000\">a</tableCell></tableRow>\
             <tableRow><tableCell>b</tableCell></tableRow></table>",
        );

        let doc = editor.document();
        assert_eq!(column_count(doc, table), MAX_SPAN);
        assert_eq!(row_widths(doc, table), vec![MAX_SPAN, MAX_SPAN]);
        let first_cell = doc.child(doc.child(table, 0).unwrap(), 0).unwrap();
        assert_eq!(doc.attribute(first_cell, COLSPAN), Some("1000"));
    }
}

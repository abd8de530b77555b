//! Table post-fixer tests
//!
//! Every batch that touches a table leaves it rectangular: short rows are
//! padded with empty cells, heading attributes are clamped.

mod common;

use common::{editor_with, first_node, model_table, model_table_with};
use tessera::table::geometry::{column_count, row_widths};
use tessera::table::postfix::fix_table;
use tessera::table::utils::{create_empty_cell, rows, TABLE_ROW};

// ========================================================================
// Padding
// ========================================================================

#[test]
fn test_pads_short_rows() {
    let editor = editor_with(&model_table(&[&["00"], &["10", "11", "12"], &["20", "21"]]));

    assert_eq!(
        editor.get_data(),
        model_table(&[&["00", "", ""], &["10", "11", "12"], &["20", "21", ""]])
    );
}

#[test]
fn test_pads_rows_under_spans() {
    let editor = editor_with(&model_table(&[
        &["00|c6"],
        &["10|r2", "11", "12|c3"],
        &["21", "22"],
    ]));

    assert_eq!(
        editor.get_data(),
        model_table(&[
            &["00|c6"],
            &["10|r2", "11", "12|c3", ""],
            &["21", "22", "", "", ""],
        ])
    );
}

#[test]
fn test_every_row_matches_column_count() {
    let editor = editor_with(&model_table(&[
        &["a|r3", "b"],
        &["c|c3"],
        &["d"],
        &["e", "f", "g", "h", "i"],
    ]));
    let doc = editor.document();
    let table = first_node(&editor);
    let columns = column_count(doc, table);

    assert_eq!(columns, 5);
    assert!(row_widths(doc, table).iter().all(|&w| w == columns));
}

#[test]
fn test_valid_table_is_untouched() {
    let source = model_table(&[&["00", "01|r2"], &["10"]]);
    let editor = editor_with(&source);
    assert_eq!(editor.get_data(), source);
}

#[test]
fn test_never_removes_cells() {
    // Wider rows win: nothing is trimmed to match the first row.
    let editor = editor_with(&model_table(&[&["a"], &["b", "c", "d", "e"]]));
    assert_eq!(
        editor.get_data(),
        model_table(&[&["a", "", "", ""], &["b", "c", "d", "e"]])
    );
}

// ========================================================================
// Batches from different sources
// ========================================================================

#[test]
fn test_row_of_old_width_after_column_insert() {
    let mut editor = editor_with(&model_table(&[&["[]00", "01"], &["10", "11"]]));
    assert!(editor.execute("insertTableColumnAfter"));
    let table = first_node(&editor);

    // A second source appends a row sized for the old two-column table.
    editor.change(|writer| {
        let row = writer.create_element(TABLE_ROW);
        for _ in 0..2 {
            let cell = create_empty_cell(writer);
            writer.append(cell, row);
        }
        writer.append(row, table);
    });

    assert_eq!(
        editor.get_data(),
        model_table(&[&["00", "", "01"], &["10", "", "11"], &["", "", ""]])
    );
}

#[test]
fn test_removed_cell_is_replaced_by_padding() {
    let mut editor = editor_with(&model_table(&[&["00", "01"], &["10", "11"]]));
    let table = first_node(&editor);

    editor.change(|writer| {
        let row = rows(writer.doc(), table)[1];
        let cell = writer.doc().child(row, 1).unwrap();
        writer.remove(cell);
    });

    assert_eq!(editor.get_data(), model_table(&[&["00", "01"], &["10", ""]]));
}

#[test]
fn test_undo_reverts_padding_with_the_edit() {
    let source = model_table(&[&["00", "01"], &["10", "11"]]);
    let mut editor = editor_with(&source);
    let table = first_node(&editor);

    editor.change(|writer| {
        let row = writer.create_element(TABLE_ROW);
        let cell = create_empty_cell(writer);
        writer.append(cell, row);
        writer.append(row, table);
    });
    assert_eq!(
        editor.get_data(),
        model_table(&[&["00", "01"], &["10", "11"], &["", ""]])
    );

    assert!(editor.undo());
    assert_eq!(editor.get_data(), source);
}

// ========================================================================
// Headings
// ========================================================================

#[test]
fn test_clamps_heading_rows_on_load() {
    let editor = editor_with(&model_table_with(&[&["00"], &["10"]], 5, 0));
    assert_eq!(editor.get_data(), model_table_with(&[&["00"], &["10"]], 2, 0));
}

#[test]
fn test_clamps_heading_columns_on_load() {
    let editor = editor_with(&model_table_with(&[&["00", "01"]], 0, 4));
    assert_eq!(editor.get_data(), model_table_with(&[&["00", "01"]], 0, 2));
}

#[test]
fn test_clamps_heading_rows_after_direct_row_removal() {
    let mut editor = editor_with(&model_table_with(&[&["00"], &["10"], &["20"]], 3, 0));
    let table = first_node(&editor);

    editor.change(|writer| {
        let last = rows(writer.doc(), table)[2];
        writer.remove(last);
    });

    assert_eq!(editor.get_data(), model_table_with(&[&["00"], &["10"]], 2, 0));
}

// ========================================================================
// Idempotence
// ========================================================================

#[test]
fn test_fix_is_idempotent() {
    let mut editor = editor_with(&model_table(&[&["a|c2"], &["b"], &["c", "d", "e"]]));
    let table = first_node(&editor);
    let fixed = editor.get_data();

    let changed = editor.change(|writer| fix_table(writer, table));

    assert!(!changed);
    assert_eq!(editor.get_data(), fixed);
    assert!(!editor.can_undo());
}

#[test]
fn test_noop_edits_keep_column_count() {
    let source = model_table_with(&[&["00|c2", "02"], &["10", "11|r2", "12"], &["20", "22"]], 1, 0);
    let mut editor = editor_with(&source);
    let table = first_node(&editor);
    let widths = row_widths(editor.document(), table);
    let cell = {
        let doc = editor.document();
        doc.child(rows(doc, table)[0], 0).unwrap()
    };

    editor.change(|writer| {
        writer.set_attribute(cell, "colspan", 2);
        writer.set_attribute(table, "headingRows", 1);
        writer.remove_attribute(cell, "rowspan");
    });

    assert_eq!(column_count(editor.document(), table), 3);
    assert_eq!(row_widths(editor.document(), table), widths);
    assert_eq!(editor.get_data(), source);
    assert!(!editor.can_undo());

    // Content inside a cell touches the table but not its shape.
    editor.change(|writer| {
        writer.insert_text("x", cell, 1);
    });

    assert_eq!(column_count(editor.document(), table), 3);
    assert_eq!(row_widths(editor.document(), table), widths);
    assert_eq!(
        editor.get_data(),
        model_table_with(&[&["00x|c2", "02"], &["10", "11|r2", "12"], &["20", "22"]], 1, 0)
    );
    assert_eq!(editor.history().undo_count(), 1);
}

#[test]
fn test_edits_outside_tables_leave_them_alone() {
    let table = model_table(&[&["00", "01"]]);
    let mut editor = editor_with(&format!("{table}<paragraph>x</paragraph>"));

    editor.change(|writer| {
        let root = writer.doc().root();
        let paragraph = writer.doc().child(root, 1).unwrap();
        writer.insert_text("y", paragraph, 1);
    });

    assert_eq!(editor.get_data(), format!("{table}<paragraph>xy</paragraph>"));
}

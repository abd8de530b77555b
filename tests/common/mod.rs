//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tessera::config::EngineConfig;
use tessera::editor::Editor;
use tessera::input::{parse_key_string, KeyEventData};
use tessera::model::NodeId;
use tessera::table::table_editor;

/// Model markup of one cell.
///
/// `"11"` is a plain cell, `"12|c3"` spans three columns, `"10|r2"` two
/// rows, `"x|c2r2"` both. Contents may carry `[]` selection markers.
pub fn model_cell(cell: &str) -> String {
    let (contents, spans) = cell.split_once('|').unwrap_or((cell, ""));

    let mut attributes = String::new();
    let mut rest = spans;
    let mut colspan = None;
    let mut rowspan = None;
    while let Some(kind) = rest.chars().next() {
        let digits: String = rest[1..].chars().take_while(char::is_ascii_digit).collect();
        match kind {
            'c' => colspan = Some(digits.clone()),
            'r' => rowspan = Some(digits.clone()),
            other => panic!("unknown span kind {other:?} in {cell:?}"),
        }
        rest = &rest[1 + digits.len()..];
    }
    if let Some(c) = colspan {
        attributes.push_str(&format!(" colspan=\"{c}\""));
    }
    if let Some(r) = rowspan {
        attributes.push_str(&format!(" rowspan=\"{r}\""));
    }
    format!("<tableCell{attributes}>{contents}</tableCell>")
}

/// Model markup of a table built from rows of cell specs
pub fn model_table(rows: &[&[&str]]) -> String {
    model_table_with(rows, 0, 0)
}

/// Model markup of a table with heading attributes
pub fn model_table_with(rows: &[&[&str]], heading_rows: usize, heading_columns: usize) -> String {
    let mut attributes = String::new();
    if heading_columns > 0 {
        attributes.push_str(&format!(" headingColumns=\"{heading_columns}\""));
    }
    if heading_rows > 0 {
        attributes.push_str(&format!(" headingRows=\"{heading_rows}\""));
    }

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|cell| model_cell(cell)).collect();
            format!("<tableRow>{cells}</tableRow>")
        })
        .collect();
    format!("<table{attributes}>{body}</table>")
}

/// Table-enabled editor loaded with model markup
pub fn editor_with(source: &str) -> Editor {
    editor_with_config(source, EngineConfig::default())
}

pub fn editor_with_config(source: &str, config: EngineConfig) -> Editor {
    let mut editor = table_editor(config);
    editor.set_data(source).unwrap();
    editor
}

/// First top-level node of the document
pub fn first_node(editor: &Editor) -> NodeId {
    let doc = editor.document();
    doc.child(doc.root(), 0).unwrap()
}

/// Dispatch a keystroke and return the event afterwards
pub fn press(editor: &mut Editor, keys: &str) -> KeyEventData {
    let mut event = parse_key_string(keys).unwrap();
    editor.handle_keydown(&mut event);
    event
}

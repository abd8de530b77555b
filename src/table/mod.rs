//! Table editing: schema, geometry, post-fixer, commands and navigation
//!
//! [`register`] wires everything into an [`Editor`]: the `table`,
//! `tableRow` and `tableCell` schema definitions, the post-fixer, the
//! named commands and the Tab handler.

pub mod commands;
pub mod geometry;
pub mod navigation;
pub mod postfix;
pub mod structure;
pub mod utils;
pub mod walker;

use std::rc::Rc;

use crate::config::EngineConfig;
use crate::editor::Editor;
use crate::model::{ElementDefinition, ROOT_NAME};

pub use commands::TableCommandId;
pub use geometry::TableCellInfo;
pub use walker::{CellSlot, TableWalker};

use utils::{
    COLSPAN, HEADING_COLUMNS, HEADING_ROWS, ROWSPAN, TABLE, TABLE_CELL, TABLE_ROW,
};

/// Register table support on an editor
pub fn register(editor: &mut Editor) {
    let nested = editor.config().allow_nested_tables;

    let schema = editor.schema_mut();
    let mut table = ElementDefinition::new(TABLE)
        .allow_in(&[ROOT_NAME])
        .attributes(&[HEADING_ROWS, HEADING_COLUMNS])
        .object();
    if nested {
        table = table.allow_in(&[TABLE_CELL]);
    }
    schema.register(table);
    schema.register(ElementDefinition::new(TABLE_ROW).allow_in(&[TABLE]).limit());
    schema.register(
        ElementDefinition::new(TABLE_CELL)
            .allow_in(&[TABLE_ROW])
            .attributes(&[COLSPAN, ROWSPAN])
            .with_text()
            .limit(),
    );
    schema.extend_allowed_in("paragraph", TABLE_CELL);

    editor.add_post_fixer(postfix::table_post_fixer);
    for id in TableCommandId::ALL {
        editor.register_command(id.name(), Rc::new(id));
    }
    editor.add_key_handler(navigation::handle_tab);

    tracing::debug!("table support registered (nested tables: {})", nested);
}

/// An editor with table support
pub fn table_editor(config: EngineConfig) -> Editor {
    let mut editor = Editor::new(config);
    register(&mut editor);
    editor
}

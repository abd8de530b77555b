//! Table commands
//!
//! The commands form a closed set ([`TableCommandId`]) resolved by name.
//! Each variant dispatches to its module's `is_enabled`/`execute` pair and
//! every execution happens inside a single `Editor::change` batch.

mod insert_column;
mod insert_row;
mod insert_table;
mod merge_cell;
mod remove_column;
mod remove_row;
mod set_header;
mod split_cell;

use crate::editor::{Command, Editor};
use crate::model::NodeId;

use super::geometry::cell_location;
use super::utils::{colspan, rowspan, selected_cell, table_of_cell};

pub use merge_cell::MergeDirection;

/// Every table command, addressable by its registered name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableCommandId {
    InsertTable,
    InsertRowAbove,
    InsertRowBelow,
    InsertColumnBefore,
    InsertColumnAfter,
    RemoveRow,
    RemoveColumn,
    SplitCellVertically,
    SplitCellHorizontally,
    MergeCellRight,
    MergeCellLeft,
    MergeCellDown,
    MergeCellUp,
    SetRowHeader,
    SetColumnHeader,
}

/// Name lookup table
const COMMAND_NAMES: [(TableCommandId, &str); 15] = [
    (TableCommandId::InsertTable, "insertTable"),
    (TableCommandId::InsertRowAbove, "insertTableRowAbove"),
    (TableCommandId::InsertRowBelow, "insertTableRowBelow"),
    (TableCommandId::InsertColumnBefore, "insertTableColumnBefore"),
    (TableCommandId::InsertColumnAfter, "insertTableColumnAfter"),
    (TableCommandId::RemoveRow, "removeTableRow"),
    (TableCommandId::RemoveColumn, "removeTableColumn"),
    (TableCommandId::SplitCellVertically, "splitTableCellVertically"),
    (TableCommandId::SplitCellHorizontally, "splitTableCellHorizontally"),
    (TableCommandId::MergeCellRight, "mergeTableCellRight"),
    (TableCommandId::MergeCellLeft, "mergeTableCellLeft"),
    (TableCommandId::MergeCellDown, "mergeTableCellDown"),
    (TableCommandId::MergeCellUp, "mergeTableCellUp"),
    (TableCommandId::SetRowHeader, "setTableRowHeader"),
    (TableCommandId::SetColumnHeader, "setTableColumnHeader"),
];

impl TableCommandId {
    pub const ALL: [TableCommandId; 15] = [
        TableCommandId::InsertTable,
        TableCommandId::InsertRowAbove,
        TableCommandId::InsertRowBelow,
        TableCommandId::InsertColumnBefore,
        TableCommandId::InsertColumnAfter,
        TableCommandId::RemoveRow,
        TableCommandId::RemoveColumn,
        TableCommandId::SplitCellVertically,
        TableCommandId::SplitCellHorizontally,
        TableCommandId::MergeCellRight,
        TableCommandId::MergeCellLeft,
        TableCommandId::MergeCellDown,
        TableCommandId::MergeCellUp,
        TableCommandId::SetRowHeader,
        TableCommandId::SetColumnHeader,
    ];

    /// Registered command name
    pub fn name(self) -> &'static str {
        COMMAND_NAMES
            .iter()
            .find(|(id, _)| *id == self)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }

    /// Resolve a registered name; unknown names give `None`
    pub fn from_name(name: &str) -> Option<Self> {
        COMMAND_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(id, _)| *id)
    }
}

impl std::fmt::Display for TableCommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Command for TableCommandId {
    fn is_enabled(&self, editor: &Editor) -> bool {
        match self {
            TableCommandId::InsertTable => insert_table::is_enabled(editor),
            TableCommandId::InsertRowAbove | TableCommandId::InsertRowBelow => {
                insert_row::is_enabled(editor)
            }
            TableCommandId::InsertColumnBefore | TableCommandId::InsertColumnAfter => {
                insert_column::is_enabled(editor)
            }
            TableCommandId::RemoveRow => remove_row::is_enabled(editor),
            TableCommandId::RemoveColumn => remove_column::is_enabled(editor),
            TableCommandId::SplitCellVertically => split_cell::is_enabled(editor, true),
            TableCommandId::SplitCellHorizontally => split_cell::is_enabled(editor, false),
            TableCommandId::MergeCellRight => merge_cell::is_enabled(editor, MergeDirection::Right),
            TableCommandId::MergeCellLeft => merge_cell::is_enabled(editor, MergeDirection::Left),
            TableCommandId::MergeCellDown => merge_cell::is_enabled(editor, MergeDirection::Down),
            TableCommandId::MergeCellUp => merge_cell::is_enabled(editor, MergeDirection::Up),
            TableCommandId::SetRowHeader | TableCommandId::SetColumnHeader => {
                set_header::is_enabled(editor)
            }
        }
    }

    fn execute(&self, editor: &mut Editor) -> bool {
        if !self.is_enabled(editor) {
            return false;
        }
        match self {
            TableCommandId::InsertTable => insert_table::execute(editor),
            TableCommandId::InsertRowAbove => insert_row::execute(editor, false),
            TableCommandId::InsertRowBelow => insert_row::execute(editor, true),
            TableCommandId::InsertColumnBefore => insert_column::execute(editor, false),
            TableCommandId::InsertColumnAfter => insert_column::execute(editor, true),
            TableCommandId::RemoveRow => remove_row::execute(editor),
            TableCommandId::RemoveColumn => remove_column::execute(editor),
            TableCommandId::SplitCellVertically => split_cell::execute(editor, true),
            TableCommandId::SplitCellHorizontally => split_cell::execute(editor, false),
            TableCommandId::MergeCellRight => merge_cell::execute(editor, MergeDirection::Right),
            TableCommandId::MergeCellLeft => merge_cell::execute(editor, MergeDirection::Left),
            TableCommandId::MergeCellDown => merge_cell::execute(editor, MergeDirection::Down),
            TableCommandId::MergeCellUp => merge_cell::execute(editor, MergeDirection::Up),
            TableCommandId::SetRowHeader => set_header::execute_row(editor),
            TableCommandId::SetColumnHeader => set_header::execute_column(editor),
        }
    }

    fn value(&self, editor: &Editor) -> Option<bool> {
        match self {
            TableCommandId::SetRowHeader => Some(set_header::row_value(editor)),
            TableCommandId::SetColumnHeader => Some(set_header::column_value(editor)),
            _ => None,
        }
    }
}

/// Where the selection sits inside a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellContext {
    pub cell: NodeId,
    pub table: NodeId,
    pub row: usize,
    pub column: usize,
    pub colspan: usize,
    pub rowspan: usize,
}

impl CellContext {
    /// Context of the cell containing the selection start
    pub(crate) fn from_selection(editor: &Editor) -> Option<Self> {
        let doc = editor.document();
        let cell = selected_cell(doc, &editor.selection())?;
        let table = table_of_cell(doc, cell)?;
        let (row, column) = cell_location(doc, cell)?;
        Some(Self {
            cell,
            table,
            row,
            column,
            colspan: colspan(doc, cell),
            rowspan: rowspan(doc, cell),
        })
    }
}

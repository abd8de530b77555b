//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging table
//! structure changes, post-fixer repairs and navigation.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=table=debug` - command diffs only
//! - `RUST_LOG=tessera::table::postfix=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tessera/logs/tessera.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{Document, NodeId};
use crate::table::geometry::column_count;
use crate::table::utils::{heading_columns, heading_rows, rows, TABLE};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to `~/.config/tessera/logs/tessera.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG, stderr so stdout stays machine-readable
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tessera.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();
}

/// Lightweight snapshot of every table's shape for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSnapshot {
    pub tables: Vec<TableShape>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub table: NodeId,
    pub rows: usize,
    pub columns: usize,
    pub heading_rows: usize,
    pub heading_columns: usize,
}

impl BatchSnapshot {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            tables: doc
                .descendants_inclusive(doc.root())
                .into_iter()
                .filter(|&node| doc.is(node, TABLE))
                .map(|table| TableShape {
                    table,
                    rows: rows(doc, table).len(),
                    columns: column_count(doc, table),
                    heading_rows: heading_rows(doc, table),
                    heading_columns: heading_columns(doc, table),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &BatchSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for before in &self.tables {
            match other.tables.iter().find(|t| t.table == before.table) {
                None => changes.push(format!("{}: removed", before.table)),
                Some(after) => {
                    if (before.rows, before.columns) != (after.rows, after.columns) {
                        changes.push(format!(
                            "{}: {}x{} → {}x{}",
                            before.table, before.rows, before.columns, after.rows, after.columns
                        ));
                    }
                    if (before.heading_rows, before.heading_columns)
                        != (after.heading_rows, after.heading_columns)
                    {
                        changes.push(format!(
                            "{}: headings ({},{}) → ({},{})",
                            before.table,
                            before.heading_rows,
                            before.heading_columns,
                            after.heading_rows,
                            after.heading_columns
                        ));
                    }
                }
            }
        }
        for after in &other.tables {
            if !self.tables.iter().any(|t| t.table == after.table) {
                changes.push(format!("{}: added {}x{}", after.table, after.rows, after.columns));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(table: usize, rows: usize, columns: usize) -> TableShape {
        TableShape {
            table: NodeId(table),
            rows,
            columns,
            heading_rows: 0,
            heading_columns: 0,
        }
    }

    #[test]
    fn test_diff_reports_resize() {
        let before = BatchSnapshot { tables: vec![shape(1, 2, 2)] };
        let after = BatchSnapshot { tables: vec![shape(1, 3, 2)] };
        assert_eq!(before.diff(&after).as_deref(), Some("#1: 2x2 → 3x2"));
    }

    #[test]
    fn test_diff_none_when_unchanged() {
        let snapshot = BatchSnapshot { tables: vec![shape(1, 2, 2)] };
        assert_eq!(snapshot.diff(&snapshot.clone()), None);
    }

    #[test]
    fn test_diff_reports_added_and_removed() {
        let before = BatchSnapshot { tables: vec![shape(1, 2, 2)] };
        let after = BatchSnapshot { tables: vec![shape(7, 1, 1)] };
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("#1: removed; #7: added 1x1")
        );
    }
}

//! Command-line interface
//!
//! Every subcommand reads one document (a file or stdin), runs it through a
//! table-enabled editor and prints the result:
//! - `fix`: model markup after the post-fixer
//! - `to-html` / `from-html`: conversion between model markup and HTML
//! - `from-csv`: CSV/TSV import
//! - `exec`: run a named table command at the `[]` selection marker
//! - `key`: dispatch a keystroke (e.g. `shift+tab`) at the selection marker
//!
//! `--json` prints the resulting view tree instead.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::EngineConfig;
use crate::convert;
use crate::editor::Editor;
use crate::import::{table_from_csv, Delimiter, ImportOptions};
use crate::input::parse_key_string;
use crate::table::{table_editor, TableCommandId};

/// Table document-model engine
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about = "Table document-model engine")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/tessera/config.yaml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Print the resulting view tree as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Repair tables in model markup and print it back
    Fix {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,
    },
    /// Convert model markup to HTML
    ToHtml { input: Option<PathBuf> },
    /// Convert HTML to model markup
    FromHtml { input: Option<PathBuf> },
    /// Import CSV/TSV as a table
    FromCsv {
        input: Option<PathBuf>,
        /// Field delimiter (detected from the extension or content when omitted)
        #[arg(long, value_enum)]
        delimiter: Option<DelimiterArg>,
        /// Treat the first record as a heading row
        #[arg(long)]
        header: bool,
    },
    /// Run a table command on model markup with a selection marker
    Exec {
        /// Command name, e.g. insertTableRowBelow
        command: String,
        input: Option<PathBuf>,
        /// Run the command N times
        #[arg(long, value_name = "N", default_value_t = 1)]
        times: usize,
    },
    /// Dispatch a keystroke on model markup with a selection marker
    Key {
        /// Key string, e.g. tab or shift+tab
        keys: String,
        input: Option<PathBuf>,
    },
    /// List the registered table commands
    Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterArg {
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Pipe => Delimiter::Pipe,
            DelimiterArg::Semicolon => Delimiter::Semicolon,
        }
    }
}

impl Action {
    /// Input file of the action, if any
    pub fn input(&self) -> Option<&PathBuf> {
        match self {
            Action::Fix { input }
            | Action::ToHtml { input }
            | Action::FromHtml { input }
            | Action::FromCsv { input, .. }
            | Action::Exec { input, .. }
            | Action::Key { input, .. } => input.as_ref(),
            Action::Commands => None,
        }
    }

    /// Whether the action reads a document at all
    pub fn needs_input(&self) -> bool {
        !matches!(self, Action::Commands)
    }
}

/// Run an action over `source` and return what should be printed
pub fn run(action: &Action, source: &str, config: EngineConfig, json: bool) -> Result<String> {
    let mut editor = table_editor(config);

    let output = match action {
        Action::Commands => {
            return Ok(TableCommandId::ALL
                .iter()
                .map(|id| id.name())
                .collect::<Vec<_>>()
                .join("\n"));
        }
        Action::Fix { .. } => {
            editor.set_data(source)?;
            editor.get_data()
        }
        Action::ToHtml { .. } => {
            editor.set_data(source)?;
            convert::get_html(&editor)
        }
        Action::FromHtml { .. } => {
            convert::set_html(&mut editor, source)?;
            editor.get_data()
        }
        Action::FromCsv {
            input,
            delimiter,
            header,
        } => {
            let delimiter = delimiter.map(Delimiter::from).or_else(|| {
                input
                    .as_ref()
                    .and_then(|p| p.extension())
                    .and_then(|ext| Delimiter::from_extension(&ext.to_string_lossy()))
            });
            let fragment = table_from_csv(
                source,
                ImportOptions {
                    delimiter,
                    header: *header,
                },
            )?;
            editor.set_content(&fragment);
            editor.get_data()
        }
        Action::Exec { command, times, .. } => {
            if TableCommandId::from_name(command).is_none() {
                bail!("unknown command '{}'", command);
            }
            editor.set_data(source)?;
            exec(&mut editor, command, *times);
            editor.get_data_with_selection()
        }
        Action::Key { keys, .. } => {
            editor.set_data(source)?;
            let mut event = parse_key_string(keys).map_err(|e| anyhow!(e))?;
            let handled = editor.handle_keydown(&mut event);
            tracing::info!("key {}: handled = {}", event, handled);
            editor.get_data_with_selection()
        }
    };

    if json {
        return Ok(serde_json::to_string_pretty(&convert::view_of(&editor))?);
    }
    Ok(output)
}

fn exec(editor: &mut Editor, command: &str, times: usize) {
    for run in 0..times {
        if !editor.execute(command) {
            tracing::warn!("{} is not enabled (after {} runs)", command, run);
            break;
        }
    }
}

//! CSV/TSV import into a table fragment
//!
//! Rows may have different lengths; the table post-fixer pads them once the
//! fragment is inserted into an editor.

use std::io::Cursor;

use crate::model::{Fragment, FragmentNode};
use crate::table::utils::{HEADING_ROWS, TABLE, TABLE_CELL, TABLE_ROW};

/// Field separator of delimited text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter implied by a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Error type for CSV parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV parse error at line {}: {}", line, self.message),
            None => write!(f, "CSV parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Import options
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// `None` detects the delimiter from the content
    pub delimiter: Option<Delimiter>,
    /// Mark the first record as a heading row
    pub header: bool,
}

/// Parse delimited text into rows of fields
pub fn parse_records(content: &str, delimiter: Delimiter) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError {
            message: e.to_string(),
            line: Some(e.position().map_or(line_num + 1, |p| p.line() as usize)),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Detect delimiter by counting candidates in the first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let head: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let candidates = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Pipe,
        Delimiter::Semicolon,
    ];
    // Ties go to the earlier candidate.
    candidates
        .into_iter()
        .map(|d| (head.matches(d.char()).count(), d))
        .fold((0, Delimiter::Comma), |best, (count, d)| {
            if count > best.0 {
                (count, d)
            } else {
                best
            }
        })
        .1
}

/// Build a table fragment from delimited text
pub fn table_from_csv(content: &str, options: ImportOptions) -> Result<Fragment, ParseError> {
    let delimiter = options.delimiter.unwrap_or_else(|| detect_delimiter(content));
    let records = parse_records(content, delimiter)?;
    if records.is_empty() {
        return Err(ParseError {
            message: "no records".to_string(),
            line: None,
        });
    }

    let rows = records
        .iter()
        .map(|record| {
            let cells = record
                .iter()
                .map(|field| {
                    let content = if field.is_empty() {
                        Vec::new()
                    } else {
                        vec![FragmentNode::text(field)]
                    };
                    FragmentNode::element(TABLE_CELL, content)
                })
                .collect();
            FragmentNode::element(TABLE_ROW, cells)
        })
        .collect();

    let mut table = FragmentNode::element(TABLE, rows);
    if options.header {
        table = table.with_attribute(HEADING_ROWS, 1);
    }
    tracing::debug!(
        "import: {} records with delimiter {:?}",
        records.len(),
        delimiter
    );
    Ok(table.into())
}

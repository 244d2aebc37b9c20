//! Table types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A table structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a table from rows of text values.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(|row| TableRow::from_strings(row)).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table, one line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation: trimmed cell texts joined by `" | "`.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text_content().trim().to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell paragraphs
    pub paragraphs: Vec<Paragraph>,

    /// Tables nested inside this cell; not part of the cell text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
}

impl TableCell {
    /// Create a new cell with text content. Embedded `\n` splits paragraphs.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_paragraphs(text.split('\n').map(Paragraph::with_text).collect())
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            tables: Vec::new(),
        }
    }

    /// Get the cell text: paragraph texts joined by line breaks.
    pub fn text_content(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }
}

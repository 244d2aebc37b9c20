//! Body-level content blocks.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// Opening marker of a table in flattened content.
pub const TABLE_START_MARKER: &str = "[表格開始]";

/// Closing marker of a table in flattened content.
pub const TABLE_END_MARKER: &str = "[表格結束]";

/// A content block of the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),
}

impl Block {
    /// Create a plain paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph::with_text(text))
    }

    /// Create a table block from rows of text values.
    pub fn table<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Table(Table::from_rows(rows))
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Leading text used to recognize section titles.
    ///
    /// Paragraphs yield their trimmed text. Tables yield the trimmed cell
    /// texts of their first row joined by single spaces, so a first row of
    /// several blank cells is still non-empty.
    pub fn heading_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text().trim().to_string(),
            Block::Table(t) => t
                .rows
                .first()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|c| c.text_content().trim().to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default(),
        }
    }

    /// Full content text recorded for the block.
    ///
    /// Tables are flattened row by row between start/end markers.
    pub fn content_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.text().trim().to_string(),
            Block::Table(t) => format!(
                "\n{}\n{}\n{}",
                TABLE_START_MARKER,
                t.plain_text(),
                TABLE_END_MARKER
            ),
        }
    }
}

//! Table-of-contents extraction.
//!
//! The TOC is the first body table whose leading rows mention the profile's
//! keyword. Each row's first cell may wrap one title over several physical
//! lines and follow it with descriptive text; the title pattern marks where a
//! title starts and an over-long line marks where the description begins.

use crate::model::Table;

use super::profile::TitlePattern;

/// Rows inspected when looking for the TOC keyword.
pub const TOC_HEADER_ROWS: usize = 5;

/// Continuation lines longer than this (in characters) end a title.
pub const MAX_CONTINUATION_CHARS: usize = 80;

/// Extract ordered section titles from the first table containing `keyword`.
///
/// Returns an empty list when no table qualifies.
pub fn extract_toc<'a>(
    tables: impl IntoIterator<Item = &'a Table>,
    keyword: &str,
    pattern: &TitlePattern,
) -> Vec<String> {
    match find_toc_table(tables, keyword) {
        Some(table) => table
            .rows
            .iter()
            .filter_map(|row| row.cells.first())
            .filter_map(|cell| parse_title_cell(&cell.text_content(), pattern))
            .collect(),
        None => Vec::new(),
    }
}

/// Find the first table whose first rows contain `keyword`.
pub fn find_toc_table<'a>(
    tables: impl IntoIterator<Item = &'a Table>,
    keyword: &str,
) -> Option<&'a Table> {
    tables.into_iter().find(|table| {
        let header: String = table
            .rows
            .iter()
            .take(TOC_HEADER_ROWS)
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.text_content().trim().to_string())
            .collect();
        header.contains(keyword)
    })
}

/// Build a title from one TOC cell, or `None` when no line starts a title.
pub fn parse_title_cell(cell_text: &str, pattern: &TitlePattern) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut capturing = false;

    for line in cell_text
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        if pattern.is_match(line) {
            capturing = true;
            parts.push(line);
        } else if capturing {
            if line.chars().count() > MAX_CONTINUATION_CHARS {
                break;
            }
            parts.push(line);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

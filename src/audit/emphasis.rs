//! Bold and underline span extraction.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Paragraph, TextStyle};

/// Emphasis kinds compared by the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Bold runs
    Bold,
    /// Underlined runs
    Underline,
}

impl Emphasis {
    /// Check whether a run style carries this emphasis.
    pub fn applies_to(self, style: &TextStyle) -> bool {
        match self {
            Emphasis::Bold => style.bold,
            Emphasis::Underline => style.underline,
        }
    }
}

/// One emphasized span with the paragraph it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisItem {
    /// Trimmed text of the contiguous emphasized runs
    pub text: String,

    /// Full trimmed text of the enclosing paragraph
    pub context: String,
}

impl EmphasisItem {
    /// Create a new item.
    pub fn new(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
        }
    }
}

/// Extract emphasized spans from a block in document order.
///
/// Tables are walked row by row, cell by cell, paragraph by paragraph.
pub fn extract(block: &Block, emphasis: Emphasis) -> Vec<EmphasisItem> {
    let mut items = Vec::new();
    match block {
        Block::Paragraph(p) => extract_paragraph(p, emphasis, &mut items),
        Block::Table(t) => {
            for paragraph in t
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .flat_map(|cell| cell.paragraphs.iter())
            {
                extract_paragraph(paragraph, emphasis, &mut items);
            }
        }
    }
    items
}

/// Append the emphasized spans of one paragraph to `items`.
///
/// Runs without the emphasis only separate spans; they never appear in the
/// output.
pub fn extract_paragraph(paragraph: &Paragraph, emphasis: Emphasis, items: &mut Vec<EmphasisItem>) {
    let text = paragraph.text();
    let context = text.trim();
    if context.is_empty() {
        return;
    }

    let mut buffer = String::new();
    for run in &paragraph.runs {
        if emphasis.applies_to(&run.style) {
            buffer.push_str(&run.text);
        } else {
            flush(&mut buffer, context, items);
        }
    }
    flush(&mut buffer, context, items);
}

fn flush(buffer: &mut String, context: &str, items: &mut Vec<EmphasisItem>) {
    let span = buffer.trim();
    if !span.is_empty() {
        items.push(EmphasisItem::new(span, context));
    }
    buffer.clear();
}

//! Aligned document sections.

use serde::{Deserialize, Serialize};

use super::emphasis::EmphasisItem;

/// A titled slice of a document with the emphasis found inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Title from the table of contents (or the whole-document label)
    pub title: String,

    /// Content text of every block attributed to the section
    pub content_blocks: Vec<String>,

    /// Bold spans in document order
    pub bold_items: Vec<EmphasisItem>,

    /// Underlined spans in document order
    pub underline_items: Vec<EmphasisItem>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append block content; blank text is ignored.
    pub fn add_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.trim().is_empty() {
            self.content_blocks.push(text);
        }
    }

    /// Append bold spans.
    pub fn add_bold_items(&mut self, items: impl IntoIterator<Item = EmphasisItem>) {
        self.bold_items.extend(items);
    }

    /// Append underlined spans.
    pub fn add_underline_items(&mut self, items: impl IntoIterator<Item = EmphasisItem>) {
        self.underline_items.extend(items);
    }

    /// All content joined with line breaks.
    pub fn full_content(&self) -> String {
        self.content_blocks.join("\n")
    }

    /// Whether the section has no content and no emphasis.
    pub fn is_empty(&self) -> bool {
        self.content_blocks.is_empty()
            && self.bold_items.is_empty()
            && self.underline_items.is_empty()
    }
}

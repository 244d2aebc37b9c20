//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph, in document order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph from a list of runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.runs.push(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get the raw text of the paragraph (all runs concatenated).
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.trim().is_empty())
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                underline: false,
            },
        }
    }

    /// Create an underlined text run.
    pub fn underline(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: false,
                underline: true,
            },
        }
    }

    /// Create a run with an explicit style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Direct run formatting relevant to the audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Underlined text
    pub underline: bool,
}

impl TextStyle {
    /// Style with both bold and underline set.
    pub fn bold_underline() -> Self {
        Self {
            bold: true,
            underline: true,
        }
    }

    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.underline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.text(), "Hello world!");
    }

    #[test]
    fn test_paragraph_is_empty() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("  \t").is_empty());
        assert!(!Paragraph::with_text(" a ").is_empty());
    }

    #[test]
    fn test_text_style() {
        let style = TextStyle::default();
        assert!(!style.has_styling());
        assert!(TextRun::underline("x").style.has_styling());

        let both = TextStyle::bold_underline();
        assert!(both.bold && both.underline);
    }
}

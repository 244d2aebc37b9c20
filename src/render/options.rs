//! Report options and configuration.

use super::JsonFormat;

/// Output format of the audit report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Self-contained HTML page
    #[default]
    Html,
    /// JSON document
    Json(JsonFormat),
}

impl ReportFormat {
    /// Default report file name for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Html => "Bilingual_Audit_Report.html",
            ReportFormat::Json(_) => "Bilingual_Audit_Report.json",
        }
    }
}

/// Options for rendering an audit report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Page title
    pub title: String,

    /// Main heading
    pub heading: String,

    /// Column label for the Chinese document
    pub chinese_label: String,

    /// Column label for the English document
    pub english_label: String,

    /// Footer line
    pub footer: String,

    /// Output format
    pub format: ReportFormat,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the main heading.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Set the column labels.
    pub fn with_labels(mut self, chinese: impl Into<String>, english: impl Into<String>) -> Self {
        self.chinese_label = chinese.into();
        self.english_label = english.into();
        self
    }

    /// Set the footer line.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Comparison Report".to_string(),
            heading: "Chinese-English Document Comparison Report".to_string(),
            chinese_label: "Chinese".to_string(),
            english_label: "English".to_string(),
            footer: "Generated by docaudit".to_string(),
            format: ReportFormat::Html,
        }
    }
}

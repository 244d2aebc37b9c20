//! Rendering module for converting audit reports to output formats.

mod html;
mod json;
mod options;

pub use html::{
    to_html, HtmlRenderer, EMPTY_TABLE_MESSAGE, MISSING_CHINESE_SECTION, MISSING_ENGLISH_SECTION,
};
pub use json::{to_json, JsonFormat};
pub use options::{ReportFormat, ReportOptions};

use crate::audit::AuditReport;
use crate::error::Result;

/// Render a report in the format selected by `options`.
pub fn render(report: &AuditReport, options: &ReportOptions) -> Result<String> {
    match options.format {
        ReportFormat::Html => to_html(report, options),
        ReportFormat::Json(format) => to_json(report, format),
    }
}

//! JSON rendering for audit reports.

use crate::audit::AuditReport;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an audit report to JSON.
pub fn to_json(report: &AuditReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{DocumentAudit, EmphasisItem, Section};

    fn report() -> AuditReport {
        let mut section = Section::new("Part A: Company");
        section.add_bold_items(vec![EmphasisItem::new("World", "Hello World!")]);
        let mut english = DocumentAudit::unavailable("eng.docx");
        english.sections.push(section);
        AuditReport::new(DocumentAudit::unavailable("chi.docx"), english)
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&report(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"generated_at\""));
        assert!(json.contains("\"unavailable\""));
        assert!(json.contains("Hello World!"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&report(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_reads_back() {
        let json = to_json(&report(), JsonFormat::Compact).unwrap();
        let parsed: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.english.sections[0].title, "Part A: Company");
        assert!(parsed.chinese.sections.is_empty());
    }
}

//! Integration tests for report rendering.

mod common;

use common::*;
use docaudit::audit::{analyze, analyze_document, AuditOptions};
use docaudit::render::{self, MISSING_CHINESE_SECTION, MISSING_ENGLISH_SECTION};
use docaudit::{parse_bytes, AuditReport, JsonFormat, ReportFormat, ReportOptions, CHINESE, ENGLISH};
use tempfile::tempdir;

fn english_with_markup() -> String {
    [
        table(&[&["Contents", "Page"], &["Part A: <Tags> & More", "1"]]),
        paragraph("Part A: <Tags> & More"),
        styled_paragraph(&[plain("Use "), bold("<script>alert(1)</script>"), plain(" \"safely\"")]),
    ]
    .concat()
}

#[test]
fn test_document_text_escaped_in_html() {
    let english = analyze(
        &parse_bytes(&docx_bytes(&english_with_markup())).unwrap(),
        "eng.docx",
        &ENGLISH,
    )
    .unwrap();
    let chinese = analyze(
        &parse_bytes(&docx_bytes(&chinese_body())).unwrap(),
        "chi.docx",
        &CHINESE,
    )
    .unwrap();

    let report = AuditReport::new(chinese, english);
    let html = render::to_html(&report, &ReportOptions::default()).unwrap();

    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Part A: &lt;Tags&gt; &amp; More"));
    assert!(html.contains(
        "data-context=\"Use &lt;script&gt;alert(1)&lt;/script&gt; &quot;safely&quot;\""
    ));
    assert!(!html.contains(MISSING_CHINESE_SECTION));
    assert!(html.contains(MISSING_ENGLISH_SECTION));
}

#[test]
fn test_placeholders_for_unavailable_chinese_document() {
    let dir = tempdir().unwrap();
    let english = dir.path().join("eng.docx");
    write_docx(&english, &english_body());

    let options = AuditOptions::default();
    let report = AuditReport::new(
        analyze_document(dir.path().join("missing.docx"), &CHINESE, &options),
        analyze_document(&english, &ENGLISH, &options),
    );
    let html = render::to_html(&report, &ReportOptions::default()).unwrap();

    assert_eq!(html.matches(MISSING_CHINESE_SECTION).count(), 2);
    assert!(html.contains("not available"));
    assert!(html.contains("2 of 2 TOC sections found"));
}

#[test]
fn test_render_dispatches_on_format() {
    let report = AuditReport::new(
        analyze(&parse_bytes(&docx_bytes(&chinese_body())).unwrap(), "c", &CHINESE).unwrap(),
        analyze(&parse_bytes(&docx_bytes(&english_body())).unwrap(), "e", &ENGLISH).unwrap(),
    );

    let html = render::render(&report, &ReportOptions::default()).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));

    let options = ReportOptions::new().with_format(ReportFormat::Json(JsonFormat::Compact));
    let json = render::render(&report, &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["chinese"]["mode"], "toc");
    assert_eq!(value["english"]["sections"].as_array().unwrap().len(), 2);
    assert_eq!(
        value["english"]["sections"][0]["bold_items"][0]["text"],
        "revenue"
    );
}

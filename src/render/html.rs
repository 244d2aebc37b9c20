//! HTML rendering for audit reports.
//!
//! The page is self-contained: inline CSS and a small script that copies an
//! item's paragraph context to the clipboard so it can be searched for in
//! the source document.

use crate::audit::{AlignMode, AuditReport, DocumentAudit, EmphasisItem, Section};
use crate::error::Result;

use super::ReportOptions;

/// Title shown when the Chinese document has no section at an index.
pub const MISSING_CHINESE_SECTION: &str = "(No such section)";

/// Title shown when the English document has no section at an index.
pub const MISSING_ENGLISH_SECTION: &str = "(Section Missing)";

/// Placeholder for a comparison table with no items on either side.
pub const EMPTY_TABLE_MESSAGE: &str = "No Content";

const STYLE: &str = r##"body{font-family:"Microsoft JhengHei",Arial,sans-serif;background-color:#f4f4f9;margin:40px}
h1{text-align:center;color:#333}
.summary{max-width:900px;margin:0 auto 30px auto;color:#555}
.section-container{background:#fff;padding:25px;margin-bottom:30px;border-radius:8px;box-shadow:0 4px 6px rgba(0,0,0,.1)}
.section-header{border-bottom:2px solid #3498db;padding-bottom:15px;margin-bottom:20px;display:flex;justify-content:space-between;align-items:center}
.sub-info{color:#7f8c8d;font-size:.95em;margin-top:5px}
.category-header{margin-top:30px;margin-bottom:10px;font-size:1.1em;font-weight:700;color:#2980b9;border-left:5px solid #2980b9;background-color:#ecf0f1;padding:8px}
table{width:100%;border-collapse:collapse;table-layout:fixed;margin-bottom:20px}
th,td{border:1px solid #e0e0e0;padding:10px;text-align:left;vertical-align:top;word-wrap:break-word}
thead th{background-color:#3498db;color:#fff;font-weight:700}
tr>*:nth-child(1){width:50px;text-align:center;background-color:#f8f9fa;color:#666;font-weight:700}
tr:nth-child(even){background-color:#fcfcfc}
tr:hover{background-color:#f1f8ff;transition:.2s}
.item-wrapper{display:flex;align-items:flex-start;gap:8px}
.copy-btn{background-color:#eee;border:1px solid #ccc;border-radius:4px;cursor:pointer;padding:2px 6px;font-size:14px;flex-shrink:0;transition:background-color .2s}
.copy-btn:hover{background-color:#ddd}
.copy-btn:active{background-color:#bbb}
.text-content{font-weight:500}
.empty-msg{color:#95a5a6;font-style:italic;padding:10px;border:1px dashed #ccc;background:#fafafa}
.footer{text-align:center;color:#aaa;margin-top:50px;font-size:.8em;border-top:1px solid #eee;padding-top:20px}"##;

const SCRIPT: &str = r##"function copyContext(btn) {
    navigator.clipboard.writeText(btn.dataset.context).then(function() {
        if (btn.dataset.timer) {
            clearTimeout(parseInt(btn.dataset.timer));
        }
        btn.style.backgroundColor = "#90EE90";
        const timerId = setTimeout(function() {
            btn.style.backgroundColor = "#eee";
            delete btn.dataset.timer;
        }, 500);
        btn.dataset.timer = timerId;
    }, function(err) {
        console.error("Could not copy text: ", err);
        alert("Failed to copy context.");
    });
}"##;

/// Render an audit report as an HTML page.
pub fn to_html(report: &AuditReport, options: &ReportOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(report)
}

/// HTML report renderer.
pub struct HtmlRenderer {
    options: ReportOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer with the given options.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Render a report.
    pub fn render(&self, report: &AuditReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output);
        self.render_summary(&mut output, report);

        for (index, (chinese, english)) in report.section_pairs().enumerate() {
            self.render_section(&mut output, index, chinese, english);
        }

        output.push_str(&format!(
            "<div class=\"footer\">{} &middot; {}</div>\n",
            escape_html(&self.options.footer),
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str("</body>\n</html>\n");

        Ok(output)
    }

    fn render_header(&self, output: &mut String) {
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&self.options.title)));
        output.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
        output.push_str(&format!("<script>\n{}\n</script>\n", SCRIPT));
        output.push_str("</head>\n<body>\n");
        output.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.options.heading)));
    }

    fn render_summary(&self, output: &mut String, report: &AuditReport) {
        output.push_str("<div class=\"summary\">");
        for (label, audit) in [
            (&self.options.chinese_label, &report.chinese),
            (&self.options.english_label, &report.english),
        ] {
            output.push_str(&format!(
                "<div class=\"sub-info\"><b>{}:</b> {} ({})</div>",
                escape_html(label),
                escape_html(&audit.file_name()),
                describe(audit)
            ));
        }
        output.push_str("</div>\n");
    }

    fn render_section(
        &self,
        output: &mut String,
        index: usize,
        chinese: Option<&Section>,
        english: Option<&Section>,
    ) {
        let title_chi = chinese.map_or(MISSING_CHINESE_SECTION, |s| s.title.as_str());
        let title_eng = english.map_or(MISSING_ENGLISH_SECTION, |s| s.title.as_str());

        output.push_str("<div class=\"section-container\">");
        output.push_str(&format!(
            "<div class=\"section-header\"><div><strong>Section {}</strong></div></div>",
            index + 1
        ));
        output.push_str(&format!(
            "<div class=\"sub-info\"><b>CH Title:</b> {}</div>",
            escape_html(title_chi)
        ));
        output.push_str(&format!(
            "<div class=\"sub-info\"><b>EN Title:</b> {}</div>",
            escape_html(title_eng)
        ));

        output.push_str(
            "<div class=\"category-header\">1. Bold Text (Click &#128203; to copy context)</div>",
        );
        self.render_comparison(
            output,
            "Bold",
            chinese.map_or(&[][..], |s| s.bold_items.as_slice()),
            english.map_or(&[][..], |s| s.bold_items.as_slice()),
        );

        output.push_str(
            "<div class=\"category-header\">2. Underlined Text (Click &#128203; to copy context)</div>",
        );
        self.render_comparison(
            output,
            "Underline",
            chinese.map_or(&[][..], |s| s.underline_items.as_slice()),
            english.map_or(&[][..], |s| s.underline_items.as_slice()),
        );

        output.push_str("</div>\n");
    }

    /// Two-column table pairing items by index.
    fn render_comparison(
        &self,
        output: &mut String,
        kind: &str,
        chinese: &[EmphasisItem],
        english: &[EmphasisItem],
    ) {
        if chinese.is_empty() && english.is_empty() {
            output.push_str(&format!(
                "<div class=\"empty-msg\">{}</div>",
                EMPTY_TABLE_MESSAGE
            ));
            return;
        }

        output.push_str("<table class=\"table\"><thead><tr><th></th>");
        output.push_str(&format!(
            "<th>{} ({})</th><th>{} ({})</th>",
            escape_html(&self.options.chinese_label),
            kind,
            escape_html(&self.options.english_label),
            kind
        ));
        output.push_str("</tr></thead><tbody>");

        let rows = chinese.len().max(english.len());
        for i in 0..rows {
            output.push_str(&format!("<tr><th>{}</th><td>", i + 1));
            if let Some(item) = chinese.get(i) {
                render_item(output, item);
            }
            output.push_str("</td><td>");
            if let Some(item) = english.get(i) {
                render_item(output, item);
            }
            output.push_str("</td></tr>");
        }

        output.push_str("</tbody></table>");
    }
}

fn render_item(output: &mut String, item: &EmphasisItem) {
    output.push_str(&format!(
        "<div class=\"item-wrapper\"><button class=\"copy-btn\" data-context=\"{}\" onclick=\"copyContext(this)\" title=\"Copy context to search\">&#128203;</button><span class=\"text-content\">{}</span></div>",
        escape_html(&item.context),
        escape_html(&item.text).replace('\n', " ")
    ));
}

fn describe(audit: &DocumentAudit) -> String {
    match audit.mode {
        AlignMode::Toc => format!(
            "{} of {} TOC sections found",
            audit.sections.len(),
            audit.titles.len()
        ),
        AlignMode::WholeDocument => "no TOC, whole document".to_string(),
        AlignMode::Unavailable => "not available".to_string(),
    }
}

/// Escape text for HTML element content and quoted attribute values.
fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

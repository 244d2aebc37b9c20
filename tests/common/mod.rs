//! Shared helpers for building DOCX fixtures in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

/// A run of text with bold/underline flags.
pub struct Run<'a> {
    pub text: &'a str,
    pub bold: bool,
    pub underline: bool,
}

pub fn plain(text: &str) -> Run<'_> {
    Run {
        text,
        bold: false,
        underline: false,
    }
}

pub fn bold(text: &str) -> Run<'_> {
    Run {
        text,
        bold: true,
        underline: false,
    }
}

pub fn underline(text: &str) -> Run<'_> {
    Run {
        text,
        bold: false,
        underline: true,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn run_xml(run: &Run) -> String {
    let mut props = String::new();
    if run.bold {
        props.push_str("<w:b/>");
    }
    if run.underline {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }
    let props = if props.is_empty() {
        String::new()
    } else {
        format!("<w:rPr>{}</w:rPr>", props)
    };
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        props,
        escape(run.text)
    )
}

/// A paragraph of styled runs.
pub fn styled_paragraph(runs: &[Run]) -> String {
    let runs: String = runs.iter().map(run_xml).collect();
    format!("<w:p>{}</w:p>", runs)
}

/// A paragraph with a single plain run.
pub fn paragraph(text: &str) -> String {
    styled_paragraph(&[plain(text)])
}

/// A table of plain cells; `\n` inside a cell starts a new cell paragraph.
pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            xml.push_str("<w:tc>");
            for line in cell.split('\n') {
                xml.push_str(&paragraph(line));
            }
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Wrap body markup in a complete `word/document.xml`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NS}><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

/// Package body markup as DOCX bytes.
pub fn docx_bytes(body: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(body).as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Write body markup as a DOCX file.
pub fn write_docx(path: &Path, body: &str) {
    std::fs::write(path, docx_bytes(body)).unwrap();
}

/// Chinese fixture: TOC with two titles, both present in the body.
pub fn chinese_body() -> String {
    [
        table(&[
            &["目錄", "頁碼"],
            &["甲部：\n公司資料", "1"],
            &["乙部：財務資料", "5"],
        ]),
        paragraph("甲部：公司資料"),
        styled_paragraph(&[plain("本公司"), bold("收入"), plain("增加")]),
        paragraph("乙部：財務資料"),
        styled_paragraph(&[underline("重要"), plain("事項")]),
    ]
    .concat()
}

/// English fixture: TOC with two titles, both present in the body.
pub fn english_body() -> String {
    [
        table(&[
            &["Contents", "Page"],
            &["Part A: Company\nInformation", "1"],
            &["Part B: Finance", "5"],
        ]),
        paragraph("Part A: Company Information"),
        styled_paragraph(&[plain("The company "), bold("revenue"), plain(" increased.")]),
        paragraph("PART B:  FINANCE"),
        styled_paragraph(&[underline("Important"), plain(" matters")]),
    ]
    .concat()
}

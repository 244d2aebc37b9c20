//! DOCX document parser using zip and quick-xml.
//!
//! Only `word/document.xml` is read. Body-level paragraphs and tables become
//! [`Block`]s in document order; content controls (`w:sdt`) are descended
//! into, drawings and text boxes are skipped. Run formatting is taken from
//! direct `w:rPr` properties only; style inheritance is not resolved.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::{detect_format_from_path, DocumentFormat};
use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, Table, TableCell, TableRow, TextRun, TextStyle};

use super::options::{ErrorMode, ParseOptions};

/// Main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Elements whose content never contributes to paragraph text or run style.
///
/// `rPrChange`/`pPrChange` hold the formatting before a tracked change.
const SKIPPED_ELEMENTS: &[&[u8]] = &[
    b"drawing",
    b"pict",
    b"object",
    b"AlternateContent",
    b"rPrChange",
    b"pPrChange",
];

/// DOCX document parser.
pub struct DocxParser {
    xml: String,
    file_name: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        if detect_format_from_path(path)? == DocumentFormat::LegacyDoc {
            return Err(Error::UnsupportedFormat(
                "legacy .doc files must be saved as .docx".to_string(),
            ));
        }

        let file = File::open(path)?;
        let xml = read_document_part(file)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Ok(Self {
            xml,
            file_name,
            options,
        })
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX package from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        match crate::detect::detect_format_from_bytes(data)? {
            DocumentFormat::Docx => {}
            DocumentFormat::LegacyDoc => {
                return Err(Error::UnsupportedFormat(
                    "legacy .doc files must be saved as .docx".to_string(),
                ))
            }
        }

        let xml = read_document_part(Cursor::new(data))?;
        Ok(Self {
            xml,
            file_name: None,
            options,
        })
    }

    /// Parse a DOCX package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX package from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Create a parser over a raw `document.xml` string.
    pub fn from_document_xml(xml: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            file_name: None,
            options: ParseOptions::default(),
        }
    }

    /// Replace the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the document body into blocks.
    pub fn parse(&self) -> Result<Document> {
        let mut reader = Reader::from_str(&self.xml);
        reader.trim_text(false);

        let mut body = BodyBuilder::new(self.options.keep_nested_tables);
        let mut buf = Vec::new();

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(event) => event,
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(Error::from(e)),
                    ErrorMode::Lenient => {
                        log::warn!(
                            "Malformed document markup at byte {}: {}; keeping {} blocks",
                            reader.buffer_position(),
                            e,
                            body.blocks.len()
                        );
                        break;
                    }
                },
            };

            match event {
                Event::Start(ref e) => body.on_start(e),
                Event::Empty(ref e) => body.on_empty(e),
                Event::Text(ref e) => {
                    if body.wants_text() {
                        match e.unescape() {
                            Ok(text) => body.on_text(&text),
                            Err(err) if self.options.error_mode == ErrorMode::Strict => {
                                return Err(Error::from(err))
                            }
                            Err(err) => log::warn!("Skipping undecodable text: {}", err),
                        }
                    }
                }
                Event::CData(ref e) => {
                    if body.wants_text() {
                        body.on_text(&String::from_utf8_lossy(e));
                    }
                }
                Event::End(ref e) => body.on_end(e.local_name().as_ref()),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let mut document = Document::new();
        for block in body.blocks {
            document.add_block(block);
        }
        document.metadata.file_name = self.file_name.clone();

        log::debug!(
            "Parsed {} paragraphs and {} tables",
            document.metadata.paragraph_count,
            document.metadata.table_count
        );

        Ok(document)
    }
}

/// Read the main document part out of a zip package.
fn read_document_part<R: Read + Seek>(reader: R) -> Result<String> {
    let mut archive = ZipArchive::new(reader)?;
    let mut entry = archive.by_name(DOCUMENT_PART)?;
    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Table under construction.
#[derive(Default)]
struct TableFrame {
    table: Table,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

/// Run under construction.
#[derive(Default)]
struct RunFrame {
    text: String,
    style: TextStyle,
}

/// Streaming state that turns WordprocessingML events into blocks.
struct BodyBuilder {
    blocks: Vec<Block>,
    tables: Vec<TableFrame>,
    paragraph: Option<Paragraph>,
    run: Option<RunFrame>,
    in_run_properties: bool,
    in_text: bool,
    skip_depth: usize,
    keep_nested_tables: bool,
}

impl BodyBuilder {
    fn new(keep_nested_tables: bool) -> Self {
        Self {
            blocks: Vec::new(),
            tables: Vec::new(),
            paragraph: None,
            run: None,
            in_run_properties: false,
            in_text: false,
            skip_depth: 0,
            keep_nested_tables,
        }
    }

    fn wants_text(&self) -> bool {
        self.skip_depth == 0 && self.in_text && self.run.is_some()
    }

    fn on_start(&mut self, e: &BytesStart) {
        let name = e.local_name();
        let local = name.as_ref();

        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return;
        }
        if SKIPPED_ELEMENTS.contains(&local) {
            self.skip_depth = 1;
            return;
        }

        match local {
            b"tbl" => self.tables.push(TableFrame::default()),
            b"tr" => {
                if let Some(frame) = self.tables.last_mut() {
                    frame.row = Some(TableRow::default());
                }
            }
            b"tc" => {
                if let Some(frame) = self.tables.last_mut() {
                    frame.cell = Some(TableCell::default());
                }
            }
            b"p" => self.paragraph = Some(Paragraph::new()),
            b"r" => {
                if self.paragraph.is_some() {
                    self.run = Some(RunFrame::default());
                }
            }
            b"rPr" => self.in_run_properties = self.run.is_some(),
            b"t" => self.in_text = true,
            _ => self.on_inline(e),
        }
    }

    fn on_empty(&mut self, e: &BytesStart) {
        if self.skip_depth > 0 {
            return;
        }
        match e.local_name().as_ref() {
            b"p" => {
                self.paragraph = Some(Paragraph::new());
                self.on_end(b"p");
            }
            b"tc" => {
                if let Some(frame) = self.tables.last_mut() {
                    frame.cell = Some(TableCell::default());
                }
                self.on_end(b"tc");
            }
            _ => self.on_inline(e),
        }
    }

    /// Formatting toggles and inline break characters.
    fn on_inline(&mut self, e: &BytesStart) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let name = e.local_name();

        if self.in_run_properties {
            match name.as_ref() {
                b"b" => run.style.bold = toggle_value(e),
                b"u" => run.style.underline = underline_value(e),
                _ => {}
            }
            return;
        }

        match name.as_ref() {
            b"tab" => run.text.push('\t'),
            b"br" | b"cr" => run.text.push('\n'),
            _ => {}
        }
    }

    fn on_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn on_end(&mut self, local: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match local {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_properties = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.add_run(TextRun::styled(run.text, run.style));
                }
                self.in_run_properties = false;
                self.in_text = false;
            }
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    match self.tables.last_mut() {
                        Some(TableFrame {
                            cell: Some(cell), ..
                        }) => cell.paragraphs.push(paragraph),
                        Some(_) => {}
                        None => self.blocks.push(Block::Paragraph(paragraph)),
                    }
                }
            }
            b"tc" => {
                if let Some(frame) = self.tables.last_mut() {
                    if let (Some(cell), Some(row)) = (frame.cell.take(), frame.row.as_mut()) {
                        row.cells.push(cell);
                    }
                }
            }
            b"tr" => {
                if let Some(frame) = self.tables.last_mut() {
                    if let Some(row) = frame.row.take() {
                        frame.table.add_row(row);
                    }
                }
            }
            b"tbl" => {
                if let Some(frame) = self.tables.pop() {
                    match self.tables.last_mut() {
                        Some(parent) => {
                            if self.keep_nested_tables {
                                if let Some(cell) = parent.cell.as_mut() {
                                    cell.tables.push(frame.table);
                                }
                            }
                        }
                        None => self.blocks.push(Block::Table(frame.table)),
                    }
                }
            }
            _ => {}
        }
    }
}

/// Read an on/off property such as `w:b` or `w:i`.
fn toggle_value(e: &BytesStart) -> bool {
    match attribute_value(e, b"val") {
        Some(val) => !matches!(val.as_str(), "0" | "false" | "off" | "none"),
        None => true,
    }
}

/// Read `w:u`; any underline kind except `none` counts.
fn underline_value(e: &BytesStart) -> bool {
    match attribute_value(e, b"val") {
        Some(val) => val != "none",
        None => true,
    }
}

fn attribute_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn document_xml(body: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NS}><w:body>{body}</w:body></w:document>"#)
    }

    fn parse_body(body: &str) -> Document {
        DocxParser::from_document_xml(document_xml(body))
            .parse()
            .unwrap()
    }

    fn docx_bytes(body: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(document_xml(body).as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraph_runs_and_styles() {
        let doc = parse_body(
            r#"<w:p><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>World</w:t></w:r><w:r><w:rPr><w:u w:val="single"/></w:rPr><w:t>!</w:t></w:r></w:p>"#,
        );

        assert_eq!(doc.block_count(), 1);
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "Hello World!");
        assert_eq!(p.runs.len(), 3);
        assert!(!p.runs[0].style.bold);
        assert!(p.runs[1].style.bold);
        assert!(p.runs[2].style.underline);
    }

    #[test]
    fn test_toggle_values() {
        let doc = parse_body(
            r#"<w:p><w:r><w:rPr><w:b w:val="0"/><w:u w:val="none"/></w:rPr><w:t>plain</w:t></w:r><w:r><w:rPr><w:b w:val="true"/><w:i/></w:rPr><w:t>strong</w:t></w:r></w:p>"#,
        );

        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(!p.runs[0].style.bold);
        assert!(!p.runs[0].style.underline);
        assert!(p.runs[1].style.bold);
        assert!(!p.runs[1].style.underline);
    }

    #[test]
    fn test_tracked_formatting_change_ignored() {
        let doc = parse_body(
            r#"<w:p><w:r><w:rPr><w:rPrChange w:id="1" w:author="A"><w:rPr><w:b/><w:u w:val="single"/></w:rPr></w:rPrChange></w:rPr><w:t>now plain</w:t></w:r><w:r><w:rPr><w:u w:val="single"/><w:rPrChange w:id="2" w:author="A"><w:rPr/></w:rPrChange></w:rPr><w:t>now underlined</w:t></w:r></w:p>"#,
        );

        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "now plainnow underlined");
        assert!(!p.runs[0].style.bold);
        assert!(!p.runs[0].style.underline);
        assert!(p.runs[1].style.underline);
        assert!(!p.runs[1].style.bold);
    }

    #[test]
    fn test_paragraph_mark_properties_ignored() {
        let doc = parse_body(
            r#"<w:p><w:pPr><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t>text</w:t></w:r></w:p>"#,
        );

        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(!p.runs[0].style.bold);
    }

    #[test]
    fn test_breaks_tabs_and_entities() {
        let doc = parse_body(
            r#"<w:p><w:r><w:t>A&amp;B</w:t><w:tab/><w:t>C</w:t><w:br/><w:t>D</w:t></w:r></w:p>"#,
        );

        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.text(), "A&B\tC\nD");
    }

    #[test]
    fn test_table_cells_keep_paragraph_lines() {
        let doc = parse_body(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tblPr/><w:tr><w:tc><w:p><w:r><w:t>Part 1:</w:t></w:r></w:p><w:p><w:r><w:t>General</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>3</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/>"#,
        );

        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.metadata.table_count, 1);
        let Block::Table(t) = &doc.blocks[1] else {
            panic!("expected table");
        };
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.rows[0].cells[0].text_content(), "Part 1:\nGeneral");
        assert!(matches!(&doc.blocks[2], Block::Paragraph(p) if p.runs.is_empty()));
    }

    #[test]
    fn test_nested_table_not_in_cell_text() {
        let body = r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc></w:tr></w:tbl>"#;

        let doc = parse_body(body);
        assert_eq!(doc.block_count(), 1);
        let Block::Table(t) = &doc.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows[0].cells[0].text_content(), "outer\n");
        assert!(t.rows[0].cells[0].tables.is_empty());

        let kept = DocxParser::from_document_xml(document_xml(body))
            .with_options(ParseOptions::new().with_nested_tables(true))
            .parse()
            .unwrap();
        let Block::Table(t) = &kept.blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(t.rows[0].cells[0].tables.len(), 1);
    }

    #[test]
    fn test_content_controls_and_drawings() {
        let doc = parse_body(
            r#"<w:sdt><w:sdtContent><w:p><w:r><w:t>inside control</w:t></w:r></w:p></w:sdtContent></w:sdt><w:p><w:r><w:t>x</w:t></w:r><w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>hidden</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>"#,
        );

        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.plain_text(), "inside control\nx");
    }

    #[test]
    fn test_from_bytes_reads_package() {
        let bytes = docx_bytes(r#"<w:p><w:r><w:t>zipped</w:t></w:r></w:p>"#);
        let doc = DocxParser::from_bytes(&bytes).unwrap().parse().unwrap();
        assert_eq!(doc.plain_text(), "zipped");
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        assert!(matches!(
            DocxParser::from_bytes(b"not a docx"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_missing_document_part() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("other.xml", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"<x/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(
            DocxParser::from_bytes(&bytes),
            Err(Error::MissingPart(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = DocxParser::open("/nonexistent/dir/input.docx");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_malformed_markup_modes() {
        let xml = format!(
            r#"<w:document {NS}><w:body><w:p><w:r><w:t>kept</w:t></w:r></w:p><w:p></w:r></w:body></w:document>"#
        );

        let strict = DocxParser::from_document_xml(xml.clone()).parse();
        assert!(matches!(strict, Err(Error::Xml(_))));

        let lenient = DocxParser::from_document_xml(xml)
            .with_options(ParseOptions::new().lenient())
            .parse()
            .unwrap();
        assert_eq!(lenient.plain_text(), "kept");
    }
}

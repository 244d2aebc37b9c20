//! Section alignment and emphasis auditing.
//!
//! A document is audited in three steps: the table of contents is read from
//! the first table carrying the profile keyword, the body is split into
//! sections by walking the TOC titles in order, and every section collects
//! its bold and underlined spans. Two audits (Chinese and English) form an
//! [`AuditReport`] whose sections are compared by index.

mod align;
mod emphasis;
mod profile;
mod section;
mod similarity;
mod toc;

pub use align::{
    align, align_with, match_title, whole_document_title, MatchKind, SectionAligner,
    FUZZY_THRESHOLD, MAX_LENGTH_RATIO, MIN_LENGTH_RATIO,
};
pub use emphasis::{extract, extract_paragraph, Emphasis, EmphasisItem};
pub use profile::{Language, LanguageProfile, TitlePattern, CHINESE, ENGLISH};
pub use section::Section;
pub use similarity::{SequenceRatio, Similarity};
pub use toc::{extract_toc, find_toc_table, parse_title_cell, MAX_CONTINUATION_CHARS, TOC_HEADER_ROWS};

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Block, Document};
use crate::parser::{DocxParser, ParseOptions};

/// How a document's sections were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignMode {
    /// Sections follow the table of contents
    Toc,
    /// No table of contents; a single catch-all section
    WholeDocument,
    /// The document could not be read; no sections
    Unavailable,
}

/// Counters collected while auditing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStats {
    /// Number of body blocks scanned
    pub block_count: u32,

    /// Number of body paragraphs
    pub paragraph_count: u32,

    /// Number of body tables
    pub table_count: u32,

    /// Number of sections produced
    pub section_count: u32,

    /// Number of bold items across all sections
    pub bold_count: u32,

    /// Number of underline items across all sections
    pub underline_count: u32,
}

impl AuditStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks of a document and the items of its sections.
    pub fn collect(document: &Document, sections: &[Section]) -> Self {
        let mut stats = Self::new();
        for block in document.iter_blocks() {
            stats.block_count += 1;
            match block {
                Block::Paragraph(_) => stats.paragraph_count += 1,
                Block::Table(_) => stats.table_count += 1,
            }
        }
        for section in sections {
            stats.add_section(section);
        }
        stats
    }

    /// Record one section and its items.
    pub fn add_section(&mut self, section: &Section) {
        self.section_count += 1;
        self.bold_count += section.bold_items.len() as u32;
        self.underline_count += section.underline_items.len() as u32;
    }

    /// Merge another set of statistics into this one.
    pub fn merge(&mut self, other: &AuditStats) {
        self.block_count += other.block_count;
        self.paragraph_count += other.paragraph_count;
        self.table_count += other.table_count;
        self.section_count += other.section_count;
        self.bold_count += other.bold_count;
        self.underline_count += other.underline_count;
    }
}

/// The audit of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAudit {
    /// Input path (or name for in-memory documents)
    pub source: PathBuf,

    /// How the sections were produced
    pub mode: AlignMode,

    /// Titles read from the table of contents
    pub titles: Vec<String>,

    /// Aligned sections in document order
    pub sections: Vec<Section>,

    /// Document and emphasis counters
    pub stats: AuditStats,
}

impl DocumentAudit {
    /// An audit for a document that could not be read.
    pub fn unavailable(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mode: AlignMode::Unavailable,
            titles: Vec::new(),
            sections: Vec::new(),
            stats: AuditStats::default(),
        }
    }

    /// Whether the document was read.
    pub fn is_available(&self) -> bool {
        self.mode != AlignMode::Unavailable
    }

    /// File name of the source, without directories.
    pub fn file_name(&self) -> String {
        display_name(&self.source)
    }

    /// Section at `index`, if any.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of TOC titles that never matched a body block.
    pub fn unmatched_titles(&self) -> usize {
        match self.mode {
            AlignMode::Toc => self.titles.len().saturating_sub(self.sections.len()),
            _ => 0,
        }
    }
}

/// A Chinese/English audit pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// Audit of the Chinese document
    pub chinese: DocumentAudit,

    /// Audit of the English document
    pub english: DocumentAudit,
}

impl AuditReport {
    /// Pair two audits, stamped with the current time.
    pub fn new(chinese: DocumentAudit, english: DocumentAudit) -> Self {
        Self {
            generated_at: Utc::now(),
            chinese,
            english,
        }
    }

    /// Number of compared section indices.
    pub fn section_count(&self) -> usize {
        self.chinese.sections.len().max(self.english.sections.len())
    }

    /// Sections of both documents paired by index.
    ///
    /// Yields `max(len_chi, len_eng)` pairs; the shorter side is padded with
    /// `None`.
    pub fn section_pairs(&self) -> impl Iterator<Item = (Option<&Section>, Option<&Section>)> {
        (0..self.section_count()).map(move |i| (self.chinese.section(i), self.english.section(i)))
    }

    /// Combined statistics of both documents.
    pub fn total_stats(&self) -> AuditStats {
        let mut stats = self.chinese.stats.clone();
        stats.merge(&self.english.stats);
        stats
    }
}

/// Options for auditing documents read from disk.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Options passed to the DOCX parser
    pub parse_options: ParseOptions,
}

impl AuditOptions {
    /// Create new audit options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Keep the blocks read before malformed markup.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }
}

/// Audit an in-memory document.
///
/// `name` labels the whole-document section when no TOC is found.
pub fn analyze(document: &Document, name: &str, profile: &LanguageProfile) -> Result<DocumentAudit> {
    let pattern = profile.compile()?;
    let titles = extract_toc(document.tables(), profile.toc_keyword, &pattern);

    let mode = if titles.is_empty() {
        log::warn!("No TOC found in {}; using whole-document mode", name);
        AlignMode::WholeDocument
    } else {
        log::info!("Found {} sections in {}", titles.len(), name);
        AlignMode::Toc
    };

    let sections = align(document.iter_blocks(), &titles, name);
    let stats = AuditStats::collect(document, &sections);

    if mode == AlignMode::Toc && sections.len() < titles.len() {
        log::debug!(
            "{}: {} of {} titles aligned",
            name,
            sections.len(),
            titles.len()
        );
    }

    Ok(DocumentAudit {
        source: PathBuf::from(name),
        mode,
        titles,
        sections,
        stats,
    })
}

/// Audit a DOCX file.
///
/// Never fails: a missing or unreadable file is logged and yields an
/// [`AlignMode::Unavailable`] audit with no sections.
pub fn analyze_document<P: AsRef<Path>>(
    path: P,
    profile: &LanguageProfile,
    options: &AuditOptions,
) -> DocumentAudit {
    let path = path.as_ref();
    if !path.exists() {
        log::error!("{} document not found: {}", profile.label, path.display());
        return DocumentAudit::unavailable(path);
    }

    let document = match DocxParser::open_with_options(path, options.parse_options.clone())
        .and_then(|parser| parser.parse())
    {
        Ok(document) => document,
        Err(e) => {
            log::error!("Error reading {}: {}", path.display(), e);
            return DocumentAudit::unavailable(path);
        }
    };

    log::debug!(
        "Analyzing {} ({} blocks)",
        path.display(),
        document.block_count()
    );

    match analyze(&document, &display_name(path), profile) {
        Ok(mut audit) => {
            audit.source = path.to_path_buf();
            audit
        }
        Err(e) => {
            log::error!("Cannot audit {}: {}", path.display(), e);
            DocumentAudit::unavailable(path)
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Table, TableRow, TextRun};

    fn toc(rows: &[&str]) -> Block {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["Contents", "Page"]));
        for row in rows {
            table.add_row(TableRow::from_strings([*row, "1"]));
        }
        Block::Table(table)
    }

    #[test]
    fn test_analyze_scenario_with_toc() {
        let mut body = Paragraph::new();
        body.add_text("Hello ");
        body.add_run(TextRun::bold("World"));
        body.add_text("!");

        let document = Document::from_blocks(vec![
            toc(&["Part 1: Introduction"]),
            Block::paragraph("Part 1: Introduction"),
            Block::Paragraph(body),
        ]);

        let audit = analyze(&document, "eng.docx", &ENGLISH).unwrap();
        assert_eq!(audit.mode, AlignMode::Toc);
        assert_eq!(audit.titles, vec!["Part 1: Introduction"]);
        assert_eq!(audit.sections.len(), 1);
        assert_eq!(
            audit.sections[0].bold_items,
            vec![EmphasisItem::new("World", "Hello World!")]
        );
        assert_eq!(audit.stats.block_count, 3);
        assert_eq!(audit.stats.table_count, 1);
        assert_eq!(audit.stats.bold_count, 1);
        assert_eq!(audit.unmatched_titles(), 0);
    }

    #[test]
    fn test_analyze_without_toc() {
        let document = Document::from_blocks(vec![Block::paragraph("just text")]);
        let audit = analyze(&document, "eng_input.docx", &ENGLISH).unwrap();

        assert_eq!(audit.mode, AlignMode::WholeDocument);
        assert_eq!(audit.sections.len(), 1);
        assert_eq!(audit.sections[0].title, "Whole Document (eng_input.docx)");
    }

    #[test]
    fn test_analyze_counts_unmatched_titles() {
        let document = Document::from_blocks(vec![
            toc(&["Part A: One", "Part B: Two"]),
            Block::paragraph("Part A: One"),
        ]);
        let audit = analyze(&document, "d", &ENGLISH).unwrap();
        assert_eq!(audit.sections.len(), 1);
        assert_eq!(audit.unmatched_titles(), 1);
    }

    #[test]
    fn test_analyze_missing_file_is_unavailable() {
        let audit = analyze_document(
            "/nonexistent/chi_input.docx",
            &CHINESE,
            &AuditOptions::default(),
        );
        assert_eq!(audit.mode, AlignMode::Unavailable);
        assert!(!audit.is_available());
        assert!(audit.sections.is_empty());
        assert_eq!(audit.file_name(), "chi_input.docx");
    }

    #[test]
    fn test_section_pairs_padded() {
        let mut chinese = DocumentAudit::unavailable("chi.docx");
        chinese.sections = vec![Section::new("甲部：一"), Section::new("乙部：二")];
        let mut english = DocumentAudit::unavailable("eng.docx");
        english.sections = vec![Section::new("Part A: One")];

        let report = AuditReport::new(chinese, english);
        let pairs: Vec<_> = report.section_pairs().collect();
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].0.is_some() && pairs[0].1.is_some());
        assert!(pairs[1].0.is_some() && pairs[1].1.is_none());
    }

    #[test]
    fn test_stats_merge() {
        let mut a = AuditStats {
            block_count: 3,
            bold_count: 1,
            ..Default::default()
        };
        let b = AuditStats {
            block_count: 2,
            underline_count: 4,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.block_count, 5);
        assert_eq!(a.bold_count, 1);
        assert_eq!(a.underline_count, 4);
    }
}

//! # docaudit
//!
//! Bilingual DOCX emphasis auditing for Rust.
//!
//! This library reads a Chinese and an English version of the same
//! document, splits each into sections using the table of contents embedded
//! in the document, collects every bold and underlined span together with
//! its paragraph, and renders a side-by-side report so that emphasis can be
//! checked section by section.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docaudit::run_audit;
//!
//! fn main() -> docaudit::Result<()> {
//!     // Writes Bilingual_Audit_Report.html next to the Chinese document
//!     let report = run_audit("chi_input.docx", "eng_input.docx")?;
//!     println!("{}", report.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **TOC-driven sections**: titles read from the first table carrying the
//!   language keyword ("頁碼" / "Page")
//! - **Exact and fuzzy title matching**: whitespace/case-insensitive
//!   comparison, then a length-gated similarity score
//! - **Whole-document fallback** when a document has no TOC
//! - **HTML and JSON reports**
//! - **Parallel processing**: both documents are analyzed with Rayon

pub mod audit;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use audit::{
    analyze, analyze_document, AlignMode, AuditOptions, AuditReport, AuditStats, DocumentAudit,
    EmphasisItem, Language, LanguageProfile, Section, SectionAligner, CHINESE, ENGLISH,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocumentFormat};
pub use error::{Error, Result};
pub use model::{Block, Document, Metadata, Paragraph, Table, TableCell, TableRow, TextRun, TextStyle};
pub use parser::{DocxParser, ParseOptions};
pub use render::{JsonFormat, ReportFormat, ReportOptions};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a DOCX file and return its body blocks.
///
/// # Example
///
/// ```no_run
/// use docaudit::parse_file;
///
/// let doc = parse_file("document.docx").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a DOCX file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a DOCX package from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a DOCX package from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a DOCX package from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Audit a document pair and write `Bilingual_Audit_Report.html` next to the Chinese file.
///
/// Missing or unreadable inputs do not fail the audit; they show up in the
/// report as missing sections. Only rendering and writing the report can
/// fail.
///
/// # Example
///
/// ```no_run
/// let path = docaudit::run_audit("chi_input.docx", "eng_input.docx")?;
/// # Ok::<(), docaudit::Error>(())
/// ```
pub fn run_audit<P: AsRef<Path>, Q: AsRef<Path>>(chinese: P, english: Q) -> Result<PathBuf> {
    Auditor::new().run(chinese, english)
}

/// Run [`run_audit`] on the blocking thread pool.
#[cfg(feature = "async")]
pub async fn run_audit_async(
    chinese: impl Into<PathBuf>,
    english: impl Into<PathBuf>,
) -> Result<PathBuf> {
    let chinese = chinese.into();
    let english = english.into();
    tokio::task::spawn_blocking(move || run_audit(chinese, english))
        .await
        .map_err(|e| Error::Other(format!("Audit task failed: {}", e)))?
}

/// Builder for auditing a Chinese/English document pair.
///
/// # Example
///
/// ```no_run
/// use docaudit::{Auditor, JsonFormat, ReportFormat};
///
/// let path = Auditor::new()
///     .lenient()
///     .with_format(ReportFormat::Json(JsonFormat::Pretty))
///     .with_output("audit.json")
///     .run("chi_input.docx", "eng_input.docx")?;
/// # Ok::<(), docaudit::Error>(())
/// ```
pub struct Auditor {
    audit_options: AuditOptions,
    report_options: ReportOptions,
    chinese_profile: LanguageProfile,
    english_profile: LanguageProfile,
    parallel: bool,
    output: Option<PathBuf>,
}

impl Auditor {
    /// Create a new Auditor builder.
    pub fn new() -> Self {
        Self {
            audit_options: AuditOptions::default(),
            report_options: ReportOptions::default(),
            chinese_profile: CHINESE,
            english_profile: ENGLISH,
            parallel: true,
            output: None,
        }
    }

    /// Analyze the two documents one after the other.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.audit_options = self.audit_options.lenient();
        self
    }

    /// Write the report to `path` instead of next to the Chinese document.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the report format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.report_options.format = format;
        self
    }

    /// Replace the report options.
    pub fn with_report_options(mut self, options: ReportOptions) -> Self {
        self.report_options = options;
        self
    }

    /// Set the profile used for the Chinese document.
    pub fn with_chinese_profile(mut self, profile: LanguageProfile) -> Self {
        self.chinese_profile = profile;
        self
    }

    /// Set the profile used for the English document.
    pub fn with_english_profile(mut self, profile: LanguageProfile) -> Self {
        self.english_profile = profile;
        self
    }

    /// Analyze both documents.
    pub fn audit<P: AsRef<Path>, Q: AsRef<Path>>(&self, chinese: P, english: Q) -> Result<AuditReport> {
        let chinese = chinese.as_ref();
        let english = english.as_ref();

        let analyze_chinese =
            || analyze_document(chinese, &self.chinese_profile, &self.audit_options);
        let analyze_english =
            || analyze_document(english, &self.english_profile, &self.audit_options);

        let (chinese, english) = if self.parallel {
            rayon::join(analyze_chinese, analyze_english)
        } else {
            (analyze_chinese(), analyze_english())
        };

        Ok(AuditReport::new(chinese, english))
    }

    /// Analyze both documents, render the report and write it to disk.
    ///
    /// Returns the path of the written report.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, chinese: P, english: Q) -> Result<PathBuf> {
        let chinese = chinese.as_ref();
        let report = self.audit(chinese, english)?;
        let content = self.render(&report)?;

        let path = self.output_path(chinese);
        std::fs::write(&path, content)?;
        log::info!("Report written to {}", path.display());

        Ok(path)
    }

    /// Render a report with the configured options.
    pub fn render(&self, report: &AuditReport) -> Result<String> {
        render::render(report, &self.report_options)
    }

    /// Where [`Auditor::run`] writes the report for a given Chinese input.
    pub fn output_path(&self, chinese: &Path) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => chinese
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(self.report_options.format.file_name()),
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

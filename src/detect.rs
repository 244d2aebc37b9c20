//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Word-processing container formats recognized from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Office Open XML package (zip container)
    Docx,
    /// Legacy Word 97-2003 binary (OLE2 compound file)
    LegacyDoc,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Docx => write!(f, "DOCX"),
            DocumentFormat::LegacyDoc => write!(f, "DOC (Word 97-2003)"),
        }
    }
}

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE2 compound file magic
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the document format from a file path.
///
/// # Example
/// ```no_run
/// use docaudit::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("chi_input.docx").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(OLE_MAGIC.len());
    reader
        .by_ref()
        .take(OLE_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the document format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(DocumentFormat)` if the data starts with a known signature
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocumentFormat> {
    if data.starts_with(ZIP_MAGIC) {
        Ok(DocumentFormat::Docx)
    } else if data.starts_with(OLE_MAGIC) {
        Ok(DocumentFormat::LegacyDoc)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if a file looks like a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(DocumentFormat::Docx))
}

/// Check if bytes look like a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(DocumentFormat::Docx))
}

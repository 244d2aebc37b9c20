//! Error types for docaudit library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docaudit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, aligning or reporting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file format is not recognized as DOCX.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The file is a recognized but unsupported word-processing format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The zip container could not be read.
    #[error("Container error: {0}")]
    Zip(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Malformed WordprocessingML.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A title line pattern failed to compile.
    #[error("Invalid title pattern: {0}")]
    InvalidPattern(String),

    /// Error during report rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::MissingPart("word/document.xml".to_string())
            }
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

//! Document model types for DOCX content representation.
//!
//! This module defines the intermediate representation that bridges DOCX
//! parsing and the audit pipeline: an ordered list of body blocks, each a
//! paragraph or a table, with per-run bold/underline flags.

mod block;
mod document;
mod paragraph;
mod table;

pub use block::{Block, TABLE_END_MARKER, TABLE_START_MARKER};
pub use document::{Document, Metadata};
pub use paragraph::{Paragraph, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};

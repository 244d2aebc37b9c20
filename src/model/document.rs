//! Document-level types.

use super::{Block, Table};
use serde::{Deserialize, Serialize};

/// A parsed word-processing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Body blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a list of blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self::new();
        for block in blocks {
            doc.add_block(block);
        }
        doc
    }

    /// Set the source file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.file_name = Some(name.into());
        self
    }

    /// Append a block, keeping the metadata counters current.
    pub fn add_block(&mut self, block: Block) {
        match block {
            Block::Paragraph(_) => self.metadata.paragraph_count += 1,
            Block::Table(_) => self.metadata.table_count += 1,
        }
        self.blocks.push(block);
    }

    /// Iterate over body blocks in document order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Iterate over body-level tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Number of body blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(p) => p.text(),
                Block::Table(t) => t.plain_text(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name, without directory
    pub file_name: Option<String>,

    /// Number of body paragraphs
    pub paragraph_count: u32,

    /// Number of body tables
    pub table_count: u32,
}

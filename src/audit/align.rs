//! Section alignment.
//!
//! The aligner streams body blocks and keeps a single cursor into the TOC
//! titles. Each non-blank block is compared with the title under the cursor
//! only: first an exact comparison ignoring whitespace and case, then, when
//! the lengths are within the ratio window, a fuzzy similarity score. A match
//! closes the current section and opens the next one; the matching block
//! becomes the first content of the new section.
//!
//! There is no lookahead and no backtracking. A title that never matches
//! holds the cursor, and every later title waits behind it.

use crate::model::Block;

use super::emphasis::{extract, Emphasis};
use super::section::Section;
use super::similarity::{SequenceRatio, Similarity};

/// Minimum similarity score for a fuzzy title match.
pub const FUZZY_THRESHOLD: u8 = 80;

/// Smallest accepted `len(block) / len(title)` before fuzzy scoring.
pub const MIN_LENGTH_RATIO: f64 = 0.8;

/// Largest accepted `len(block) / len(title)` before fuzzy scoring.
pub const MAX_LENGTH_RATIO: f64 = 1.2;

/// How a block matched the expected title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Equal after removing whitespace, ignoring case
    Exact,
    /// Similar enough, with the score obtained
    Fuzzy(u8),
}

/// Compare a block's leading text with the expected title.
///
/// The scorer is consulted only when the exact comparison fails and the
/// whitespace-free lengths pass the ratio window.
pub fn match_title<S>(target: &str, block_text: &str, scorer: &S) -> Option<MatchKind>
where
    S: Similarity + ?Sized,
{
    let target_clean = strip_whitespace(target);
    let block_clean = strip_whitespace(block_text);

    if !target_clean.is_empty()
        && !block_clean.is_empty()
        && target_clean.to_lowercase() == block_clean.to_lowercase()
    {
        return Some(MatchKind::Exact);
    }

    if target.is_empty() || block_text.is_empty() {
        return None;
    }

    let target_len = target_clean.chars().count();
    if target_len == 0 {
        return None;
    }
    let ratio = block_clean.chars().count() as f64 / target_len as f64;
    if !(MIN_LENGTH_RATIO..=MAX_LENGTH_RATIO).contains(&ratio) {
        return None;
    }

    let score = scorer.score(&target.to_lowercase(), &block_text.to_lowercase());
    (score >= FUZZY_THRESHOLD).then_some(MatchKind::Fuzzy(score))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Title of the catch-all section used when a document has no TOC.
pub fn whole_document_title(document_name: &str) -> String {
    format!("Whole Document ({})", document_name)
}

/// Streaming section aligner.
pub struct SectionAligner<'t, S = SequenceRatio> {
    titles: &'t [String],
    scorer: S,
    cursor: usize,
    current: Option<Section>,
    output: Vec<Section>,
}

impl<'t> SectionAligner<'t, SequenceRatio> {
    /// Create an aligner over TOC titles.
    ///
    /// With no titles, a single whole-document section named after
    /// `document_name` is opened immediately and receives every block.
    pub fn new(titles: &'t [String], document_name: &str) -> Self {
        let current = if titles.is_empty() {
            Some(Section::new(whole_document_title(document_name)))
        } else {
            None
        };

        Self {
            titles,
            scorer: SequenceRatio,
            cursor: 0,
            current,
            output: Vec::new(),
        }
    }
}

impl<'t, S: Similarity> SectionAligner<'t, S> {
    /// Use a different similarity measure for fuzzy matching.
    pub fn with_similarity<T: Similarity>(self, scorer: T) -> SectionAligner<'t, T> {
        SectionAligner {
            titles: self.titles,
            scorer,
            cursor: self.cursor,
            current: self.current,
            output: self.output,
        }
    }

    /// Index of the next title expected in the body.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Title of the section currently receiving blocks.
    pub fn current_title(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.title.as_str())
    }

    /// Process the next body block.
    pub fn feed(&mut self, block: &Block) {
        let heading = block.heading_text();
        if heading.is_empty() {
            return;
        }

        if let Some(target) = self.titles.get(self.cursor) {
            if let Some(kind) = match_title(target, &heading, &self.scorer) {
                log::debug!(
                    "Title {}/{} matched ({:?}): {}",
                    self.cursor + 1,
                    self.titles.len(),
                    kind,
                    target
                );
                if let Some(done) = self.current.take() {
                    self.output.push(done);
                }
                self.current = Some(Section::new(target.clone()));
                self.cursor += 1;
            }
        }

        if let Some(section) = self.current.as_mut() {
            section.add_content(block.content_text());
            section.add_bold_items(extract(block, Emphasis::Bold));
            section.add_underline_items(extract(block, Emphasis::Underline));
        }
    }

    /// Close the scan and return the sections in order.
    pub fn finish(mut self) -> Vec<Section> {
        if self.cursor < self.titles.len() {
            log::debug!(
                "{} of {} titles never matched; first missing: {}",
                self.titles.len() - self.cursor,
                self.titles.len(),
                self.titles[self.cursor]
            );
        }
        if let Some(section) = self.current.take() {
            self.output.push(section);
        }
        self.output
    }
}

/// Align blocks to TOC titles with the default similarity measure.
pub fn align<'a>(
    blocks: impl IntoIterator<Item = &'a Block>,
    titles: &[String],
    document_name: &str,
) -> Vec<Section> {
    align_with(blocks, titles, document_name, SequenceRatio)
}

/// Align blocks to TOC titles with a custom similarity measure.
pub fn align_with<'a, S: Similarity>(
    blocks: impl IntoIterator<Item = &'a Block>,
    titles: &[String],
    document_name: &str,
    scorer: S,
) -> Vec<Section> {
    let mut aligner = SectionAligner::new(titles, document_name).with_similarity(scorer);
    for block in blocks {
        aligner.feed(block);
    }
    aligner.finish()
}

//! Per-language recognition parameters.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::Result;

/// TOC keyword and title-line pattern for one side of the document pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageProfile {
    /// Short label used in logs and reports
    pub label: &'static str,

    /// Substring identifying the table of contents among the first rows
    pub toc_keyword: &'static str,

    /// Pattern marking the first physical line of a section title
    pub title_pattern: &'static str,
}

/// Chinese documents: "頁碼" column header, titles like "甲部：..." or "（一）部:".
pub const CHINESE: LanguageProfile = LanguageProfile {
    label: "Chinese",
    toc_keyword: "頁碼",
    title_pattern: r"^[甲乙丙丁戊己庚辛壬癸(（].*部\s*[：:]",
};

/// English documents: "Page" column header, titles like "Part A: ...".
pub const ENGLISH: LanguageProfile = LanguageProfile {
    label: "English",
    toc_keyword: "Page",
    title_pattern: r"^Part.*[：:]",
};

impl LanguageProfile {
    /// Compile the title-line pattern.
    pub fn compile(&self) -> Result<TitlePattern> {
        TitlePattern::new(self.title_pattern)
    }
}

/// The language of one document in the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese version
    Chinese,
    /// English version
    English,
}

impl Language {
    /// Built-in profile for this language.
    pub fn profile(self) -> LanguageProfile {
        match self {
            Language::Chinese => CHINESE,
            Language::English => ENGLISH,
        }
    }
}

/// A compiled, case-insensitive title-line pattern.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    regex: Regex,
}

impl TitlePattern {
    /// Compile a pattern; matching is case-insensitive and unanchored unless
    /// the pattern anchors itself.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    /// Check whether a physical line starts a title.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

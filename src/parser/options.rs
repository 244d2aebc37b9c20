//! Parsing options and configuration.

/// Options for parsing DOCX documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether nested tables inside cells are kept on the cell
    pub keep_nested_tables: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep the blocks read before malformed markup).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Keep or discard tables nested inside table cells.
    pub fn with_nested_tables(mut self, keep: bool) -> Self {
        self.keep_nested_tables = keep;
        self
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Stop at malformed markup and return what was read
    Lenient,
}

//! Parsing options and configuration.

use super::Markers;

/// Options for extracting records from RTF listings.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How row alignment failures are handled
    pub error_mode: ErrorMode,

    /// Whether the trailing table row is treated as data
    pub trailing_row: TrailingRowPolicy,

    /// Control words that locate structure
    pub markers: Markers,

    /// Words at which the first footnote is split into the footer, tried in order
    pub footer_markers: Vec<String>,

    /// Whether to refuse documents missing a required marker
    pub check_schema: bool,

    /// Whether pages are assembled in parallel
    pub parallel: bool,
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

    /// Enable lenient mode (keep a page whose rows do not align).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the trailing row policy.
    pub fn with_trailing_row(mut self, policy: TrailingRowPolicy) -> Self {
        self.trailing_row = policy;
        self
    }

    /// Replace the marker table.
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Replace the footer split words.
    pub fn with_footer_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the schema gate.
    pub fn with_schema_check(mut self, check: bool) -> Self {
        self.check_schema = check;
        self
    }

    /// Enable or disable parallel page assembly.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            trailing_row: TrailingRowPolicy::KeepTogether,
            markers: Markers::default(),
            footer_markers: vec!["Source".to_string(), "Dataset".to_string()],
            check_schema: true,
            parallel: true,
        }
    }
}

/// Handling of rows that carry more cells than there are column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole document
    #[default]
    Strict,
    /// Keep the page without rows and record a warning
    Lenient,
}

/// Whether the last row of a table body is read as data.
///
/// Listing pages usually close with a footnote row laid out as one more
/// table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingRowPolicy {
    /// Exclude the last row when it carries the keep-together marker
    #[default]
    KeepTogether,
    /// Always exclude the last row
    Always,
    /// Treat every row as data
    Never,
}

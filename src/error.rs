//! Error types for unrtf library.

use std::io;
use thiserror::Error;

/// Result type alias for unrtf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during RTF processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required structural marker is absent from the document.
    #[error("does not conform to schema: missing marker `{marker}`")]
    SchemaViolation {
        /// The control word that could not be found
        marker: String,
    },

    /// A marker needed by one page field is absent from the page text.
    #[error("marker not found: `{0}`")]
    MissingMarker(String),

    /// A group opened at `offset` is never closed.
    #[error("unbalanced group starting at byte {offset}")]
    UnbalancedGroup {
        /// Byte offset of the opening brace, relative to the scanned text
        offset: usize,
    },

    /// A data row carries more cells than the table has column headers.
    #[error("page {page}, row {row}: {cells} cells but only {headers} column headers")]
    RowAlignment {
        /// 1-based page number
        page: u32,
        /// 1-based data row number within the page
        row: usize,
        /// Number of surviving cell tokens
        cells: usize,
        /// Number of column headers
        headers: usize,
    },

    /// Error during serialization.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error belongs to a single page field and may be defaulted.
    pub fn is_field_level(&self) -> bool {
        matches!(self, Error::MissingMarker(_) | Error::UnbalancedGroup { .. })
    }
}

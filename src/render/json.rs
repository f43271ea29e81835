//! JSON rendering for converted listings.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::DocumentRecord;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document record to JSON.
pub fn to_json(doc: &DocumentRecord, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write a document record as JSON.
pub fn write_json<W: Write>(doc: &DocumentRecord, writer: W, format: JsonFormat) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, doc),
        JsonFormat::Compact => serde_json::to_writer(writer, doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Read a document record back from JSON.
pub fn from_json(json: &str) -> Result<DocumentRecord> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}

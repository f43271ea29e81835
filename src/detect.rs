//! RTF detection and schema validation.

use crate::error::{Error, Result};
use crate::parser::Markers;
use std::path::Path;

/// RTF magic: every RTF document opens with `{\rtf`.
const RTF_MAGIC: &[u8] = b"{\\rtf";

/// File extension of RTF listings (compared case-insensitively).
pub const RTF_EXTENSION: &str = "rtf";

/// Check that every required structural marker is present in `text`.
///
/// This is a presence check only. It does not validate structure.
///
/// # Returns
/// * `Ok(())` if all required markers are present
/// * `Err(Error::SchemaViolation)` naming the first missing marker
///
/// # Example
/// ```
/// use unrtf::detect::check_schema;
/// use unrtf::parser::Markers;
///
/// let result = check_schema(r"{\rtf1 plain text}", &Markers::default());
/// assert!(result.is_err());
/// ```
pub fn check_schema(text: &str, markers: &Markers) -> Result<()> {
    match markers.required().into_iter().find(|m| !text.contains(m)) {
        Some(marker) => {
            log::debug!("Schema check failed: missing {}", marker);
            Err(Error::SchemaViolation {
                marker: marker.to_string(),
            })
        }
        None => Ok(()),
    }
}

/// Every required marker absent from `text`, in check order.
pub fn missing_markers<'m>(text: &str, markers: &'m Markers) -> Vec<&'m str> {
    markers
        .required()
        .into_iter()
        .filter(|m| !text.contains(m))
        .collect()
}

/// Check `text` against the default marker table.
pub fn conforms_to_schema(text: &str) -> bool {
    check_schema(text, &Markers::default()).is_ok()
}

/// Check if bytes start like an RTF document.
///
/// Leading whitespace and a UTF-8 byte order mark are skipped.
pub fn is_rtf_bytes(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..].starts_with(RTF_MAGIC)
}

/// Check if a path has the `.rtf` extension, in any case.
pub fn has_rtf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RTF_EXTENSION))
}

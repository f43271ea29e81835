//! # unrtf
//!
//! Extraction of clinical-listing tables from RTF documents into JSON.
//!
//! Statistical reporting tools emit listings as RTF: one table per page,
//! with a running header, title rows, a column header row, data rows and
//! footnotes. This library recovers that structure page by page and turns
//! each document into a nested record of fonts and pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unrtf::{parse_file, render};
//!
//! fn main() -> unrtf::Result<()> {
//!     // Parse an RTF listing
//!     let doc = parse_file("l_16_2_1.rtf")?;
//!
//!     // Convert to JSON
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Schema gate**: documents missing a required control word are refused
//! - **Balanced group scanning**: nested header and cell groups are handled
//! - **Per-field recovery**: a missing field defaults and is noted on the page
//! - **Parallel processing**: Uses Rayon for pages and for directory batches

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    BatchEntry, ConversionOutcome, ConversionStatus, ConvertOptions, RtfConverter,
};
pub use detect::{check_schema, conforms_to_schema, has_rtf_extension};
pub use error::{Error, Result};
pub use model::{Cell, DocumentRecord, FontTable, Footer, PageRecord, Row};
pub use parser::{ErrorMode, Markers, ParseOptions, RtfParser, TrailingRowPolicy};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse an RTF listing file.
///
/// # Arguments
///
/// * `path` - Path to the RTF file
///
/// # Example
///
/// ```no_run
/// use unrtf::parse_file;
///
/// let doc = parse_file("listing.rtf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentRecord> {
    let parser = RtfParser::open(path)?;
    parser.parse()
}

/// Parse an RTF listing file with custom options.
///
/// # Example
///
/// ```no_run
/// use unrtf::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().sequential();
/// let doc = parse_file_with_options("listing.rtf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentRecord> {
    let parser = RtfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse RTF text.
pub fn parse_str(text: &str) -> Result<DocumentRecord> {
    RtfParser::from_text(text).parse()
}

/// Parse RTF text with custom options.
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<DocumentRecord> {
    RtfParser::from_text_with_options(text, options).parse()
}

/// Parse RTF from bytes.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentRecord> {
    RtfParser::from_bytes(data).parse()
}

/// Parse RTF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<DocumentRecord> {
    RtfParser::from_bytes_with_options(data, options).parse()
}

/// Parse RTF from a reader.
///
/// # Example
///
/// ```no_run
/// use unrtf::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("listing.rtf").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<DocumentRecord> {
    RtfParser::from_reader(reader)?.parse()
}

/// Parse RTF from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(
    reader: R,
    options: ParseOptions,
) -> Result<DocumentRecord> {
    RtfParser::from_reader_with_options(reader, options)?.parse()
}

/// Convert an RTF listing file to JSON.
///
/// # Example
///
/// ```no_run
/// use unrtf::{to_json, JsonFormat};
///
/// let json = to_json("listing.rtf", JsonFormat::Pretty).unwrap();
/// std::fs::write("listing.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Convert one file into `<output_dir>/<stem>.json` and report the outcome.
///
/// # Example
///
/// ```no_run
/// use unrtf::convert_file;
///
/// let outcome = convert_file("listing.rtf", "Output");
/// println!("{}: {}", outcome.status, outcome.remark);
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    path: P,
    output_dir: Q,
) -> ConversionOutcome {
    RtfConverter::new().convert(path, output_dir)
}

/// Convert every entry of a directory, one outcome per entry.
pub fn convert_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    output_dir: Q,
) -> Result<Vec<BatchEntry>> {
    RtfConverter::new().convert_dir(dir, output_dir)
}

/// Builder for parsing and converting RTF listings.
///
/// # Example
///
/// ```no_run
/// use unrtf::{TrailingRowPolicy, Unrtf};
///
/// let json = Unrtf::new()
///     .lenient()
///     .with_trailing_row(TrailingRowPolicy::Never)
///     .parse("listing.rtf")?
///     .to_json(unrtf::JsonFormat::Compact)?;
/// # Ok::<(), unrtf::Error>(())
/// ```
pub struct Unrtf {
    parse_options: ParseOptions,
}

impl Unrtf {
    /// Create a new Unrtf builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set the trailing row policy.
    pub fn with_trailing_row(mut self, policy: TrailingRowPolicy) -> Self {
        self.parse_options = self.parse_options.with_trailing_row(policy);
        self
    }

    /// Set the control word table.
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.parse_options = self.parse_options.with_markers(markers);
        self
    }

    /// Skip the schema check.
    pub fn without_schema_check(mut self) -> Self {
        self.parse_options = self.parse_options.with_schema_check(false);
        self
    }

    /// Parse an RTF file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnrtfResult> {
        let parser = RtfParser::open_with_options(path, self.parse_options)?;
        Ok(UnrtfResult {
            document: parser.parse()?,
        })
    }

    /// Parse RTF from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnrtfResult> {
        let parser = RtfParser::from_bytes_with_options(data, self.parse_options);
        Ok(UnrtfResult {
            document: parser.parse()?,
        })
    }
}

impl Default for Unrtf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an RTF listing.
pub struct UnrtfResult {
    /// The parsed document
    pub document: DocumentRecord,
}

impl UnrtfResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &DocumentRecord {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "{\\rtf1{\\fonttbl{\\f0\\fswiss Arial;}}\n\
        \\endnhere{\\header{\\trowd{Study\\cell}{\\row}}}\n\
        \\trowd\\trhdr{Listing\\cell}{\\row}\n\
        \\trowd\\trhdr{Name\\cell}{Age\\cell}{\\row}\n\
        \\trowd{Alice\\cell}{30\\cell}{\\row}\n}";

    #[test]
    fn test_unrtf_builder() {
        let unrtf = Unrtf::new()
            .lenient()
            .sequential()
            .with_trailing_row(TrailingRowPolicy::Always);
        assert!(matches!(unrtf.parse_options.error_mode, ErrorMode::Lenient));
        assert!(!unrtf.parse_options.parallel);
        assert_eq!(unrtf.parse_options.trailing_row, TrailingRowPolicy::Always);
    }

    #[test]
    fn test_parse_str() {
        let doc = parse_str(LISTING).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].rows[0].get("Age"), Some(&Cell::Integer(30)));
    }

    #[test]
    fn test_builder_parse_bytes_to_json() {
        let json = Unrtf::new()
            .parse_bytes(LISTING.as_bytes())
            .unwrap()
            .to_json(JsonFormat::Compact)
            .unwrap();
        assert!(json.contains(r#""rows":[{"Name":"Alice","Age":30}]"#));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        // Empty data has none of the required markers
        let result = parse_bytes(&[]);
        assert!(matches!(result, Err(Error::SchemaViolation { .. })));
    }

    #[test]
    fn test_parse_bytes_without_schema_check() {
        let doc = Unrtf::new()
            .without_schema_check()
            .parse_bytes(b"plain text")
            .unwrap();
        assert_eq!(doc.document().page_count(), 1);
        assert!(doc.document().pages[0].rows.is_empty());
        assert!(!doc.document().pages[0].is_clean());
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/listing.rtf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

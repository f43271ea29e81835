//! File conversion: RTF listing in, JSON file out.
//!
//! The parser produces a [`DocumentRecord`](crate::model::DocumentRecord) in
//! memory. This module owns everything that touches the filesystem: reading
//! the input, naming and writing the output, and reporting a per-file
//! [`ConversionOutcome`] so that a batch can carry on past a bad file.
//!
//! # Example
//!
//! ```no_run
//! use unrtf::convert::{ConvertOptions, RtfConverter};
//!
//! let converter = RtfConverter::with_options(ConvertOptions::new());
//! for entry in converter.convert_dir("listings", "listings/Output").unwrap() {
//!     println!("{}\t{}\t{}", entry.file_name, entry.outcome.status, entry.outcome.remark);
//! }
//! ```

mod batch;
mod rtf;

pub use batch::{list_entries, BatchEntry, REMARK_NOT_FILE, REMARK_NOT_RTF};
pub use rtf::RtfConverter;

use crate::parser::ParseOptions;
use crate::render::JsonFormat;
use std::fmt;
use std::path::PathBuf;

/// Options for file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Output format
    pub format: JsonFormat,

    /// Convert the files of a batch in parallel
    pub parallel: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Write compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Enable or disable parallel batch conversion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Convert batches one file at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

/// Whether a file was converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    /// Output written
    Successful,
    /// Nothing written
    Failed,
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionStatus::Successful => f.write_str("Successful"),
            ConversionStatus::Failed => f.write_str("Failed"),
        }
    }
}

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    /// Conversion status
    pub status: ConversionStatus,

    /// Reason for a failure, empty on success
    pub remark: String,

    /// Path of the written JSON file
    pub output: Option<PathBuf>,
}

impl ConversionOutcome {
    /// A successful conversion that wrote `output`.
    pub fn successful(output: PathBuf) -> Self {
        Self {
            status: ConversionStatus::Successful,
            remark: String::new(),
            output: Some(output),
        }
    }

    /// A failed conversion.
    pub fn failed(remark: impl Into<String>) -> Self {
        Self {
            status: ConversionStatus::Failed,
            remark: remark.into(),
            output: None,
        }
    }

    /// Check if the conversion succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Successful
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorMode;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_parse_options(ParseOptions::new().lenient())
            .compact()
            .sequential();

        assert_eq!(options.parse.error_mode, ErrorMode::Lenient);
        assert_eq!(options.format, JsonFormat::Compact);
        assert!(!options.parallel);
    }

    #[test]
    fn test_convert_options_default() {
        let options = ConvertOptions::default();
        assert_eq!(options.format, JsonFormat::Pretty);
        assert!(options.parallel);
        assert!(options.parse.check_schema);
    }

    #[test]
    fn test_outcome() {
        let ok = ConversionOutcome::successful(PathBuf::from("out/a.json"));
        assert!(ok.is_success());
        assert!(ok.remark.is_empty());

        let failed = ConversionOutcome::failed("corrupt file");
        assert!(!failed.is_success());
        assert_eq!(failed.output, None);
        assert_eq!(failed.status.to_string(), "Failed");
        assert_eq!(ConversionStatus::Successful.to_string(), "Successful");
    }
}

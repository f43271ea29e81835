//! Single-file conversion.

use crate::error::{Error, Result};
use crate::model::DocumentRecord;
use crate::parser::RtfParser;
use crate::render::to_json;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ConversionOutcome, ConvertOptions};

/// Output file extension.
const JSON_EXTENSION: &str = "json";

/// RTF listing converter.
///
/// Converts RTF listings to JSON files named after the input.
#[derive(Debug, Clone, Default)]
pub struct RtfConverter {
    options: ConvertOptions,
}

impl RtfConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Parse a file into a document record without writing anything.
    pub fn convert_record<P: AsRef<Path>>(&self, path: P) -> Result<DocumentRecord> {
        RtfParser::open_with_options(path, self.options.parse.clone())?.parse()
    }

    /// Parse in-memory RTF into a document record.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<DocumentRecord> {
        RtfParser::from_bytes_with_options(bytes, self.options.parse.clone()).parse()
    }

    /// Where the output for `input` goes: `<output_dir>/<file stem>.json`.
    pub fn output_path<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output_dir: Q,
    ) -> Result<PathBuf> {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .ok_or_else(|| Error::Other(format!("No file name in {}", input.display())))?;
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(JSON_EXTENSION);
        Ok(output_dir.as_ref().join(name))
    }

    /// Convert one file and write its JSON, returning the output path.
    ///
    /// The JSON is fully rendered before the output file is created, so a
    /// failing conversion never leaves a partial file behind.
    pub fn try_convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path: P,
        output_dir: Q,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        let output = self.output_path(path, output_dir.as_ref())?;

        let record = self.convert_record(path)?;
        let json = to_json(&record, self.options.format)?;

        fs::create_dir_all(output_dir.as_ref())?;
        fs::write(&output, json)?;

        log::debug!(
            "Converted {} ({} pages, {} rows) to {}",
            path.display(),
            record.page_count(),
            record.row_count(),
            output.display()
        );
        Ok(output)
    }

    /// Convert one file and report the outcome.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        path: P,
        output_dir: Q,
    ) -> ConversionOutcome {
        let path = path.as_ref();
        match self.try_convert(path, output_dir) {
            Ok(output) => ConversionOutcome::successful(output),
            Err(e) => {
                log::warn!("Failed to convert {}: {}", path.display(), e);
                ConversionOutcome::failed(e.to_string())
            }
        }
    }
}

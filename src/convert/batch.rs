//! Directory batch conversion.

use crate::detect::has_rtf_extension;
use crate::error::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ConversionOutcome, RtfConverter};

/// Remark for entries that are not RTF files.
pub const REMARK_NOT_RTF: &str = "Choose a RTF File";

/// Remark for RTF-named entries that are not regular files.
pub const REMARK_NOT_FILE: &str = "Not a readable file";

/// Outcome of one directory entry in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Entry file name
    pub file_name: String,

    /// Conversion outcome
    pub outcome: ConversionOutcome,
}

impl RtfConverter {
    /// Convert every entry of `dir`, writing JSON files into `output_dir`.
    ///
    /// Entries are reported in file name order. Only failing to read `dir`
    /// or to create `output_dir` is an error; everything else is reported
    /// per entry.
    pub fn convert_dir<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        dir: P,
        output_dir: Q,
    ) -> Result<Vec<BatchEntry>> {
        self.convert_dir_with(dir, output_dir, |_| {})
    }

    /// Like [`convert_dir`](Self::convert_dir), calling `on_entry` as each
    /// entry finishes.
    pub fn convert_dir_with<P, Q, F>(
        &self,
        dir: P,
        output_dir: Q,
        on_entry: F,
    ) -> Result<Vec<BatchEntry>>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: Fn(&BatchEntry) + Sync + Send,
    {
        let output_dir = output_dir.as_ref();
        let paths = list_entries(dir, output_dir)?;
        fs::create_dir_all(output_dir)?;
        log::debug!(
            "Batch of {} entries into {}",
            paths.len(),
            output_dir.display()
        );

        let convert = |path: &PathBuf| {
            let entry = self.convert_entry(path, output_dir);
            on_entry(&entry);
            entry
        };

        let entries: Vec<BatchEntry> = if self.options().parallel {
            paths.par_iter().map(convert).collect()
        } else {
            paths.iter().map(convert).collect()
        };

        let converted = entries.iter().filter(|e| e.outcome.is_success()).count();
        log::info!("Converted {} of {} entries", converted, entries.len());
        Ok(entries)
    }

    fn convert_entry(&self, path: &Path, output_dir: &Path) -> BatchEntry {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let outcome = if !has_rtf_extension(path) {
            ConversionOutcome::failed(REMARK_NOT_RTF)
        } else if !path.is_file() {
            ConversionOutcome::failed(REMARK_NOT_FILE)
        } else {
            self.convert(path, output_dir)
        };

        BatchEntry { file_name, outcome }
    }
}

/// Entries of `dir` a batch visits: sorted by name, leaving out the output
/// directory.
pub fn list_entries<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    output_dir: Q,
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path != output_dir {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

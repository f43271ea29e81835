//! RTF listing parser.

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use crate::detect::check_schema;
use crate::error::Result;
use crate::model::{DocumentRecord, PageRecord};

use super::fonts::FontTableReader;
use super::options::ParseOptions;
use super::page::{PageAssembler, PageContext};

/// Parser for one RTF listing document.
pub struct RtfParser {
    text: String,
    options: ParseOptions,
}

impl RtfParser {
    /// Open an RTF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an RTF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(Self::from_bytes_with_options(&data, options))
    }

    /// Parse RTF text.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with_options(text, ParseOptions::default())
    }

    /// Parse RTF text with custom options.
    pub fn from_text_with_options(text: &str, options: ParseOptions) -> Self {
        Self {
            text: normalize(text),
            options,
        }
    }

    /// Parse RTF from bytes. Invalid UTF-8 is replaced, not rejected.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse RTF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Self {
        Self::from_text_with_options(&String::from_utf8_lossy(data), options)
    }

    /// Parse RTF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse RTF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes_with_options(&data, options))
    }

    /// The normalized document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of pages the document will be split into.
    pub fn page_count(&self) -> u32 {
        PageAssembler::new(&self.options)
            .segmenter()
            .page_spans(&self.text)
            .len() as u32
    }

    /// Whether every required structural marker is present.
    pub fn conforms_to_schema(&self) -> bool {
        check_schema(&self.text, &self.options.markers).is_ok()
    }

    /// Parse the document into a [`DocumentRecord`].
    pub fn parse(&self) -> Result<DocumentRecord> {
        if self.options.check_schema {
            check_schema(&self.text, &self.options.markers)?;
        }

        let fonts = FontTableReader::new(self.options.markers.font_table_group()).read(&self.text);

        let assembler = PageAssembler::new(&self.options);
        let spans = assembler.segmenter().page_spans(&self.text);
        let total = spans.len() as u32;
        log::debug!("Document has {} pages", total);

        let assemble = |(index, span): (usize, &std::ops::Range<usize>)| {
            let ctx = PageContext::new(index as u32 + 1, total);
            assembler.assemble(&self.text[span.clone()], ctx)
        };

        let pages: Vec<PageRecord> = if self.options.parallel {
            spans
                .par_iter()
                .enumerate()
                .map(assemble)
                .collect::<Result<_>>()?
        } else {
            spans
                .iter()
                .enumerate()
                .map(assemble)
                .collect::<Result<_>>()?
        };

        let mut document = DocumentRecord::new();
        document.fonts = fonts;
        for page in pages {
            document.add_page(page);
        }
        Ok(document)
    }
}

/// Collapse explicit line continuations and non-breaking space escapes.
pub fn normalize(text: &str) -> String {
    text.replace("{\\line}\r\n", " ")
        .replace("{\\line}\n", " ")
        .replace("\\~", " ")
}

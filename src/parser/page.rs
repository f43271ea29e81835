//! Page assembly.
//!
//! A page is read in a fixed order. Each step consumes a prefix of the page
//! text and hands the rest on:
//!
//! ```text
//! HEADER -> TITLE -> COLUMN_HEADERS -> DATA_ROWS -> FOOTNOTES -> FOOTER
//! ```
//!
//! A step that cannot find its field yields an empty value, leaves the
//! cursor where it was and records a warning on the page. Only a row that
//! cannot be aligned with the column headers is treated as an error.

use std::fmt;

use regex::Regex;

use super::options::{ErrorMode, ParseOptions, TrailingRowPolicy};
use super::segment::{RowSpan, Segmenter};
use super::tokenize::{assign_row, CellTokenizer};
use crate::error::{Error, Result};
use crate::model::{Cell, Footer, PageRecord, Row};

/// Position of a page within its document.
///
/// Passed into every page so page-number fields never depend on state
/// shared between pages or documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    /// 1-based page number
    pub number: u32,
    /// Total number of pages in the document
    pub total: u32,
}

impl PageContext {
    /// Create a page context.
    pub fn new(number: u32, total: u32) -> Self {
        Self { number, total }
    }
}

/// Page fields, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    /// Page header block
    Header,
    /// Title rows
    Title,
    /// Column header row
    ColumnHeaders,
    /// Data rows
    Rows,
}

impl fmt::Display for PageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageField::Header => "header",
            PageField::Title => "title",
            PageField::ColumnHeaders => "column headers",
            PageField::Rows => "rows",
        };
        f.write_str(name)
    }
}

/// Substitutes PAGE / NUMPAGES field codes in header text.
#[derive(Debug, Clone)]
struct PageNumberFields {
    page: Regex,
    total: Regex,
}

impl PageNumberFields {
    fn new() -> Self {
        Self {
            page: Regex::new(r"\{\\field\s*\{\\\*\\fldinst\s*\{?\s*PAGE\s*\}?\s*\}\s*\}").unwrap(),
            total: Regex::new(r"\{\\field\s*\{\\\*\\fldinst\s*\{?\s*NUMPAGES\s*\}?\s*\}\s*\}")
                .unwrap(),
        }
    }

    fn substitute(&self, text: &str, ctx: PageContext) -> String {
        let text = self.page.replace_all(text, ctx.number.to_string().as_str());
        self.total
            .replace_all(&text, ctx.total.to_string().as_str())
            .into_owned()
    }
}

/// Builds one [`PageRecord`] from the text of one page.
#[derive(Debug, Clone)]
pub struct PageAssembler {
    segmenter: Segmenter,
    tokenizer: CellTokenizer,
    fields: PageNumberFields,
    error_mode: ErrorMode,
    trailing_row: TrailingRowPolicy,
    footer_markers: Vec<String>,
}

impl PageAssembler {
    /// Create an assembler from parse options.
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            segmenter: Segmenter::new(options.markers.clone()),
            tokenizer: CellTokenizer::new(options.markers.cell_end.clone()),
            fields: PageNumberFields::new(),
            error_mode: options.error_mode,
            trailing_row: options.trailing_row,
            footer_markers: options.footer_markers.clone(),
        }
    }

    /// The segmenter used for page structure.
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Extract one page.
    pub fn assemble(&self, page: &str, ctx: PageContext) -> Result<PageRecord> {
        let mut record = PageRecord::new();
        let mut cursor = page;

        let outcome = self.extract_header(cursor, ctx);
        (record.header, cursor) = settle(PageField::Header, outcome, cursor, ctx, &mut record);

        let outcome = self.extract_title(cursor);
        (record.title, cursor) = settle(PageField::Title, outcome, cursor, ctx, &mut record);

        let outcome = self.extract_column_headers(cursor);
        (record.column_headers, cursor) =
            settle(PageField::ColumnHeaders, outcome, cursor, ctx, &mut record);

        let outcome = match self.extract_rows(cursor, &record.column_headers, ctx) {
            Err(e) if !e.is_field_level() && self.error_mode == ErrorMode::Strict => {
                return Err(e);
            }
            Err(e) if !e.is_field_level() => {
                log::warn!("Page {}: {}", ctx.number, e);
                record.warnings.push(format!("{}: {}", PageField::Rows, e));
                self.row_spans(cursor).map(|(_, rest)| (Vec::new(), rest))
            }
            other => other,
        };
        (record.rows, cursor) = settle(PageField::Rows, outcome, cursor, ctx, &mut record);

        record.footnotes = self.extract_footnotes(cursor);

        record.footer = self.split_footer(&record.footnotes);

        log::debug!(
            "Page {}/{}: {} title lines, {} columns, {} rows",
            ctx.number,
            ctx.total,
            record.title.len(),
            record.column_headers.len(),
            record.rows.len()
        );
        Ok(record)
    }

    /// Header cells, and the text after the header group.
    pub fn extract_header<'t>(
        &self,
        text: &'t str,
        ctx: PageContext,
    ) -> Result<(Vec<Cell>, &'t str)> {
        let span = self.segmenter.header_span(text)?;
        let header = &text[span.start..span.end];

        let cells = self
            .tokenizer
            .segments(header)
            .into_iter()
            .map(|raw| self.tokenizer.clean(&self.fields.substitute(raw, ctx)))
            .filter(|cell| !cell.is_empty())
            .map(Cell::classify)
            .collect();

        Ok((cells, &text[span.end + 1..]))
    }

    /// Title lines, and the text from the column header row on.
    ///
    /// Every title row but the last is a title line; the last one holds the
    /// column headers and is left in place.
    pub fn extract_title<'t>(&self, text: &'t str) -> Result<(Vec<String>, &'t str)> {
        let rows = self.segmenter.title_rows(text);
        let Some((last, titles)) = rows.split_last() else {
            return Err(Error::MissingMarker(
                self.segmenter.markers().title_row.clone(),
            ));
        };

        let title = titles
            .iter()
            .map(|row| self.tokenizer.texts(row.slice(text)).join(" "))
            .filter(|line| !line.is_empty())
            .collect();

        Ok((title, &text[last.start..]))
    }

    /// Column headers from the first row in `text`, and the text after it.
    pub fn extract_column_headers<'t>(&self, text: &'t str) -> Result<(Vec<String>, &'t str)> {
        let row_end = &self.segmenter.markers().row_end;
        let end = text
            .find(row_end.as_str())
            .map(|pos| pos + row_end.len())
            .ok_or_else(|| Error::MissingMarker(row_end.clone()))?;

        Ok((self.tokenizer.texts(&text[..end]), &text[end..]))
    }

    /// Data rows keyed by `headers`, and the text after the last data row.
    pub fn extract_rows<'t>(
        &self,
        text: &'t str,
        headers: &[String],
        ctx: PageContext,
    ) -> Result<(Vec<Row>, &'t str)> {
        let (spans, rest) = self.row_spans(text)?;
        let mut rows = Vec::new();
        for span in &spans {
            let tokens = self.tokenizer.tokens(span.slice(text));
            if tokens.is_empty() {
                continue;
            }
            rows.push(assign_row(headers, tokens, ctx.number, rows.len() + 1)?);
        }

        Ok((rows, rest))
    }

    /// Data row spans after the trailing row policy, and the text after the
    /// last one.
    fn row_spans<'t>(&self, text: &'t str) -> Result<(Vec<RowSpan>, &'t str)> {
        let mut spans = self.segmenter.body_rows(text);
        let Some(last) = spans.last().copied() else {
            return Err(Error::MissingMarker(
                self.segmenter.markers().row_start.clone(),
            ));
        };

        let exclude_last = match self.trailing_row {
            TrailingRowPolicy::Never => false,
            TrailingRowPolicy::Always => true,
            TrailingRowPolicy::KeepTogether => last
                .slice(text)
                .contains(self.segmenter.markers().keep_together.as_str()),
        };
        if exclude_last {
            spans.pop();
        }

        let rest = spans.last().map_or(text, |last| &text[last.end..]);
        Ok((spans, rest))
    }

    /// Footnote lines: every non-empty cell left on the page.
    ///
    /// A page may end with its last data row, so an empty list is a normal
    /// result rather than a missing field.
    pub fn extract_footnotes(&self, text: &str) -> Vec<String> {
        self.tokenizer.texts(text)
    }

    /// Split the first footnote at the first footer marker it contains.
    ///
    /// Without footnotes there is no footer. Without any marker the whole
    /// footnote is the prefix.
    pub fn split_footer(&self, footnotes: &[String]) -> Option<Footer> {
        let first = footnotes.first()?;
        let split = self
            .footer_markers
            .iter()
            .find_map(|marker| first.find(marker.as_str()));

        Some(match split {
            Some(at) => Footer::new(&first[..at], &first[at..]),
            None => Footer::new(first.as_str(), ""),
        })
    }
}

/// Take the value of a field step, or its default with the cursor unmoved.
fn settle<'t, T: Default>(
    field: PageField,
    outcome: Result<(T, &'t str)>,
    cursor: &'t str,
    ctx: PageContext,
    record: &mut PageRecord,
) -> (T, &'t str) {
    match outcome {
        Ok(found) => {
            log::debug!("Page {}: {} extracted", ctx.number, field);
            found
        }
        Err(e) => {
            note(field, &e, ctx, record);
            (T::default(), cursor)
        }
    }
}

fn note(field: PageField, err: &Error, ctx: PageContext, record: &mut PageRecord) {
    log::warn!("Page {}: {} not found ({})", ctx.number, field, err);
    record.warnings.push(format!("{}: {}", field, err));
}

//! Structural segmentation: pages, header blocks and table rows.

use std::ops::Range;

use super::groups::group_end;
use super::Markers;
use crate::error::{Error, Result};

/// Byte range of one logical table row, from its start marker to the end
/// of its end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// Offset of the row start marker
    pub start: usize,
    /// Offset just past the row end marker
    pub end: usize,
}

impl RowSpan {
    /// The text of this row.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Locates pages, headers and rows in listing text.
#[derive(Debug, Clone)]
pub struct Segmenter {
    markers: Markers,
}

impl Segmenter {
    /// Create a segmenter for the given marker table.
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// The marker table in use.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Page boundaries: the offset of every page break, then the text length.
    ///
    /// Text before the first page break is preamble. Without any page break
    /// the whole text is one page.
    pub fn page_boundaries(&self, text: &str) -> Vec<usize> {
        let mut boundaries: Vec<usize> = text
            .match_indices(self.markers.page_break.as_str())
            .map(|(pos, _)| pos)
            .collect();
        if boundaries.is_empty() {
            boundaries.push(0);
        }
        boundaries.push(text.len());
        boundaries
    }

    /// Consecutive boundary pairs as page ranges.
    pub fn page_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.page_boundaries(text)
            .windows(2)
            .map(|w| w[0]..w[1])
            .collect()
    }

    /// Range of the header group in `page`, from its `{` to its closing `}`.
    pub fn header_span(&self, page: &str) -> Result<Range<usize>> {
        let opener = self.markers.header_group();
        let start = page
            .find(&opener)
            .ok_or_else(|| Error::MissingMarker(opener.clone()))?;
        let end = group_end(page, start)?;
        Ok(start..end)
    }

    /// Rows opened by `start_marker` and closed by the row end marker.
    pub fn rows(&self, text: &str, start_marker: &str) -> Vec<RowSpan> {
        let starts: Vec<usize> = text
            .match_indices(start_marker)
            .map(|(pos, _)| pos)
            .collect();
        let ends: Vec<Range<usize>> = text
            .match_indices(self.markers.row_end.as_str())
            .map(|(pos, m)| pos..pos + m.len())
            .collect();
        pair_rows(&starts, &ends)
    }

    /// Title and column header rows.
    pub fn title_rows(&self, text: &str) -> Vec<RowSpan> {
        self.rows(text, &self.markers.title_row)
    }

    /// Body rows.
    pub fn body_rows(&self, text: &str) -> Vec<RowSpan> {
        self.rows(text, &self.markers.row_start)
    }
}

/// Pair each start offset with the nearest row end that follows it.
///
/// A start seen while a row is already open belongs to that row. An end
/// with no open row is skipped. Both inputs must be in document order.
pub fn pair_rows(starts: &[usize], ends: &[Range<usize>]) -> Vec<RowSpan> {
    let mut rows = Vec::new();
    let mut open: Option<usize> = None;
    let mut unmatched_ends = 0usize;
    let (mut i, mut j) = (0, 0);

    while j < ends.len() {
        if i < starts.len() && starts[i] < ends[j].start {
            open.get_or_insert(starts[i]);
            i += 1;
            continue;
        }
        match open.take() {
            Some(start) => rows.push(RowSpan {
                start,
                end: ends[j].end,
            }),
            None => unmatched_ends += 1,
        }
        j += 1;
    }

    let unmatched_starts = usize::from(open.is_some()) + (starts.len() - i);
    if unmatched_ends > 0 || unmatched_starts > 0 {
        log::debug!(
            "Row pairing: {} rows, {} unmatched starts, {} unmatched ends",
            rows.len(),
            unmatched_starts,
            unmatched_ends
        );
    }

    rows
}

//! Cell tokenizer.
//!
//! A cell in listing RTF is a group closed by the cell terminator, e.g.
//! `\pard\intbl\ql{Alice\cell}`. The tokenizer pulls the text of every such
//! group out of a row span, strips the remaining control sequences and
//! classifies what is left.

use regex::{Captures, Regex};

use super::groups::group_start;
use crate::error::{Error, Result};
use crate::model::{Cell, Row};

/// Extracts and cleans cell text.
#[derive(Debug, Clone)]
pub struct CellTokenizer {
    terminator: String,
    control: Regex,
}

impl CellTokenizer {
    /// Create a tokenizer for the given cell terminator (`\cell}`).
    pub fn new(terminator: impl Into<String>) -> Self {
        Self {
            terminator: terminator.into(),
            control: Regex::new(
                r"\\u(-?\d+) ?\??|\\'([0-9a-fA-F]{2})|\\([{}\\])|\\_|\\[a-zA-Z]+-?\d*|\\[^a-zA-Z]?|[{}\r\n]",
            )
            .unwrap(),
        }
    }

    /// Raw text of every cell in `span`, in order, before cleaning.
    ///
    /// When the terminator closes a group, the cell is the content of that
    /// group. Segments never overlap: a group opened before the previous
    /// terminator is cut at that terminator.
    pub fn segments<'a>(&self, span: &'a str) -> Vec<&'a str> {
        let closes_group = self.terminator.ends_with('}');
        let mut segments = Vec::new();
        let mut floor = 0;

        for (pos, _) in span.match_indices(self.terminator.as_str()) {
            let close = pos + self.terminator.len() - 1;
            let start = if closes_group {
                match group_start(span, close) {
                    Some(open) if open >= floor => open + 1,
                    _ => floor,
                }
            } else {
                floor
            };
            segments.push(&span[start..pos]);
            floor = pos + self.terminator.len();
        }

        segments
    }

    /// Strip control sequences from raw cell text and trim it.
    pub fn clean(&self, raw: &str) -> String {
        let stripped = self.control.replace_all(raw, |caps: &Captures| {
            if let Some(code) = caps.get(1) {
                return decode_unicode(code.as_str());
            }
            if let Some(hex) = caps.get(2) {
                return u8::from_str_radix(hex.as_str(), 16)
                    .map(|b| decode_ansi(b).to_string())
                    .unwrap_or_default();
            }
            if let Some(literal) = caps.get(3) {
                return literal.as_str().to_string();
            }
            if &caps[0] == "\\_" {
                return "-".to_string();
            }
            String::new()
        });
        stripped.trim().to_string()
    }

    /// Cleaned, non-empty cell texts of `span`.
    pub fn texts(&self, span: &str) -> Vec<String> {
        self.segments(span)
            .into_iter()
            .map(|raw| self.clean(raw))
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Cleaned, non-empty, classified cells of `span`.
    pub fn tokens(&self, span: &str) -> Vec<Cell> {
        self.texts(span).into_iter().map(Cell::classify).collect()
    }
}

impl Default for CellTokenizer {
    fn default() -> Self {
        Self::new("\\cell}")
    }
}

/// `\uN` carries a signed 16-bit code unit.
fn decode_unicode(code: &str) -> String {
    code.parse::<i32>()
        .ok()
        .map(|n| if n < 0 { n + 65536 } else { n })
        .and_then(|n| char::from_u32(n as u32))
        .map(String::from)
        .unwrap_or_default()
}

/// Windows-1252 characters for bytes 0x80..=0x9F. Unassigned bytes keep
/// their Latin-1 value.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// `\'hh` escapes are bytes of the document's ANSI code page (`\ansicpg1252`).
fn decode_ansi(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}

/// Assign tokens to column headers by position.
///
/// The i-th token goes to the i-th header. A row with more tokens than
/// headers cannot be assigned without losing or misplacing data.
pub fn assign_row(headers: &[String], tokens: Vec<Cell>, page: u32, row: usize) -> Result<Row> {
    if tokens.len() > headers.len() {
        return Err(Error::RowAlignment {
            page,
            row,
            cells: tokens.len(),
            headers: headers.len(),
        });
    }

    Ok(headers
        .iter()
        .zip(tokens)
        .map(|(header, cell)| (header.as_str(), cell))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> CellTokenizer {
        CellTokenizer::default()
    }

    #[test]
    fn test_segments_one_cell_per_line() {
        let span = "\\pard\\plain\\intbl\\ql\\f1\\fs18{Alice\\cell}\n\
                    \\pard\\plain\\intbl\\ql\\f1\\fs18{30\\cell}\n{\\row}";
        assert_eq!(tokenizer().segments(span), vec!["Alice", "30"]);
    }

    #[test]
    fn test_segments_several_cells_per_line() {
        let span = r"{Alice\cell}{30\cell}{\b F\cell}";
        assert_eq!(tokenizer().segments(span), vec!["Alice", "30", "\\b F"]);
    }

    #[test]
    fn test_segments_nested_groups() {
        let span = r"\qr{Page {\field{\*\fldinst { PAGE }}}\cell}";
        assert_eq!(
            tokenizer().segments(span),
            vec![r"Page {\field{\*\fldinst { PAGE }}}"]
        );
    }

    #[test]
    fn test_segments_unopened_group_uses_previous_cell() {
        let span = r"{A\cell} B\cell}";
        assert_eq!(tokenizer().segments(span), vec!["A", " B"]);
    }

    #[test]
    fn test_clean_strips_control_words() {
        let t = tokenizer();
        assert_eq!(t.clean(r"\b\i0 Subject ID"), "Subject ID");
        assert_eq!(t.clean(r"\fs18  Age\line (years) "), "Age (years)");
        assert_eq!(t.clean("{\\b Bold} text"), "Bold text");
    }

    #[test]
    fn test_clean_decodes_escapes() {
        let t = tokenizer();
        assert_eq!(t.clean(r"\u8804? 65"), "\u{2264} 65");
        assert_eq!(t.clean(r"Caf\'e9"), "Caf\u{e9}");
        assert_eq!(t.clean(r"a \{b\} c\\d"), "a {b} c\\d");
        assert_eq!(t.clean(r"non\_breaking"), "non-breaking");
    }

    #[test]
    fn test_clean_decodes_windows_1252() {
        let t = tokenizer();
        assert_eq!(t.clean(r"Patient\'92s visit"), "Patient\u{2019}s visit");
        assert_eq!(t.clean(r"\'93Mild\'94 \'96 resolved"), "\u{201C}Mild\u{201D} \u{2013} resolved");
        assert_eq!(t.clean(r"\'80 5"), "\u{20AC} 5");
        // Unassigned positions keep their byte value
        assert_eq!(t.clean(r"x\'81"), "x\u{81}");
    }

    #[test]
    fn test_tokens_classify_and_drop_empty() {
        let span = r"{1001\cell}{  \cell}{\b0 4a\cell}{42\cell}";
        assert_eq!(
            tokenizer().tokens(span),
            vec![
                Cell::Integer(1001),
                Cell::Text("4a".into()),
                Cell::Integer(42)
            ]
        );
    }

    #[test]
    fn test_assign_row_positional() {
        let headers = vec!["Name".to_string(), "Age".to_string()];
        let row = assign_row(&headers, vec![Cell::from("Alice"), Cell::Integer(30)], 1, 1).unwrap();
        assert_eq!(row.get("Name"), Some(&Cell::from("Alice")));
        assert_eq!(row.get("Age"), Some(&Cell::Integer(30)));
    }

    #[test]
    fn test_assign_row_short_row_keeps_leading_columns() {
        let headers = vec!["Name".to_string(), "Age".to_string()];
        let row = assign_row(&headers, vec![Cell::from("Bob")], 1, 2).unwrap();
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["Name"]);
    }

    #[test]
    fn test_assign_row_too_many_cells() {
        let headers = vec!["Name".to_string()];
        let result = assign_row(&headers, vec![Cell::from("Bob"), Cell::Integer(3)], 4, 9);
        assert!(matches!(
            result,
            Err(Error::RowAlignment {
                page: 4,
                row: 9,
                cells: 2,
                headers: 1
            })
        ));
    }
}

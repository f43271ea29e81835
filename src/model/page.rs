//! Page-level types.

use super::Cell;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One extracted listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Header cells, with page-number fields substituted
    pub header: Vec<Cell>,

    /// Title lines above the column header row
    pub title: Vec<String>,

    /// Column headers of the listing table
    pub column_headers: Vec<String>,

    /// Data rows keyed by column header, in document order
    pub rows: Vec<Row>,

    /// Footnote lines below the table
    pub footnotes: Vec<String>,

    /// First footnote split at its source/dataset reference
    pub footer: Option<Footer>,

    /// Fields that could not be extracted and were defaulted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl PageRecord {
    /// Create an empty page record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether every field came out without a recorded failure.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Footnote text split into the leading note and the trailing reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Text before the reference marker
    pub prefix: String,
    /// Text from the reference marker onwards
    pub suffix: String,
}

impl Footer {
    /// Create a footer from its two halves.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// A data row: column header to cell, keeping column order.
///
/// Serialized as a JSON object whose keys follow the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    entries: Vec<(String, Cell)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a column. An existing column keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        let column = column.into();
        match self.entries.iter_mut().find(|(k, _)| *k == column) {
            Some((_, existing)) => *existing = cell,
            None => self.entries.push((column, cell)),
        }
    }

    /// Look up a column.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.entries
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column header to cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((k, v)) = access.next_entry::<String, Cell>()? {
                    row.insert(k, v);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_keeps_column_order() {
        let mut row = Row::new();
        row.insert("Subject", Cell::from("1001"));
        row.insert("Age", Cell::Integer(30));
        row.insert("Arm", Cell::from("Placebo"));

        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, vec!["Subject", "Age", "Arm"]);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Subject":"1001","Age":30,"Arm":"Placebo"}"#);
    }

    #[test]
    fn test_row_duplicate_column_overwrites_in_place() {
        let row: Row = vec![
            ("A", Cell::Integer(1)),
            ("B", Cell::Integer(2)),
            ("A", Cell::Integer(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("A"), Some(&Cell::Integer(3)));
        assert_eq!(row.columns().next(), Some("A"));
    }

    #[test]
    fn test_row_deserialize() {
        let row: Row = serde_json::from_str(r#"{"Name":"Alice","Age":30}"#).unwrap();
        assert_eq!(row.get("Name"), Some(&Cell::from("Alice")));
        assert_eq!(row.get("Age"), Some(&Cell::Integer(30)));
    }

    #[test]
    fn test_page_record_schema() {
        let mut page = PageRecord::new();
        page.column_headers = vec!["Name".into()];
        page.footer = Some(Footer::new("Note. ", "Source: ADSL"));

        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("columnHeaders").is_some());
        assert!(value.get("rows").is_some());
        assert_eq!(value["footer"]["suffix"], "Source: ADSL");
        // Empty warnings are omitted
        assert!(value.get("warnings").is_none());
    }

    #[test]
    fn test_page_record_null_footer() {
        let page = PageRecord::new();
        let value = serde_json::to_value(&page).unwrap();
        assert!(value["footer"].is_null());
        assert!(page.is_clean());
    }
}

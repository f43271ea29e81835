//! Document-level types.

use super::PageRecord;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A converted RTF listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Font table of the source document
    pub fonts: FontTable,

    /// One record per page, in document order
    #[serde(rename = "data")]
    pub pages: Vec<PageRecord>,
}

impl DocumentRecord {
    /// Create an empty document record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&PageRecord> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    /// Total number of data rows over all pages.
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// Whether the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Font id to font name mapping.
///
/// Ids are the numbers following `\f` in the font table. They are exposed
/// as `"f<id>"` keys, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    fonts: BTreeMap<u32, String>,
}

impl FontTable {
    /// Create an empty font table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font. A repeated id replaces the earlier name.
    pub fn insert(&mut self, id: u32, name: impl Into<String>) {
        self.fonts.insert(id, name.into());
    }

    /// Look up a font by its numeric id.
    pub fn get(&self, id: u32) -> Option<&str> {
        self.fonts.get(&id).map(String::as_str)
    }

    /// Look up a font by its string key (`"f0"`).
    pub fn get_key(&self, key: &str) -> Option<&str> {
        parse_key(key).and_then(|id| self.get(id))
    }

    /// Entries as (`"f<id>"`, name) pairs, ordered by id.
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> {
        self.fonts
            .iter()
            .map(|(id, name)| (font_key(*id), name.as_str()))
    }

    /// Number of fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Stable string key for a font id.
pub fn font_key(id: u32) -> String {
    format!("f{}", id)
}

fn parse_key(key: &str) -> Option<u32> {
    key.strip_prefix('f')?.parse().ok()
}

impl Serialize for FontTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fonts.len()))?;
        for (key, name) in self.entries() {
            map.serialize_entry(&key, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FontTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FontTableVisitor;

        impl<'de> Visitor<'de> for FontTableVisitor {
            type Value = FontTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of \"f<id>\" keys to font names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FontTable, A::Error> {
                let mut table = FontTable::new();
                while let Some((key, name)) = access.next_entry::<String, String>()? {
                    let id = parse_key(&key).ok_or_else(|| {
                        de::Error::custom(format!("invalid font key `{}`", key))
                    })?;
                    table.insert(id, name);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(FontTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_table_keys() {
        let mut fonts = FontTable::new();
        fonts.insert(10, "Courier New");
        fonts.insert(2, "Arial");
        fonts.insert(0, "Times New Roman");

        let keys: Vec<_> = fonts.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["f0", "f2", "f10"]);
        assert_eq!(fonts.get_key("f2"), Some("Arial"));
        assert_eq!(fonts.get_key("x2"), None);
    }

    #[test]
    fn test_font_table_json() {
        let mut fonts = FontTable::new();
        fonts.insert(0, "Arial");

        let json = serde_json::to_string(&fonts).unwrap();
        assert_eq!(json, r#"{"f0":"Arial"}"#);

        let back: FontTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fonts);
    }

    #[test]
    fn test_font_table_rejects_bad_key() {
        let result: Result<FontTable, _> = serde_json::from_str(r#"{"font0":"Arial"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_pages_serialize_as_data() {
        let mut doc = DocumentRecord::new();
        doc.add_page(PageRecord::new());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["data"].as_array().map(Vec::len), Some(1));
        assert!(value["fonts"].is_object());
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(1).is_some());
    }
}

//! Font table reader.

use regex::Regex;

use super::groups::group_end;
use super::tokenize::CellTokenizer;
use crate::model::FontTable;

/// Reads the `{\fonttbl ...}` block into a [`FontTable`].
#[derive(Debug, Clone)]
pub struct FontTableReader {
    opener: String,
    entry: Regex,
    cleaner: CellTokenizer,
}

impl FontTableReader {
    /// Create a reader for the given font table group opener (`{\fonttbl`).
    pub fn new(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
            entry: Regex::new(r"\{\\f(\d+)").unwrap(),
            cleaner: CellTokenizer::default(),
        }
    }

    /// Extract the font table. A document without one yields an empty table.
    pub fn read(&self, text: &str) -> FontTable {
        let mut fonts = FontTable::new();

        let Some(block) = self.block(text) else {
            log::debug!("No font table found");
            return fonts;
        };

        let mut from = 0;
        while let Some(caps) = self.entry.captures_at(block, from) {
            let (Some(open), Some(id)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let end = group_end(block, open.start()).unwrap_or(block.len());
            from = end.max(open.end());

            let Ok(id) = id.as_str().parse::<u32>() else {
                continue;
            };
            let name = self.entry_name(&block[open.end()..end]);
            if name.is_empty() {
                log::debug!("Font f{} has no name", id);
                continue;
            }
            fonts.insert(id, name);
        }

        log::debug!("Extracted {} fonts", fonts.len());
        fonts
    }

    /// Font name in the body of one `{\f<id> ...;}` entry.
    ///
    /// Destination groups (`{\*\panose ..}`, `{\*\falt ..}`) are dropped and
    /// the name runs to the last `;`. Escapes are decoded like cell text.
    fn entry_name(&self, body: &str) -> String {
        let mut kept = String::with_capacity(body.len());
        let mut rest = body;
        while let Some(at) = rest.find("{\\*") {
            kept.push_str(&rest[..at]);
            kept.push(' ');
            rest = match group_end(rest, at) {
                Ok(end) => &rest[end + 1..],
                Err(_) => "",
            };
        }
        kept.push_str(rest);

        let name = kept.rfind(';').map_or(kept.as_str(), |semi| &kept[..semi]);
        self.cleaner.clean(name)
    }

    /// The font table group, or the rest of the document if it never closes.
    fn block<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find(&self.opener)?;
        match group_end(text, start) {
            Ok(end) => Some(&text[start + self.opener.len()..end]),
            Err(e) => {
                log::warn!("Font table is not closed ({}), reading to end of text", e);
                Some(&text[start + self.opener.len()..])
            }
        }
    }
}

impl Default for FontTableReader {
    fn default() -> Self {
        Self::new("{\\fonttbl")
    }
}

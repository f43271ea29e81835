//! RTF listing fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// One page of a synthetic listing.
#[derive(Debug, Clone, Default)]
pub struct PageFixture {
    pub titles: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub footnote: Option<String>,
}

impl PageFixture {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.titles.push(title.to_string());
        self
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn footnote(mut self, text: &str) -> Self {
        self.footnote = Some(text.to_string());
        self
    }
}

fn cell(text: &str, align: &str) -> String {
    format!("\\pard\\plain\\intbl\\{}\\f1\\fs18{{{}\\cell}}\n", align, text)
}

fn keep_cell(text: &str) -> String {
    format!("\\pard\\plain\\intbl\\keepn\\ql\\f1\\fs18{{{}\\cell}}\n", text)
}

/// Document preamble with a font table.
pub fn preamble(fonts: &[(u32, &str)]) -> String {
    let mut out = String::from("{\\rtf1\\ansi\\ansicpg1252\\uc1\\deff0\\deflang1033\n{\\fonttbl\n");
    for (id, name) in fonts {
        out.push_str(&format!("{{\\f{}\\fswiss\\fprq2\\fcharset0 {};}}\n", id, name));
    }
    out.push_str("}\n{\\colortbl;\\red0\\green0\\blue0;\\red255\\green255\\blue255;}\n");
    out
}

/// Page break, running header and table of one page.
pub fn page(fixture: &PageFixture) -> String {
    let mut out = String::from("\\sectd\\linex0\\endnhere\\pgwsxn15840\\pghsxn12240\n");

    out.push_str("{\\header\\pard\\plain\\qc{\n\\trowd\\trkeep\\trqc\\cellx4000\\cellx8000\n");
    out.push_str(&cell("Protocol: ABC-123", "ql"));
    out.push_str(&cell(
        "Page {\\field{\\*\\fldinst { PAGE }}}{ of }{\\field{\\*\\fldinst { NUMPAGES }}}",
        "qr",
    ));
    out.push_str("{\\row}\n}}\n");

    for title in &fixture.titles {
        out.push_str("\\trowd\\trkeep\\trhdr\\trqc\\cellx8000\n");
        out.push_str(&keep_cell(title));
        out.push_str("{\\row}\n");
    }

    out.push_str("\\trowd\\trkeep\\trhdr\\trqc\\cellx4000\\cellx8000\n");
    for column in &fixture.columns {
        out.push_str(&format!(
            "\\pard\\plain\\intbl\\keepn\\qc\\f1\\fs18\\b{{{}\\cell}}\n",
            column
        ));
    }
    out.push_str("{\\row}\n");

    for row in &fixture.rows {
        out.push_str("\\trowd\\trkeep\\trqc\\cellx4000\\cellx8000\n");
        for value in row {
            out.push_str(&cell(value, "ql"));
        }
        out.push_str("{\\row}\n");
    }

    if let Some(footnote) = &fixture.footnote {
        out.push_str("\\trowd\\trkeep\\trqc\\cellx8000\n");
        out.push_str(&keep_cell(footnote));
        out.push_str("{\\row}\n");
    }

    out
}

/// A complete listing document.
pub fn listing(fonts: &[(u32, &str)], pages: &[PageFixture]) -> String {
    let mut out = preamble(fonts);
    for fixture in pages {
        out.push_str(&page(fixture));
    }
    out.push_str("}\n");
    out
}

/// One font, one page, one title row, columns Name and Age, one data row.
pub fn minimal_listing() -> String {
    listing(
        &[(0, "Arial")],
        &[PageFixture::new(&["Name", "Age"])
            .title("Listing 16.2.1 Demographics")
            .row(&["Alice", "30"])],
    )
}

/// A three page adverse event listing with footnotes.
pub fn adverse_events() -> String {
    let fixture = |first: &str, second: &str| {
        PageFixture::new(&["Subject", "Preferred Term", "Grade"])
            .title("Listing 16.2.7 Adverse Events")
            .title("Safety Population")
            .row(&[first, "Headache", "1"])
            .row(&[second, "Nausea", "2"])
            .footnote("Grade per CTCAE v5.0. Source: ADAE")
    };
    listing(
        &[(0, "Times New Roman"), (1, "Arial"), (2, "Courier New")],
        &[fixture("1001", "1002"), fixture("1003", "1004"), fixture("1005", "1006")],
    )
}

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

//! Control words that locate structure in a listing document.

/// The control-word table used to find pages, headers, rows and cells.
///
/// Defaults match the RTF emitted by SAS ODS listing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Opens the font declaration block
    pub font_table: String,
    /// Starts a new page region
    pub page_break: String,
    /// Opens the page header group
    pub header: String,
    /// Marks a repeated table-header row (titles and column headers)
    pub title_row: String,
    /// Starts a table row definition
    pub row_start: String,
    /// Ends a table row
    pub row_end: String,
    /// Ends a table cell and closes its group
    pub cell_end: String,
    /// Keep-with-next paragraph property used on trailing footnote rows
    pub keep_together: String,
}

impl Markers {
    /// Create the default marker table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the page break marker.
    pub fn with_page_break(mut self, marker: impl Into<String>) -> Self {
        self.page_break = marker.into();
        self
    }

    /// Override the header group marker.
    pub fn with_header(mut self, marker: impl Into<String>) -> Self {
        self.header = marker.into();
        self
    }

    /// Override the title row marker.
    pub fn with_title_row(mut self, marker: impl Into<String>) -> Self {
        self.title_row = marker.into();
        self
    }

    /// Override the row start and row end markers.
    pub fn with_rows(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.row_start = start.into();
        self.row_end = end.into();
        self
    }

    /// Override the keep-together marker.
    pub fn with_keep_together(mut self, marker: impl Into<String>) -> Self {
        self.keep_together = marker.into();
        self
    }

    /// Group opener for the header block (`{\header`).
    pub fn header_group(&self) -> String {
        format!("{{{}", self.header)
    }

    /// Group opener for the font table block (`{\fonttbl`).
    pub fn font_table_group(&self) -> String {
        format!("{{{}", self.font_table)
    }

    /// Markers a document must contain before extraction is attempted.
    pub fn required(&self) -> [&str; 6] {
        [
            self.font_table.as_str(),
            self.page_break.as_str(),
            self.header.as_str(),
            self.cell_end.as_str(),
            self.row_start.as_str(),
            self.row_end.as_str(),
        ]
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            font_table: "\\fonttbl".to_string(),
            page_break: "\\endnhere".to_string(),
            header: "\\header".to_string(),
            title_row: "\\trhdr".to_string(),
            row_start: "\\trowd".to_string(),
            row_end: "{\\row}".to_string(),
            cell_end: "\\cell}".to_string(),
            keep_together: "\\keepn".to_string(),
        }
    }
}

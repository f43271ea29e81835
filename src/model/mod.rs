//! Record types produced by the extraction pipeline.
//!
//! A [`DocumentRecord`] holds the font table and one [`PageRecord`] per
//! page. The model is what gets serialized; it carries no parsing state.

mod cell;
mod document;
mod page;

pub use cell::Cell;
pub use document::{font_key, DocumentRecord, FontTable};
pub use page::{Footer, PageRecord, Row};

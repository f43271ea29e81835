//! RTF listing parsing.

mod fonts;
mod groups;
mod markers;
mod options;
mod page;
mod rtf_parser;
mod segment;
mod tokenize;

pub use fonts::FontTableReader;
pub use groups::{group_end, group_start};
pub use markers::Markers;
pub use options::{ErrorMode, ParseOptions, TrailingRowPolicy};
pub use page::{PageAssembler, PageContext, PageField};
pub use rtf_parser::{normalize, RtfParser};
pub use segment::{pair_rows, RowSpan, Segmenter};
pub use tokenize::{assign_row, CellTokenizer};

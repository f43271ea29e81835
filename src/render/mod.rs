//! Rendering of converted listings.

mod json;

pub use json::{from_json, to_json, write_json, JsonFormat};

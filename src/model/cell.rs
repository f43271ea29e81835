//! Cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell value.
///
/// Cells made entirely of ASCII decimal digits become integers; anything else
/// stays text. Serialized untagged, so integers appear as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Whole-digit token
    Integer(u64),
    /// Any other token
    Text(String),
}

impl Cell {
    /// Classify a cleaned token.
    ///
    /// Digit runs too long for `u64` are kept as text rather than truncated.
    pub fn classify(token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = token.parse::<u64>() {
                return Cell::Integer(n);
            }
        }
        Cell::Text(token)
    }

    /// Integer value, if this is an integer cell.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Cell::Integer(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    /// Text value, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Integer(_) => None,
            Cell::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Integer(n)
    }
}

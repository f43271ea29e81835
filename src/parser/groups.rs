//! Balanced group scanning.
//!
//! RTF groups are delimited by `{` and `}`; `\{` and `\}` are literal
//! braces. Header blocks, the font table and cell contents all nest further
//! groups, so their extent is found by counting depth rather than by taking
//! the first closing brace.

use crate::error::{Error, Result};

/// Whether the byte at `i` is escaped by an odd run of backslashes.
pub(crate) fn is_escaped(bytes: &[u8], i: usize) -> bool {
    let run = bytes[..i]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    run % 2 == 1
}

/// Find the `}` that closes the group opened at `open`.
///
/// `open` must be the offset of a `{`. Depth is counted relative to that
/// group, so nested groups inside it are skipped over.
pub fn group_end(text: &str, open: usize) -> Result<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return Err(Error::UnbalancedGroup { offset: open });
    }

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'{' if !is_escaped(bytes, i) => depth += 1,
            b'}' if !is_escaped(bytes, i) => {
                if depth == 0 {
                    return Ok(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    Err(Error::UnbalancedGroup { offset: open })
}

/// Find the `{` that opens the group closed at `close`.
///
/// Returns `None` when the group is opened before the start of `text`.
pub fn group_start(text: &str, close: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    for i in (0..close.min(bytes.len())).rev() {
        match bytes[i] {
            b'}' if !is_escaped(bytes, i) => depth += 1,
            b'{' if !is_escaped(bytes, i) => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

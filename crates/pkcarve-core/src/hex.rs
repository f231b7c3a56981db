//! Hex rendering helpers for report output.
//!
//! These are display-only. Nothing in the decode pipeline makes a
//! structural decision based on their output.

use std::fmt::Write as FmtWrite;

/// Default number of bytes kept by [`abbreviate`] in report output
pub const DEFAULT_PREVIEW_LEN: usize = 16;

/// Separator placed between the head and tail of an abbreviated rendering
pub const ELLIPSIS: &str = "...";

/// Renders bytes as contiguous lowercase hex (`"0a1b2c"`).
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Renders at most `max_len` bytes of `bytes` as hex.
///
/// Short inputs are rendered in full. Longer inputs keep the first
/// `max_len / 2` and the last `max_len - max_len / 2` bytes, joined by
/// [`ELLIPSIS`].
pub fn abbreviate(bytes: &[u8], max_len: usize) -> String {
    let (head, tail) = split_for_preview(bytes, max_len);
    match tail {
        None => to_hex(head),
        Some(tail) => format!("{}{}{}", to_hex(head), ELLIPSIS, to_hex(tail)),
    }
}

/// Returns the head and, when the input is longer than `max_len`, the tail
/// that [`abbreviate`] renders.
pub fn split_for_preview(bytes: &[u8], max_len: usize) -> (&[u8], Option<&[u8]>) {
    if bytes.len() <= max_len {
        return (bytes, None);
    }
    let first = max_len / 2;
    let second = max_len - first;
    (&bytes[..first], Some(&bytes[bytes.len() - second..]))
}

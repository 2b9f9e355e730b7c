//! Fixed-length, space-padded, single-byte text.
//!
//! Each character occupies one byte (Latin-1). Writes pad with spaces to the
//! full field length and silently truncate longer input; characters outside
//! Latin-1 are written as `?`. Reads strip trailing spaces only, never
//! interior ones and never other whitespace.

use crate::config::{MAX_TEXT_CODE_POINT, PAD_BYTE, UNMAPPABLE_TEXT_BYTE};
use crate::error::Result;

pub fn decode(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&b| b != PAD_BYTE)
        .map_or(0, |pos| pos + 1);
    bytes[..end].iter().map(|&b| b as char).collect()
}

/// Writes `text` into `out`, truncating or space-padding to exactly
/// `out.len()` bytes. Never fails.
pub fn encode(text: &str, out: &mut [u8]) -> Result<()> {
    let mut written = 0;
    for (slot, ch) in out.iter_mut().zip(text.chars()) {
        *slot = latin1(ch);
        written += 1;
    }
    out[written..].fill(PAD_BYTE);
    Ok(())
}

#[inline]
fn latin1(ch: char) -> u8 {
    match u32::from(ch) {
        code if code <= MAX_TEXT_CODE_POINT => code as u8,
        _ => UNMAPPABLE_TEXT_BYTE,
    }
}

//! Bit-flag words: a 16-bit little-endian word whose bits are independent
//! booleans, numbered from the most significant bit.
//!
//! ```text
//! bit index:   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
//! word bit:   15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! mask(i) = 1 << (15 - i)
//! ```
//!
//! Single-flag updates are read-modify-write of the whole word; every other bit,
//! mapped or reserved, is carried over unchanged.

use zerocopy::little_endian::U16;
use zerocopy::{FromBytes, IntoBytes};

use crate::config::{FLAG_WORD_BITS, FLAG_WORD_BYTES};
use crate::error::{MarshalError, Result};

pub fn mask(bit_index: u8) -> Result<u16> {
    if bit_index as usize >= FLAG_WORD_BITS {
        return Err(MarshalError::range(format!(
            "bit index {} outside a {}-bit flag word",
            bit_index, FLAG_WORD_BITS
        )));
    }
    Ok(1u16 << (FLAG_WORD_BITS - 1 - bit_index as usize))
}

pub fn decode_word(bytes: &[u8]) -> Result<u16> {
    U16::read_from_bytes(bytes)
        .map(|w| w.get())
        .map_err(|_| MarshalError::OutOfBounds {
            offset: 0,
            len: FLAG_WORD_BYTES,
            span_len: bytes.len(),
        })
}

pub fn encode_word(word: u16, out: &mut [u8]) -> Result<()> {
    if out.len() != FLAG_WORD_BYTES {
        return Err(MarshalError::OutOfBounds {
            offset: 0,
            len: FLAG_WORD_BYTES,
            span_len: out.len(),
        });
    }
    out.copy_from_slice(U16::new(word).as_bytes());
    Ok(())
}

pub fn is_set(word: u16, bit_index: u8) -> Result<bool> {
    Ok(word & mask(bit_index)? != 0)
}

pub fn with_bit(word: u16, bit_index: u8, on: bool) -> Result<u16> {
    let m = mask(bit_index)?;
    Ok(if on { word | m } else { word & !m })
}

//! Fixed-width two's-complement integers, little-endian.
//!
//! The width is the length of the byte slice handed in: 2, 4 or 8 bytes.
//! Unsigned 8-byte integers are not representable in the `i64` value domain
//! and are rejected like any other unsupported width.

use zerocopy::little_endian::{I16, I32, I64, U16, U32};
use zerocopy::{FromBytes, IntoBytes};

use crate::config::SUPPORTED_INT_WIDTHS;
use crate::error::{MarshalError, Result};

/// Inclusive value range of an integer field.
pub fn bounds(width: usize, signed: bool) -> Result<(i64, i64)> {
    match (width, signed) {
        (2, true) => Ok((i16::MIN as i64, i16::MAX as i64)),
        (2, false) => Ok((0, u16::MAX as i64)),
        (4, true) => Ok((i32::MIN as i64, i32::MAX as i64)),
        (4, false) => Ok((0, u32::MAX as i64)),
        (8, true) => Ok((i64::MIN, i64::MAX)),
        _ => Err(unsupported(width, signed)),
    }
}

pub fn check_width(width: usize, signed: bool) -> Result<()> {
    bounds(width, signed).map(|_| ())
}

fn unsupported(width: usize, signed: bool) -> MarshalError {
    MarshalError::schema(format!(
        "unsupported {} integer width: {} bytes (supported: {:?}, 8 signed only)",
        if signed { "signed" } else { "unsigned" },
        width,
        SUPPORTED_INT_WIDTHS
    ))
}

fn short_read(width: usize) -> MarshalError {
    MarshalError::OutOfBounds {
        offset: 0,
        len: width,
        span_len: width,
    }
}

pub fn decode(bytes: &[u8], signed: bool) -> Result<i64> {
    let width = bytes.len();
    match (width, signed) {
        (2, true) => I16::read_from_bytes(bytes)
            .map(|v| i64::from(v.get()))
            .map_err(|_| short_read(width)),
        (2, false) => U16::read_from_bytes(bytes)
            .map(|v| i64::from(v.get()))
            .map_err(|_| short_read(width)),
        (4, true) => I32::read_from_bytes(bytes)
            .map(|v| i64::from(v.get()))
            .map_err(|_| short_read(width)),
        (4, false) => U32::read_from_bytes(bytes)
            .map(|v| i64::from(v.get()))
            .map_err(|_| short_read(width)),
        (8, true) => I64::read_from_bytes(bytes)
            .map(|v| v.get())
            .map_err(|_| short_read(width)),
        _ => Err(unsupported(width, signed)),
    }
}

/// Writes `value` into `out`, whose length is the field width. Values outside
/// the width's range are rejected before any byte is written.
pub fn encode(value: i64, signed: bool, out: &mut [u8]) -> Result<()> {
    let width = out.len();
    let (min, max) = bounds(width, signed)?;
    if value < min || value > max {
        return Err(MarshalError::range(format!(
            "{} does not fit in a {}-byte {} integer ({}..={})",
            value,
            width,
            if signed { "signed" } else { "unsigned" },
            min,
            max
        )));
    }
    match width {
        2 if signed => out.copy_from_slice(I16::new(value as i16).as_bytes()),
        2 => out.copy_from_slice(U16::new(value as u16).as_bytes()),
        4 if signed => out.copy_from_slice(I32::new(value as i32).as_bytes()),
        4 => out.copy_from_slice(U32::new(value as u32).as_bytes()),
        _ => out.copy_from_slice(I64::new(value).as_bytes()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_layout() {
        assert_eq!(decode(&[0xE9, 0x03], false).unwrap(), 1001);
        assert_eq!(decode(&[0xFF, 0xFF], true).unwrap(), -1);
        assert_eq!(decode(&[0xFF, 0xFF], false).unwrap(), 65_535);
        assert_eq!(decode(&[0x01, 0x00, 0x02, 0x00], true).unwrap(), 0x0002_0001);
        assert_eq!(decode(&[0x00, 0x00, 0x00, 0x80], true).unwrap(), i32::MIN as i64);
    }

    #[test]
    fn every_supported_width_decodes_any_bit_pattern() {
        let bytes = [0xA5u8; 8];
        assert_eq!(decode(&bytes[..2], true).unwrap(), i64::from(0xA5A5u16 as i16));
        assert_eq!(decode(&bytes[..2], false).unwrap(), 0xA5A5);
        assert_eq!(decode(&bytes[..4], true).unwrap(), i64::from(0xA5A5_A5A5u32 as i32));
        assert_eq!(decode(&bytes[..4], false).unwrap(), 0xA5A5_A5A5);
        assert_eq!(decode(&bytes, true).unwrap(), 0xA5A5_A5A5_A5A5_A5A5u64 as i64);
    }

    #[test]
    fn encodes_boundaries_of_each_width() {
        let mut two = [0u8; 2];
        encode(-32_768, true, &mut two).unwrap();
        assert_eq!(two, [0x00, 0x80]);
        encode(65_535, false, &mut two).unwrap();
        assert_eq!(two, [0xFF, 0xFF]);

        let mut four = [0u8; 4];
        encode(u32::MAX as i64, false, &mut four).unwrap();
        assert_eq!(four, [0xFF; 4]);

        let mut eight = [0u8; 8];
        encode(i64::MIN, true, &mut eight).unwrap();
        assert_eq!(eight, i64::MIN.to_le_bytes());
    }

    #[test]
    fn refuses_to_truncate() {
        let mut out = [0x11u8; 2];
        assert!(matches!(encode(32_768, true, &mut out), Err(MarshalError::Range { .. })));
        assert!(matches!(encode(-1, false, &mut out), Err(MarshalError::Range { .. })));
        assert!(matches!(encode(70_000, false, &mut out), Err(MarshalError::Range { .. })));
        assert_eq!(out, [0x11, 0x11]);

        let mut four = [0u8; 4];
        assert!(encode(i32::MAX as i64 + 1, true, &mut four).is_err());
    }

    #[test]
    fn unsupported_widths_are_schema_errors() {
        assert!(matches!(decode(&[0u8; 3], true), Err(MarshalError::Schema { .. })));
        assert!(matches!(decode(&[0u8; 8], false), Err(MarshalError::Schema { .. })));
        assert!(check_width(1, true).is_err());
        assert!(check_width(8, true).is_ok());
    }
}

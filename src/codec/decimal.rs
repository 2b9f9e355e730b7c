//! Scaled fixed-point decimals stored as a little-endian signed 64-bit word
//! holding `value × 10^scale`.
//!
//! Writes round half away from zero to the field scale and reject values whose
//! scaled magnitude needs more than 63 bits. Any stored word decodes, so reads
//! cannot fail on content.

use zerocopy::little_endian::I64;
use zerocopy::{FromBytes, IntoBytes};

use crate::config::{MAX_SCALED_DECIMAL_SCALE, SCALED_DECIMAL_BYTES};
use crate::decimal::Decimal;
use crate::error::{MarshalError, Result};

pub fn check_scale(scale: u8) -> Result<()> {
    if scale > MAX_SCALED_DECIMAL_SCALE {
        return Err(MarshalError::schema(format!(
            "scaled decimal scale {} exceeds maximum {}",
            scale, MAX_SCALED_DECIMAL_SCALE
        )));
    }
    Ok(())
}

pub fn decode(bytes: &[u8], scale: u8) -> Result<Decimal> {
    let raw = I64::read_from_bytes(bytes).map_err(|_| MarshalError::OutOfBounds {
        offset: 0,
        len: SCALED_DECIMAL_BYTES,
        span_len: bytes.len(),
    })?;
    Decimal::new(raw.get() as i128, scale)
}

/// Converts `value` to the stored integer without writing anything.
pub fn scaled(value: &Decimal, scale: u8) -> Result<i64> {
    check_scale(scale)?;
    let overflow = || {
        MarshalError::range(format!(
            "{} scaled by 10^{} does not fit in 63 bits",
            value, scale
        ))
    };
    let digits = value.rescale(scale).ok_or_else(overflow)?;
    if digits.unsigned_abs() > i64::MAX as u128 {
        return Err(overflow());
    }
    Ok(digits as i64)
}

pub fn encode(value: &Decimal, scale: u8, out: &mut [u8]) -> Result<()> {
    if out.len() != SCALED_DECIMAL_BYTES {
        return Err(MarshalError::OutOfBounds {
            offset: 0,
            len: SCALED_DECIMAL_BYTES,
            span_len: out.len(),
        });
    }
    let stored = scaled(value, scale)?;
    out.copy_from_slice(I64::new(stored).as_bytes());
    Ok(())
}

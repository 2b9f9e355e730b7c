//! # Field Codecs
//!
//! Stateless encode/decode functions for each field kind. Every function works
//! on a byte slice that is exactly one element long; locating that slice inside
//! a record is the caller's job (see [`crate::record`]).
//!
//! ## Contract
//!
//! - **Decode never fails on content.** Any bit pattern is a valid value; only
//!   a slice of the wrong length or an unsupported kind parameter is an error.
//! - **Encode validates first.** Range and representability checks complete
//!   before the first byte of `out` is written.
//! - **Text truncates, numbers don't.** Over-long text is cut to the field
//!   length; integers and decimals that do not fit are a `Range` error.
//!
//! ## Module Structure
//!
//! - `int`: fixed-width little-endian integers
//! - `text`: space-padded single-byte text
//! - `decimal`: scaled fixed-point decimals in an i64 word
//! - `flags`: MSB-first bit-flag words

pub mod decimal;
pub mod flags;
pub mod int;
pub mod text;

use crate::error::{MarshalError, Result};
use crate::schema::FieldKind;
use crate::value::FieldValue;

/// Decodes one element of `kind` from `bytes`.
pub fn decode(kind: &FieldKind, bytes: &[u8]) -> Result<FieldValue> {
    match kind {
        FieldKind::FixedInt { signed, .. } => int::decode(bytes, *signed).map(FieldValue::Int),
        FieldKind::PaddedText { .. } => Ok(FieldValue::Text(text::decode(bytes))),
        FieldKind::ScaledDecimal { scale } => {
            decimal::decode(bytes, *scale).map(FieldValue::Decimal)
        }
        FieldKind::BitFlags { .. } => flags::decode_word(bytes).map(FieldValue::Flags),
        FieldKind::RawBytes { .. } => Ok(FieldValue::Bytes(bytes.to_vec())),
    }
}

/// Encodes one element of `kind` into `out`.
pub fn encode(kind: &FieldKind, value: &FieldValue, out: &mut [u8]) -> Result<()> {
    match (kind, value) {
        (FieldKind::FixedInt { signed, .. }, FieldValue::Int(v)) => int::encode(*v, *signed, out),
        (FieldKind::PaddedText { .. }, FieldValue::Text(s)) => text::encode(s, out),
        (FieldKind::ScaledDecimal { scale }, FieldValue::Decimal(d)) => {
            decimal::encode(d, *scale, out)
        }
        (FieldKind::ScaledDecimal { scale }, FieldValue::Int(v)) => {
            decimal::encode(&(*v).into(), *scale, out)
        }
        (FieldKind::BitFlags { .. }, FieldValue::Flags(w)) => flags::encode_word(*w, out),
        (FieldKind::RawBytes { length }, FieldValue::Bytes(b)) => {
            if b.len() != *length {
                return Err(MarshalError::range(format!(
                    "{} bytes supplied for a {}-byte raw field",
                    b.len(),
                    length
                )));
            }
            out.copy_from_slice(b);
            Ok(())
        }
        (kind, value) => Err(kind_mismatch(kind, value)),
    }
}

pub(crate) fn kind_mismatch(kind: &FieldKind, value: &FieldValue) -> MarshalError {
    MarshalError::schema(format!(
        "cannot store {} value in a {} field",
        value.type_name(),
        kind.name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::schema::FlagSet;

    #[test]
    fn dispatches_on_kind() {
        let kind = FieldKind::FixedInt { width: 2, signed: false };
        let mut out = [0u8; 2];
        encode(&kind, &FieldValue::Int(1001), &mut out).unwrap();
        assert_eq!(decode(&kind, &out).unwrap(), FieldValue::Int(1001));

        let kind = FieldKind::PaddedText { length: 4 };
        let mut out = [0u8; 4];
        encode(&kind, &FieldValue::from("ab"), &mut out).unwrap();
        assert_eq!(&out, b"ab  ");
        assert_eq!(decode(&kind, &out).unwrap(), FieldValue::from("ab"));
    }

    #[test]
    fn integers_are_accepted_by_decimal_fields() {
        let kind = FieldKind::ScaledDecimal { scale: 2 };
        let mut out = [0u8; 8];
        encode(&kind, &FieldValue::Int(6000), &mut out).unwrap();
        assert_eq!(
            decode(&kind, &out).unwrap(),
            FieldValue::Decimal("6000.00".parse::<Decimal>().unwrap())
        );
    }

    #[test]
    fn raw_bytes_require_exact_length() {
        let kind = FieldKind::RawBytes { length: 2 };
        let mut out = [0u8; 2];
        assert!(matches!(
            encode(&kind, &FieldValue::Bytes(vec![1]), &mut out),
            Err(MarshalError::Range { .. })
        ));
        encode(&kind, &FieldValue::Bytes(vec![1, 2]), &mut out).unwrap();
        assert_eq!(out, [1, 2]);
    }

    #[test]
    fn mismatched_value_type_is_a_schema_error() {
        let kind = FieldKind::BitFlags {
            flags: FlagSet::default(),
        };
        let mut out = [0u8; 2];
        assert!(matches!(
            encode(&kind, &FieldValue::from("x"), &mut out),
            Err(MarshalError::Schema { .. })
        ));
    }
}

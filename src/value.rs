//! # Field Values
//!
//! `FieldValue` is the decoded form of one field, independent of where its
//! bytes live. The variant is chosen by the field kind:
//!
//! | Field kind | Value |
//! |------------|-------|
//! | FixedInt | `Int(i64)` |
//! | PaddedText | `Text(String)` (trailing spaces stripped) |
//! | ScaledDecimal | `Decimal(Decimal)` |
//! | BitFlags | `Flags(u16)` (whole word) |
//! | RawBytes | `Bytes(Vec<u8>)` |
//! | any kind with occurs > 1 | `Array(Vec<FieldValue>)` |

use std::fmt;

use crate::decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Decimal(Decimal),
    Flags(u16),
    Bytes(Vec<u8>),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Text(_) => "text",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Flags(_) => "flags",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Array(_) => "array",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Decimal(v)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Bytes(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Flags(w) => write!(f, "{:#06x}", w),
            FieldValue::Bytes(b) => {
                f.write_str("0x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            FieldValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

//! # Field Descriptors
//!
//! A `FieldDescriptor` places one named field at a fixed byte offset inside a
//! record and says how its bytes are interpreted:
//!
//! | Kind | Element length | Wire layout |
//! |------|----------------|-------------|
//! | `FixedInt { width, signed }` | width (2, 4, 8) | little-endian two's complement |
//! | `PaddedText { length }` | length | single-byte chars, right-padded with 0x20 |
//! | `ScaledDecimal { scale }` | 8 | little-endian i64 = value × 10^scale |
//! | `BitFlags { flags }` | 2 | little-endian u16, bit 0 = most significant |
//! | `RawBytes { length }` | length | opaque bytes (fillers) |
//!
//! A descriptor may repeat its element `occurs` times back to back (fixed
//! arrays such as `INT a[0:2]`), and may declare that it `redefines` another
//! field of the same schema, which licenses the two to overlap.

use smallvec::SmallVec;

use crate::codec;
use crate::config::{FLAG_WORD_BITS, FLAG_WORD_BYTES, MAX_FLAGS_PER_WORD, SCALED_DECIMAL_BYTES};
use crate::error::{MarshalError, Result};

/// Named bits of a flag word. Names and bit indices are both unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlagSet {
    flags: SmallVec<[(String, u8); MAX_FLAGS_PER_WORD]>,
}

impl FlagSet {
    pub fn new<I, S>(flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for (name, bit) in flags {
            let name = name.into();
            if bit as usize >= FLAG_WORD_BITS {
                return Err(MarshalError::schema(format!(
                    "flag '{}' uses bit {} of a {}-bit word",
                    name, bit, FLAG_WORD_BITS
                )));
            }
            if set.bit(&name).is_some() {
                return Err(MarshalError::schema(format!("duplicate flag name '{}'", name)));
            }
            if let Some((other, _)) = set.flags.iter().find(|(_, b)| *b == bit) {
                return Err(MarshalError::schema(format!(
                    "flags '{}' and '{}' both map to bit {}",
                    other, name, bit
                )));
            }
            set.flags.push((name, bit));
        }
        Ok(set)
    }

    pub fn bit(&self, name: &str) -> Option<u8> {
        self.flags
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bit)| *bit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.flags.iter().map(|(n, b)| (n.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Bits that carry a named flag.
    pub fn mapped_mask(&self) -> u16 {
        self.flags
            .iter()
            .fold(0u16, |acc, (_, bit)| acc | (1u16 << (FLAG_WORD_BITS - 1 - *bit as usize)))
    }

    /// Bits no flag is mapped to; preserved verbatim by flag updates.
    pub fn reserved_mask(&self) -> u16 {
        !self.mapped_mask()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    FixedInt { width: usize, signed: bool },
    PaddedText { length: usize },
    ScaledDecimal { scale: u8 },
    BitFlags { flags: FlagSet },
    RawBytes { length: usize },
}

impl FieldKind {
    /// Byte length of one element of this kind.
    pub fn element_len(&self) -> usize {
        match self {
            FieldKind::FixedInt { width, .. } => *width,
            FieldKind::PaddedText { length } | FieldKind::RawBytes { length } => *length,
            FieldKind::ScaledDecimal { .. } => SCALED_DECIMAL_BYTES,
            FieldKind::BitFlags { .. } => FLAG_WORD_BYTES,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::FixedInt { .. } => "fixed int",
            FieldKind::PaddedText { .. } => "padded text",
            FieldKind::ScaledDecimal { .. } => "scaled decimal",
            FieldKind::BitFlags { .. } => "bit flags",
            FieldKind::RawBytes { .. } => "raw bytes",
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            FieldKind::FixedInt { width, signed } => codec::int::check_width(*width, *signed),
            FieldKind::ScaledDecimal { scale } => codec::decimal::check_scale(*scale),
            FieldKind::PaddedText { length: 0 } | FieldKind::RawBytes { length: 0 } => {
                Err(MarshalError::schema("zero-length field"))
            }
            FieldKind::PaddedText { .. } | FieldKind::RawBytes { .. } | FieldKind::BitFlags { .. } => {
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    offset: usize,
    kind: FieldKind,
    occurs: usize,
    redefines: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, offset: usize, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            offset,
            kind,
            occurs: 1,
            redefines: None,
        }
    }

    pub fn int(name: impl Into<String>, offset: usize, width: usize, signed: bool) -> Self {
        Self::new(name, offset, FieldKind::FixedInt { width, signed })
    }

    /// Signed 16-bit word.
    pub fn int16(name: impl Into<String>, offset: usize) -> Self {
        Self::int(name, offset, 2, true)
    }

    /// Signed 32-bit doubleword.
    pub fn int32(name: impl Into<String>, offset: usize) -> Self {
        Self::int(name, offset, 4, true)
    }

    pub fn text(name: impl Into<String>, offset: usize, length: usize) -> Self {
        Self::new(name, offset, FieldKind::PaddedText { length })
    }

    pub fn decimal(name: impl Into<String>, offset: usize, scale: u8) -> Self {
        Self::new(name, offset, FieldKind::ScaledDecimal { scale })
    }

    pub fn flags(name: impl Into<String>, offset: usize, flags: FlagSet) -> Self {
        Self::new(name, offset, FieldKind::BitFlags { flags })
    }

    pub fn raw(name: impl Into<String>, offset: usize, length: usize) -> Self {
        Self::new(name, offset, FieldKind::RawBytes { length })
    }

    /// Repeats the element `count` times back to back.
    pub fn occurs(mut self, count: usize) -> Self {
        self.occurs = count;
        self
    }

    /// Declares this field an alternate view of `base`'s bytes.
    pub fn redefines(mut self, base: impl Into<String>) -> Self {
        self.redefines = Some(base.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn occurs_count(&self) -> usize {
        self.occurs
    }

    pub fn redefined_field(&self) -> Option<&str> {
        self.redefines.as_deref()
    }

    pub fn element_len(&self) -> usize {
        self.kind.element_len()
    }

    /// Total byte length: element length × occurs. Saturates on overflow so
    /// that schema validation reports the field as not fitting.
    pub fn length(&self) -> usize {
        self.element_len().saturating_mul(self.occurs)
    }

    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length())
    }

    pub fn is_array(&self) -> bool {
        self.occurs > 1
    }

    /// Byte offset of element `index` within the record.
    pub fn element_offset(&self, index: usize) -> Result<usize> {
        if index >= self.occurs {
            return Err(MarshalError::IndexOutOfRange {
                index,
                capacity: self.occurs,
            });
        }
        Ok(self.offset + index * self.element_len())
    }

    pub(crate) fn overlaps(&self, other: &FieldDescriptor) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    pub(crate) fn shifted(&self, prefix: &str, by: usize) -> Self {
        Self {
            name: format!("{}.{}", prefix, self.name),
            offset: self.offset.saturating_add(by),
            kind: self.kind.clone(),
            occurs: self.occurs,
            redefines: self
                .redefines
                .as_ref()
                .map(|base| format!("{}.{}", prefix, base)),
        }
    }
}

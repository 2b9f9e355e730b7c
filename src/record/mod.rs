//! # Record - Schema Bound to Bytes
//!
//! A `Record` pairs a shared [`RecordSchema`] with a [`ByteSpan`] holding
//! exactly `schema.total_length()` bytes, and exposes typed field access by
//! name. All reads and writes go through the field codecs against the bound
//! bytes; there is no decoded copy to keep in sync.
//!
//! ## Ownership
//!
//! The backing storage type decides who owns the bytes:
//!
//! | Constructor | Backing | Owner |
//! |-------------|---------|-------|
//! | `Record::new(&schema)` | `Vec<u8>` (zeroed) | the record |
//! | `Record::wrap(&schema, bytes)` | whatever `bytes` is | the caller |
//! | `RecordArena::record_at[_mut](i)` | `&[u8]` / `&mut [u8]` | the arena |
//! | `record.view_as[_mut](&overlay)` | `&[u8]` / `&mut [u8]` | the base record |
//!
//! Borrowed records cannot outlive their owner and a mutable view excludes
//! every other view of the same bytes; the compiler enforces both.
//!
//! ## Usage
//!
//! ```ignore
//! let mut item = Record::new(&item_schema);
//! item.set("id", 1001)?;
//! item.set_text("name", "Widget A")?;
//! item.set_decimal("price", "19.99".parse()?)?;
//! assert_eq!(item.get_int("id")?, 1001);
//! ```
//!
//! ## Writes Are All-or-Nothing
//!
//! `set` encodes the complete field into a scratch buffer first and copies it
//! into the span only when every element encoded successfully, so a failed
//! `set` (range error, wrong value type, wrong array length) leaves the record
//! byte-for-byte unchanged.
//!
//! ## Thread Safety
//!
//! Records perform no synchronization. `&mut self` on every mutator means a
//! flag read-modify-write cannot interleave with another write to the same
//! record; sharing across threads goes through
//! [`SharedArena`](crate::arena::SharedArena) or an equivalent external lock.

use std::fmt;
use std::io::{Read, Write};

use smallvec::{smallvec, SmallVec};

use crate::codec;
use crate::decimal::Decimal;
use crate::error::{MarshalError, Result};
use crate::schema::{FieldDescriptor, FieldKind, FlagSet, RecordSchema};
use crate::span::ByteSpan;
use crate::value::FieldValue;


#[derive(Clone)]
pub struct Record<'s, B> {
    schema: &'s RecordSchema,
    span: ByteSpan<B>,
}

impl<'s> Record<'s, Vec<u8>> {
    /// Creates a zero-filled record that owns its bytes.
    pub fn new(schema: &'s RecordSchema) -> Self {
        Self {
            schema,
            span: ByteSpan::zeroed(schema.total_length()),
        }
    }
}

impl<'s, B: AsRef<[u8]>> Record<'s, B> {
    /// Binds `schema` to the first `schema.total_length()` bytes of `bytes`.
    pub fn wrap(schema: &'s RecordSchema, bytes: B) -> Result<Self> {
        let span = ByteSpan::window(bytes, 0, schema.total_length())?;
        Ok(Self { schema, span })
    }

    /// Binds `schema` to a slot the caller has already cut to its exact length.
    pub(crate) fn from_slot(schema: &'s RecordSchema, slot: B) -> Self {
        debug_assert_eq!(slot.as_ref().len(), schema.total_length());
        Self {
            schema,
            span: ByteSpan::new(slot),
        }
    }

    pub fn schema(&self) -> &'s RecordSchema {
        self.schema
    }

    pub fn span(&self) -> &ByteSpan<B> {
        &self.span
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.span.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Raw bytes of a field, all elements included.
    pub fn raw(&self, name: &str) -> Result<&[u8]> {
        let field = self.schema.field(name)?;
        self.span.read_bytes(field.offset(), field.length())
    }

    pub fn get(&self, name: &str) -> Result<FieldValue> {
        let field = self.schema.field(name)?;
        let bytes = self.span.read_bytes(field.offset(), field.length())?;
        if !field.is_array() {
            return codec::decode(field.kind(), bytes);
        }
        bytes
            .chunks_exact(field.element_len())
            .map(|chunk| codec::decode(field.kind(), chunk))
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::Array)
    }

    pub fn get_element(&self, name: &str, index: usize) -> Result<FieldValue> {
        let field = self.schema.field(name)?;
        let offset = field.element_offset(index)?;
        codec::decode(
            field.kind(),
            self.span.read_bytes(offset, field.element_len())?,
        )
    }

    fn get_scalar(&self, name: &str) -> Result<FieldValue> {
        let field = self.schema.field(name)?;
        if field.is_array() {
            return Err(MarshalError::schema(format!(
                "field '{}' is an array of {}; address it by element",
                name,
                field.occurs_count()
            )));
        }
        self.get(name)
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        match self.get_scalar(name)? {
            FieldValue::Int(v) => Ok(v),
            other => Err(wrong_kind(name, "int", &other)),
        }
    }

    pub fn get_text(&self, name: &str) -> Result<String> {
        match self.get_scalar(name)? {
            FieldValue::Text(s) => Ok(s),
            other => Err(wrong_kind(name, "text", &other)),
        }
    }

    pub fn get_decimal(&self, name: &str) -> Result<Decimal> {
        match self.get_scalar(name)? {
            FieldValue::Decimal(d) => Ok(d),
            other => Err(wrong_kind(name, "decimal", &other)),
        }
    }

    pub fn get_bytes(&self, name: &str) -> Result<Vec<u8>> {
        match self.get_scalar(name)? {
            FieldValue::Bytes(b) => Ok(b),
            other => Err(wrong_kind(name, "bytes", &other)),
        }
    }

    fn flags_field(&self, name: &str) -> Result<(&'s FieldDescriptor, &'s FlagSet)> {
        let field = self.schema.field(name)?;
        match field.kind() {
            FieldKind::BitFlags { flags } if !field.is_array() => Ok((field, flags)),
            kind => Err(MarshalError::schema(format!(
                "field '{}' is {}, not a single flag word",
                name,
                kind.name()
            ))),
        }
    }

    fn flag_bit(&self, name: &str, flag: &str) -> Result<(&'s FieldDescriptor, u8)> {
        let (field, flags) = self.flags_field(name)?;
        let bit = flags
            .bit(flag)
            .ok_or_else(|| MarshalError::unknown_field(format!("{}.{}", name, flag)))?;
        Ok((field, bit))
    }

    pub fn flags_word(&self, name: &str) -> Result<u16> {
        let (field, _) = self.flags_field(name)?;
        codec::flags::decode_word(self.span.read_bytes(field.offset(), field.length())?)
    }

    pub fn get_flag(&self, name: &str, flag: &str) -> Result<bool> {
        let (field, bit) = self.flag_bit(name, flag)?;
        let word = codec::flags::decode_word(self.span.read_bytes(field.offset(), field.length())?)?;
        codec::flags::is_set(word, bit)
    }

    /// The unmapped bits of a flag word, in place (not shifted).
    pub fn reserved_bits(&self, name: &str) -> Result<u16> {
        let (_, flags) = self.flags_field(name)?;
        Ok(self.flags_word(name)? & flags.reserved_mask())
    }

    /// Reads the same bytes through another schema.
    pub fn view_as<'o>(&self, overlay: &'o RecordSchema) -> Result<Record<'o, &[u8]>> {
        Record::wrap(overlay, self.as_bytes())
    }

    pub fn to_owned_record(&self) -> Record<'s, Vec<u8>> {
        Record {
            schema: self.schema,
            span: ByteSpan::new(self.as_bytes().to_vec()),
        }
    }

    /// Decoded value of every field in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&'s str, Result<FieldValue>)> + '_ {
        self.schema
            .fields()
            .iter()
            .map(move |field| (field.name(), self.get(field.name())))
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.span.write_to(writer)
    }
}

impl<'s, B: AsRef<[u8]> + AsMut<[u8]>> Record<'s, B> {
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.span.as_bytes_mut()
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let field = self.schema.field(name)?;
        let value = value.into();
        let mut scratch: SmallVec<[u8; 64]> = smallvec![0u8; field.length()];

        match (&value, field.is_array()) {
            (FieldValue::Array(items), true) => {
                if items.len() != field.occurs_count() {
                    return Err(MarshalError::range(format!(
                        "{} values supplied for array field '{}' of {}",
                        items.len(),
                        name,
                        field.occurs_count()
                    )));
                }
                for (chunk, item) in scratch.chunks_exact_mut(field.element_len()).zip(items) {
                    codec::encode(field.kind(), item, chunk)?;
                }
            }
            (other, true) => {
                return Err(MarshalError::schema(format!(
                    "array field '{}' needs an array value, got {}",
                    name,
                    other.type_name()
                )));
            }
            (value, false) => codec::encode(field.kind(), value, &mut scratch)?,
        }

        self.span.write_bytes(field.offset(), &scratch)
    }

    pub fn set_element(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<FieldValue>,
    ) -> Result<()> {
        let field = self.schema.field(name)?;
        let offset = field.element_offset(index)?;
        let mut scratch: SmallVec<[u8; 64]> = smallvec![0u8; field.element_len()];
        codec::encode(field.kind(), &value.into(), &mut scratch)?;
        self.span.write_bytes(offset, &scratch)
    }

    pub fn set_int(&mut self, name: &str, value: i64) -> Result<()> {
        self.set(name, FieldValue::Int(value))
    }

    pub fn set_text(&mut self, name: &str, value: &str) -> Result<()> {
        self.set(name, FieldValue::from(value))
    }

    pub fn set_decimal(&mut self, name: &str, value: Decimal) -> Result<()> {
        self.set(name, FieldValue::Decimal(value))
    }

    pub fn set_bytes(&mut self, name: &str, value: &[u8]) -> Result<()> {
        self.set(name, FieldValue::Bytes(value.to_vec()))
    }

    pub fn set_flags_word(&mut self, name: &str, word: u16) -> Result<()> {
        self.flags_field(name)?;
        self.set(name, FieldValue::Flags(word))
    }

    /// Read-modify-write of one bit; all other bits of the word are kept.
    pub fn set_flag(&mut self, name: &str, flag: &str, on: bool) -> Result<()> {
        let (field, bit) = self.flag_bit(name, flag)?;
        let word = codec::flags::decode_word(self.span.read_bytes(field.offset(), field.length())?)?;
        let mut buf = [0u8; 2];
        codec::flags::encode_word(codec::flags::with_bit(word, bit, on)?, &mut buf)?;
        self.span.write_bytes(field.offset(), &buf)
    }

    /// Replaces the unmapped bits of a flag word. `value` must not touch
    /// mapped bits.
    pub fn set_reserved_bits(&mut self, name: &str, value: u16) -> Result<()> {
        let (_, flags) = self.flags_field(name)?;
        let reserved = flags.reserved_mask();
        if value & !reserved != 0 {
            return Err(MarshalError::range(format!(
                "{:#06x} sets bits outside the reserved mask {:#06x} of '{}'",
                value, reserved, name
            )));
        }
        let word = self.flags_word(name)?;
        self.set(name, FieldValue::Flags((word & !reserved) | value))
    }

    /// Mutable view of the same bytes through another schema.
    pub fn view_as_mut<'o>(&mut self, overlay: &'o RecordSchema) -> Result<Record<'o, &mut [u8]>> {
        Record::wrap(overlay, self.span.as_bytes_mut())
    }

    /// Copies the first `byte_count` bytes of `src` over this record's first
    /// `byte_count` bytes, whatever either schema says lives there.
    pub fn copy_prefix_from<C: AsRef<[u8]>>(
        &mut self,
        src: &Record<'_, C>,
        byte_count: usize,
    ) -> Result<()> {
        if byte_count > src.len() || byte_count > self.len() {
            return Err(MarshalError::range(format!(
                "cannot move {} bytes from a {}-byte '{}' into a {}-byte '{}'",
                byte_count,
                src.len(),
                src.schema.name(),
                self.len(),
                self.schema.name()
            )));
        }
        let data = src.span.read_bytes(0, byte_count)?;
        self.span.write_bytes(0, data)
    }

    /// Zero-fills the record.
    pub fn clear(&mut self) {
        self.span.fill(0);
    }

    /// Replaces the record bytes with exactly `len()` bytes from `reader`.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<()> {
        self.span.read_from(reader)
    }
}

fn wrong_kind(name: &str, wanted: &str, got: &FieldValue) -> MarshalError {
    MarshalError::schema(format!(
        "field '{}' holds {}, not {}",
        name,
        got.type_name(),
        wanted
    ))
}

impl<B: AsRef<[u8]>> fmt::Debug for Record<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (name, value) in self.values() {
            match value {
                Ok(v) => s.field(name, &format_args!("{}", v)),
                Err(e) => s.field(name, &format_args!("<{}>", e)),
            };
        }
        s.finish()
    }
}

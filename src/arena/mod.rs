//! # RecordArena - Arrays of Fixed-Layout Records
//!
//! A `RecordArena` is one contiguous, zero-initialized allocation of
//! `schema.total_length() * capacity` bytes, carved into equal slots. Slots are
//! handed out as [`Record`] views by slicing; nothing is allocated per record.
//!
//! ```text
//!  storage: | slot 0 (len) | slot 1 (len) | slot 2 (len) | ... | slot cap-1 |
//!           ^0             ^len           ^2*len
//!  record_at(i) = schema bound to storage[i*len .. (i+1)*len]
//! ```
//!
//! ## Ownership
//!
//! The arena exclusively owns the storage and frees it exactly once, when it
//! is dropped. Views borrow from the arena: `record_at` takes `&self`,
//! `record_at_mut` and `pair_mut` take `&mut self`, so no view can outlive the
//! arena and a mutable view excludes every other view. Distinct slots never
//! alias.
//!
//! ## Block Moves
//!
//! `copy_record(src, dst, n)` copies the first `n` raw bytes of one slot onto
//! another, the legacy "move only the leading half of a structure" pattern.
//! `store(i, &record)` assigns a whole standalone record into a slot.
//!
//! ## Persistence
//!
//! The storage is the on-disk image: `write_to` emits it verbatim and
//! `load`/`from_bytes` rebuild an arena from such an image.
//!
//! ## Thread Safety
//!
//! No internal locking. Wrap the arena in [`SharedArena`] (or any external
//! lock) to share it between threads.

mod shared;

pub use shared::SharedArena;

use std::io::{Read, Write};

use crate::error::{MarshalError, Result};
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::span::ByteSpan;

#[derive(Debug, Clone)]
pub struct RecordArena<'s> {
    schema: &'s RecordSchema,
    capacity: usize,
    storage: ByteSpan<Vec<u8>>,
}

impl<'s> RecordArena<'s> {
    pub fn create(schema: &'s RecordSchema, capacity: usize) -> Result<Self> {
        let size = storage_size(schema, capacity)?;
        tracing::debug!(
            schema = schema.name(),
            capacity,
            bytes = size,
            "allocated record arena"
        );
        Ok(Self {
            schema,
            capacity,
            storage: ByteSpan::zeroed(size),
        })
    }

    /// Adopts an existing storage image. Its length must be a whole number of
    /// records.
    pub fn from_bytes(schema: &'s RecordSchema, bytes: Vec<u8>) -> Result<Self> {
        let record_len = schema.total_length();
        if bytes.len() % record_len != 0 {
            return Err(MarshalError::schema(format!(
                "{} bytes is not a whole number of {}-byte '{}' records",
                bytes.len(),
                record_len,
                schema.name()
            )));
        }
        let capacity = bytes.len() / record_len;
        tracing::debug!(schema = schema.name(), capacity, "adopted record arena image");
        Ok(Self {
            schema,
            capacity,
            storage: ByteSpan::new(bytes),
        })
    }

    /// Reads exactly `capacity` records from `reader`.
    pub fn load<R: Read>(schema: &'s RecordSchema, capacity: usize, reader: R) -> Result<Self> {
        let mut arena = Self::create(schema, capacity)?;
        arena.storage.read_from(reader)?;
        Ok(arena)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.storage.write_to(writer)?;
        tracing::trace!(
            schema = self.schema.name(),
            bytes = self.storage.len(),
            "wrote record arena image"
        );
        Ok(())
    }

    pub fn schema(&self) -> &'s RecordSchema {
        self.schema
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record_len(&self) -> usize {
        self.schema.total_length()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.storage.into_inner()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.capacity {
            return Err(MarshalError::IndexOutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn slot_offset(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(index * self.record_len())
    }

    pub fn record_at(&self, index: usize) -> Result<Record<'s, &[u8]>> {
        let offset = self.slot_offset(index)?;
        let slot = self.storage.read_bytes(offset, self.record_len())?;
        Record::wrap(self.schema, slot)
    }

    pub fn record_at_mut(&mut self, index: usize) -> Result<Record<'s, &mut [u8]>> {
        let offset = self.slot_offset(index)?;
        let len = self.record_len();
        let slot = self.storage.slice_mut(offset, len)?.into_inner();
        Record::wrap(self.schema, slot)
    }

    /// Two simultaneous mutable views of distinct slots, in argument order.
    pub fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<(Record<'s, &mut [u8]>, Record<'s, &mut [u8]>)> {
        self.check_index(first)?;
        self.check_index(second)?;
        if first == second {
            return Err(MarshalError::IndexOutOfRange {
                index: second,
                capacity: self.capacity,
            });
        }
        let len = self.record_len();
        let (lo, hi) = (first.min(second), first.max(second));
        let (head, tail) = self.storage.as_bytes_mut().split_at_mut(hi * len);
        let lo_rec = Record::wrap(self.schema, &mut head[lo * len..(lo + 1) * len])?;
        let hi_rec = Record::wrap(self.schema, &mut tail[..len])?;
        if first < second {
            Ok((lo_rec, hi_rec))
        } else {
            Ok((hi_rec, lo_rec))
        }
    }

    /// Copies the first `byte_count` bytes of slot `src` onto slot `dst`.
    pub fn copy_record(&mut self, src: usize, dst: usize, byte_count: usize) -> Result<()> {
        let src_offset = self.slot_offset(src)?;
        let dst_offset = self.slot_offset(dst)?;
        if byte_count > self.record_len() {
            return Err(MarshalError::range(format!(
                "cannot copy {} bytes between {}-byte '{}' slots",
                byte_count,
                self.record_len(),
                self.schema.name()
            )));
        }
        self.storage
            .as_bytes_mut()
            .copy_within(src_offset..src_offset + byte_count, dst_offset);
        Ok(())
    }

    /// Assigns a whole record into slot `index`.
    pub fn store<B: AsRef<[u8]>>(&mut self, index: usize, record: &Record<'_, B>) -> Result<()> {
        let offset = self.slot_offset(index)?;
        if record.len() != self.record_len() {
            return Err(MarshalError::range(format!(
                "{}-byte '{}' record does not match {}-byte '{}' slots",
                record.len(),
                record.schema().name(),
                self.record_len(),
                self.schema.name()
            )));
        }
        self.storage.write_bytes(offset, record.as_bytes())
    }

    /// Zero-fills slot `index`.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.record_at_mut(index)?.clear();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Record<'s, &[u8]>> + '_ {
        let schema = self.schema;
        self.storage
            .as_bytes()
            .chunks_exact(self.record_len())
            .map(move |slot| Record::from_slot(schema, slot))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = Record<'s, &mut [u8]>> + '_ {
        let schema = self.schema;
        let len = self.record_len();
        self.storage
            .as_bytes_mut()
            .chunks_exact_mut(len)
            .map(move |slot| Record::from_slot(schema, slot))
    }
}

fn storage_size(schema: &RecordSchema, capacity: usize) -> Result<usize> {
    schema.total_length().checked_mul(capacity).ok_or_else(|| {
        MarshalError::range(format!(
            "{} slots of {} bytes overflow the address space",
            capacity,
            schema.total_length()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::schema::FieldDescriptor;
    use crate::value::FieldValue;

    fn employee_schema() -> RecordSchema {
        RecordSchema::build_disjoint(
            "employee",
            20,
            vec![
                FieldDescriptor::int16("emp_id", 0),
                FieldDescriptor::text("name", 2, 10),
                FieldDescriptor::decimal("salary", 12, 2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn create_allocates_zeroed_slots() {
        let schema = employee_schema();
        let arena = RecordArena::create(&schema, 100).unwrap();
        assert_eq!(arena.capacity(), 100);
        assert_eq!(arena.as_bytes().len(), 2000);
        assert!(arena.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn record_at_rejects_index_at_capacity() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 3).unwrap();
        assert!(arena.record_at(2).is_ok());
        assert!(matches!(
            arena.record_at(3),
            Err(MarshalError::IndexOutOfRange { index: 3, capacity: 3 })
        ));
        assert!(arena.record_at_mut(7).is_err());
    }

    #[test]
    fn views_write_through_to_storage_at_slot_offset() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 3).unwrap();
        arena.record_at_mut(1).unwrap().set_int("emp_id", 1002).unwrap();
        assert_eq!(&arena.as_bytes()[20..22], &1002i16.to_le_bytes());
        assert_eq!(arena.record_at(1).unwrap().get_int("emp_id").unwrap(), 1002);
        assert_eq!(arena.record_at(0).unwrap().get_int("emp_id").unwrap(), 0);
    }

    #[test]
    fn distinct_slots_never_alias() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 4).unwrap();
        {
            let (mut a, mut b) = arena.pair_mut(2, 0).unwrap();
            a.set_text("name", "Second").unwrap();
            b.set_text("name", "Zeroth").unwrap();
        }
        assert_eq!(arena.record_at(2).unwrap().get_text("name").unwrap(), "Second");
        assert_eq!(arena.record_at(0).unwrap().get_text("name").unwrap(), "Zeroth");
        assert_eq!(arena.record_at(1).unwrap().get_text("name").unwrap(), "\0".repeat(10));
        assert!(arena.pair_mut(1, 1).is_err());
        assert!(arena.pair_mut(1, 4).is_err());
    }

    #[test]
    fn copy_record_moves_only_the_requested_prefix() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 3).unwrap();
        {
            let mut r = arena.record_at_mut(0).unwrap();
            r.set_int("emp_id", 1001).unwrap();
            r.set_text("name", "John Smith").unwrap();
            r.set_decimal("salary", "5250.00".parse().unwrap()).unwrap();
        }
        arena.copy_record(0, 2, 10).unwrap();

        let copy = arena.record_at(2).unwrap();
        assert_eq!(copy.get_int("emp_id").unwrap(), 1001);
        assert_eq!(&copy.raw("name").unwrap()[..8], b"John Smi");
        assert_eq!(&copy.raw("name").unwrap()[8..], &[0, 0]);
        assert_eq!(copy.get_decimal("salary").unwrap(), Decimal::ZERO);

        assert!(matches!(arena.copy_record(0, 2, 21), Err(MarshalError::Range { .. })));
        assert!(arena.copy_record(0, 3, 1).is_err());
    }

    #[test]
    fn store_assigns_a_standalone_record() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 2).unwrap();
        let mut person = Record::new(&schema);
        person.set_int("emp_id", 1001).unwrap();
        arena.store(1, &person).unwrap();
        assert_eq!(
            arena.record_at(1).unwrap().get("emp_id").unwrap(),
            FieldValue::Int(1001)
        );

        let other = RecordSchema::build("other", 8, vec![]).unwrap();
        assert!(arena.store(0, &Record::new(&other)).is_err());
    }

    #[test]
    fn iterators_visit_every_slot_in_order() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 5).unwrap();
        for (i, mut rec) in arena.iter_mut().enumerate() {
            rec.set_int("emp_id", 100 + i as i64).unwrap();
        }
        let ids: Vec<i64> = arena.iter().map(|r| r.get_int("emp_id").unwrap()).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104]);
        arena.clear(3).unwrap();
        assert_eq!(arena.record_at(3).unwrap().get_int("emp_id").unwrap(), 0);
    }

    #[test]
    fn from_bytes_requires_whole_records() {
        let schema = employee_schema();
        assert!(RecordArena::from_bytes(&schema, vec![0; 41]).is_err());
        let arena = RecordArena::from_bytes(&schema, vec![0; 60]).unwrap();
        assert_eq!(arena.capacity(), 3);
    }

    #[test]
    fn image_round_trips_through_a_writer() {
        let schema = employee_schema();
        let mut arena = RecordArena::create(&schema, 2).unwrap();
        arena.record_at_mut(1).unwrap().set_text("name", "Jane Doe").unwrap();

        let mut image = Vec::new();
        arena.write_to(&mut image).unwrap();
        let reloaded = RecordArena::load(&schema, 2, image.as_slice()).unwrap();
        assert_eq!(reloaded.as_bytes(), arena.as_bytes());
        assert!(RecordArena::load(&schema, 3, image.as_slice()).is_err());
    }

    #[test]
    fn oversized_capacity_is_a_range_error() {
        let schema = employee_schema();
        assert!(matches!(
            RecordArena::create(&schema, usize::MAX),
            Err(MarshalError::Range { .. })
        ));
    }
}

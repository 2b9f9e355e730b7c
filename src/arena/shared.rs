//! Lock-guarded arena for cross-thread use.
//!
//! Readers share a `parking_lot::RwLock` read guard; writers take the write
//! guard for the duration of one closure, so a slot is never observed half
//! written. Views never escape the closure.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::RecordArena;
use crate::error::Result;
use crate::record::Record;
use crate::schema::RecordSchema;

#[derive(Debug)]
pub struct SharedArena<'s> {
    inner: RwLock<RecordArena<'s>>,
}

impl<'s> SharedArena<'s> {
    pub fn new(arena: RecordArena<'s>) -> Self {
        Self {
            inner: RwLock::new(arena),
        }
    }

    pub fn create(schema: &'s RecordSchema, capacity: usize) -> Result<Self> {
        Ok(Self::new(RecordArena::create(schema, capacity)?))
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn with_record<T>(
        &self,
        index: usize,
        f: impl FnOnce(&Record<'s, &[u8]>) -> Result<T>,
    ) -> Result<T> {
        let guard = self.inner.read();
        let record = guard.record_at(index)?;
        f(&record)
    }

    pub fn with_record_mut<T>(
        &self,
        index: usize,
        f: impl FnOnce(&mut Record<'s, &mut [u8]>) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.inner.write();
        let mut record = guard.record_at_mut(index)?;
        f(&mut record)
    }

    pub fn copy_record(&self, src: usize, dst: usize, byte_count: usize) -> Result<()> {
        self.inner.write().copy_record(src, dst, byte_count)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, RecordArena<'s>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, RecordArena<'s>> {
        self.inner.write()
    }

    pub fn into_inner(self) -> RecordArena<'s> {
        self.inner.into_inner()
    }
}

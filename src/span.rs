//! # ByteSpan - Bounds-Checked Byte Windows
//!
//! `ByteSpan` is a window of `len` bytes starting at `start` inside some backing
//! storage `B`. The storage may be owned (`Vec<u8>`) or borrowed (`&[u8]`,
//! `&mut [u8]`); the type parameter decides which operations exist:
//!
//! | Backing | Reads | Writes | Typical owner |
//! |---------|-------|--------|---------------|
//! | `Vec<u8>` | yes | yes | standalone record, arena storage |
//! | `&[u8]` | yes | no | shared record view |
//! | `&mut [u8]` | yes | yes | arena slot, overlay view |
//!
//! ## Bounds Checking
//!
//! Every access validates `offset + len <= span.len()` (with overflow-checked
//! arithmetic) before touching memory and fails with
//! [`MarshalError::OutOfBounds`] otherwise. A failed write never modifies a
//! single byte.
//!
//! ## Byte Order
//!
//! Integers are little-endian two's complement. The conversions go through
//! `zerocopy`'s unaligned little-endian wrappers, so spans never need to be
//! aligned.
//!
//! ## Slicing
//!
//! `slice` and `slice_mut` return zero-copy sub-spans borrowing from the parent,
//! so the borrow checker ties a sub-span's lifetime to its parent.

use std::io::{Read, Write};

use crate::codec;
use crate::error::{MarshalError, Result};

#[derive(Debug, Clone)]
pub struct ByteSpan<B> {
    bytes: B,
    start: usize,
    len: usize,
}

impl ByteSpan<Vec<u8>> {
    pub fn zeroed(len: usize) -> Self {
        Self::new(vec![0u8; len])
    }
}

impl<B: AsRef<[u8]>> ByteSpan<B> {
    /// Spans the whole of `bytes`.
    pub fn new(bytes: B) -> Self {
        let len = bytes.as_ref().len();
        Self {
            bytes,
            start: 0,
            len,
        }
    }

    /// Spans `len` bytes of `bytes` starting at `start`.
    pub fn window(bytes: B, start: usize, len: usize) -> Result<Self> {
        check_bounds(start, len, bytes.as_ref().len())?;
        Ok(Self { bytes, start, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[self.start..self.start + self.len]
    }

    pub fn into_inner(self) -> B {
        self.bytes
    }

    #[inline]
    fn check(&self, offset: usize, len: usize) -> Result<()> {
        check_bounds(offset, len, self.len)
    }

    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.check(offset, len)?;
        Ok(&self.as_bytes()[offset..offset + len])
    }

    pub fn read_int(&self, offset: usize, width: usize, signed: bool) -> Result<i64> {
        codec::int::decode(self.read_bytes(offset, width)?, signed)
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<ByteSpan<&[u8]>> {
        Ok(ByteSpan::new(self.read_bytes(offset, len)?))
    }

    /// Writes the whole span to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteSpan<B> {
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let (start, len) = (self.start, self.len);
        &mut self.bytes.as_mut()[start..start + len]
    }

    pub fn write_bytes(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.check(offset, data.len())?;
        self.as_bytes_mut()[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn write_int(&mut self, offset: usize, width: usize, signed: bool, value: i64) -> Result<()> {
        self.check(offset, width)?;
        codec::int::encode(value, signed, &mut self.as_bytes_mut()[offset..offset + width])
    }

    pub fn slice_mut(&mut self, offset: usize, len: usize) -> Result<ByteSpan<&mut [u8]>> {
        self.check(offset, len)?;
        Ok(ByteSpan::new(&mut self.as_bytes_mut()[offset..offset + len]))
    }

    pub fn fill(&mut self, byte: u8) {
        self.as_bytes_mut().fill(byte);
    }

    /// Fills the whole span from `reader`. A short read is reported as
    /// [`MarshalError::Io`] and leaves the span unchanged.
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut staged = vec![0u8; self.len];
        reader.read_exact(&mut staged)?;
        self.as_bytes_mut().copy_from_slice(&staged);
        Ok(())
    }
}

#[inline]
pub(crate) fn check_bounds(offset: usize, len: usize, span_len: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= span_len => Ok(()),
        _ => Err(MarshalError::OutOfBounds {
            offset,
            len,
            span_len,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_span_has_requested_length() {
        let span = ByteSpan::zeroed(20);
        assert_eq!(span.len(), 20);
        assert!(span.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn read_int_is_little_endian_and_sign_extends() {
        let span = ByteSpan::new(vec![0xFE, 0xFF, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(span.read_int(0, 2, true).unwrap(), -2);
        assert_eq!(span.read_int(0, 2, false).unwrap(), 0xFFFE);
        assert_eq!(span.read_int(2, 4, true).unwrap(), 1);
    }

    #[test]
    fn write_int_round_trips_through_read_int() {
        let mut span = ByteSpan::zeroed(8);
        span.write_int(0, 4, true, -123_456).unwrap();
        span.write_int(4, 2, false, 65_535).unwrap();
        assert_eq!(span.read_int(0, 4, true).unwrap(), -123_456);
        assert_eq!(span.read_int(4, 2, false).unwrap(), 65_535);
        assert_eq!(&span.as_bytes()[4..6], &[0xFF, 0xFF]);
    }

    #[test]
    fn out_of_range_write_leaves_bytes_untouched() {
        let mut span = ByteSpan::new(vec![0xAA; 4]);
        let err = span.write_int(0, 2, true, 40_000).unwrap_err();
        assert!(matches!(err, MarshalError::Range { .. }));
        assert_eq!(span.as_bytes(), &[0xAA; 4]);
    }

    #[test]
    fn access_past_end_is_out_of_bounds() {
        let mut span = ByteSpan::zeroed(4);
        assert!(matches!(
            span.read_bytes(2, 3),
            Err(MarshalError::OutOfBounds {
                offset: 2,
                len: 3,
                span_len: 4
            })
        ));
        assert!(span.write_bytes(3, &[1, 2]).is_err());
        assert_eq!(span.as_bytes(), &[0, 0, 0, 0]);
        assert!(span.read_int(4, 2, false).is_err());
    }

    #[test]
    fn offset_overflow_is_out_of_bounds_not_a_panic() {
        let span = ByteSpan::zeroed(4);
        assert!(matches!(
            span.read_bytes(usize::MAX, 2),
            Err(MarshalError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn slice_is_zero_copy() {
        let data = vec![1u8, 2, 3, 4, 5, 6];
        let span = ByteSpan::new(data.as_slice());
        let sub = span.slice(2, 3).unwrap();
        assert_eq!(sub.as_bytes(), &[3, 4, 5]);
        assert!(std::ptr::eq(sub.as_bytes().as_ptr(), data[2..].as_ptr()));
        assert!(span.slice(4, 3).is_err());
    }

    #[test]
    fn slice_mut_writes_through_to_parent() {
        let mut span = ByteSpan::zeroed(6);
        {
            let mut sub = span.slice_mut(2, 2).unwrap();
            sub.write_bytes(0, &[7, 8]).unwrap();
            assert!(sub.write_bytes(1, &[9, 9]).is_err());
        }
        assert_eq!(span.as_bytes(), &[0, 0, 7, 8, 0, 0]);
    }

    #[test]
    fn window_offsets_into_backing_storage() {
        let mut backing = vec![0u8; 10];
        {
            let mut span = ByteSpan::window(backing.as_mut_slice(), 4, 4).unwrap();
            span.write_bytes(0, &[1, 2, 3, 4]).unwrap();
            assert!(span.write_bytes(1, &[0; 4]).is_err());
        }
        assert_eq!(backing, vec![0, 0, 0, 0, 1, 2, 3, 4, 0, 0]);
        assert!(ByteSpan::window(backing.as_slice(), 8, 4).is_err());
    }

    #[test]
    fn read_from_and_write_to_move_exactly_the_span() {
        let mut span = ByteSpan::zeroed(3);
        span.read_from(&[9u8, 8, 7, 6][..]).unwrap();
        assert_eq!(span.as_bytes(), &[9, 8, 7]);

        let mut sink = Vec::new();
        span.write_to(&mut sink).unwrap();
        assert_eq!(sink, vec![9, 8, 7]);

        assert!(matches!(
            span.read_from(&[1u8][..]),
            Err(MarshalError::Io(_))
        ));
        assert_eq!(span.as_bytes(), &[9, 8, 7]);
    }

    #[test]
    fn short_chained_source_leaves_span_untouched() {
        let mut span = ByteSpan::new(vec![0xE9, 0x03, b'W', b'i', b'd', b'g', b'e']);
        let source = (&[0xFFu8; 5][..]).chain(&[][..]);
        assert!(matches!(span.read_from(source), Err(MarshalError::Io(_))));
        assert_eq!(span.as_bytes(), &[0xE9, 0x03, b'W', b'i', b'd', b'g', b'e']);
    }
}

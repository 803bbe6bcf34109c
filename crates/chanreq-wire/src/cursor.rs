use crate::error::{ensure_capacity, EncodeResult};
use crate::{write_flag, write_string, write_varint};

/// Sequential writer over a fixed output slice.
///
/// Each `put_*` call appends one field after the previous one and fails
/// without writing if the field does not fit.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    /// Start writing at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Append a single raw byte.
    pub fn put_u8(&mut self, value: u8) -> EncodeResult<()> {
        ensure_capacity(&self.buf[self.pos..], 1)?;
        self.buf[self.pos] = value;
        self.pos += 1;
        Ok(())
    }

    /// Append a strict 0/1 boolean.
    pub fn put_flag(&mut self, value: bool) -> EncodeResult<()> {
        self.pos += write_flag(&mut self.buf[self.pos..], value)?;
        Ok(())
    }

    /// Append a length-prefixed string.
    pub fn put_string(&mut self, data: &[u8]) -> EncodeResult<()> {
        self.pos += write_string(&mut self.buf[self.pos..], data)?;
        Ok(())
    }

    /// Append a variable-length integer.
    pub fn put_varint(&mut self, value: u64) -> EncodeResult<()> {
        self.pos += write_varint(&mut self.buf[self.pos..], value)?;
        Ok(())
    }

    /// The unwritten tail of the buffer, for delegating to another encoder.
    pub fn remaining_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    /// Record `n` bytes written through [`remaining_mut`](Self::remaining_mut).
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.buf.len());
        self.pos += n;
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

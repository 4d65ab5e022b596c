//! Encoder table for ROS primitive types.
//!
//! This module provides the [`WireEncode`] trait, its implementations for
//! every primitive wire type, the generic [`encode_array`] combinator and
//! the [`WireWriter`] helper for sequential field encoding.
//!
//! Encoders follow one contract: given a destination buffer and a byte
//! offset, write the value and return the offset just past it. A value that
//! does not fit is rejected with [`Error::BufferOverrun`] before any byte is
//! written.

use crate::buffer::WriteBuffer;
use crate::error::{Error, Result};
use crate::types::{Duration, Raw64, Time};

/// Trait for values with a ROS wire representation.
pub trait WireEncode {
    /// Returns the number of bytes [`WireEncode::encode`] will write.
    fn encoded_len(&self) -> usize;

    /// Writes the value at `offset` and returns the advanced offset.
    ///
    /// # Errors
    /// Returns [`Error::BufferOverrun`] if the value does not fit.
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize>;
}

macro_rules! impl_wire_encode_numeric {
    ($ty:ty, $put:ident) => {
        impl WireEncode for $ty {
            #[inline(always)]
            fn encoded_len(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            #[inline(always)]
            fn encode<B: WriteBuffer + ?Sized>(
                &self,
                buffer: &mut B,
                offset: usize,
            ) -> Result<usize> {
                buffer.$put(offset, *self)
            }
        }
    };
}

impl_wire_encode_numeric!(u8, put_u8);
impl_wire_encode_numeric!(i8, put_i8);
impl_wire_encode_numeric!(u16, put_u16_le);
impl_wire_encode_numeric!(i16, put_i16_le);
impl_wire_encode_numeric!(u32, put_u32_le);
impl_wire_encode_numeric!(i32, put_i32_le);
impl_wire_encode_numeric!(u64, put_u64_le);
impl_wire_encode_numeric!(i64, put_i64_le);
impl_wire_encode_numeric!(f32, put_f32_le);
impl_wire_encode_numeric!(f64, put_f64_le);

impl WireEncode for bool {
    #[inline(always)]
    fn encoded_len(&self) -> usize {
        1
    }

    #[inline(always)]
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        i8::from(*self).encode(buffer, offset)
    }
}

impl WireEncode for str {
    #[inline]
    fn encoded_len(&self) -> usize {
        4 + self.len()
    }

    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        let len = u32::try_from(self.len()).map_err(|_| Error::LengthOverflow { len: self.len() })?;
        buffer.ensure_writable(offset, self.encoded_len())?;
        let offset = buffer.put_u32_le(offset, len)?;
        buffer.put_bytes(offset, self.as_bytes())
    }
}

impl WireEncode for String {
    #[inline]
    fn encoded_len(&self) -> usize {
        self.as_str().encoded_len()
    }

    #[inline]
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        self.as_str().encode(buffer, offset)
    }
}

impl WireEncode for Raw64 {
    #[inline(always)]
    fn encoded_len(&self) -> usize {
        Self::ENCODED_LENGTH
    }

    #[inline(always)]
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        buffer.put_bytes(offset, &self.0)
    }
}

macro_rules! impl_wire_encode_secs_nsecs {
    ($ty:ty) => {
        impl WireEncode for $ty {
            #[inline(always)]
            fn encoded_len(&self) -> usize {
                <$ty>::ENCODED_LENGTH
            }

            #[inline]
            fn encode<B: WriteBuffer + ?Sized>(
                &self,
                buffer: &mut B,
                offset: usize,
            ) -> Result<usize> {
                buffer.ensure_writable(offset, <$ty>::ENCODED_LENGTH)?;
                let offset = self.secs.encode(buffer, offset)?;
                self.nsecs.encode(buffer, offset)
            }
        }
    };
}

impl_wire_encode_secs_nsecs!(Time);
impl_wire_encode_secs_nsecs!(Duration);

impl<T: WireEncode + ?Sized> WireEncode for &T {
    #[inline(always)]
    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    #[inline(always)]
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        (**self).encode(buffer, offset)
    }
}

/// Fixed-length arrays are encoded as their elements back to back, with no
/// length prefix.
impl<T: WireEncode, const N: usize> WireEncode for [T; N] {
    #[inline]
    fn encoded_len(&self) -> usize {
        array_encoded_len(self)
    }

    #[inline]
    fn encode<B: WriteBuffer + ?Sized>(&self, buffer: &mut B, offset: usize) -> Result<usize> {
        encode_array(self, buffer, offset)
    }
}

/// Returns the total encoded size of `values` when written as an array.
#[must_use]
pub fn array_encoded_len<T: WireEncode>(values: &[T]) -> usize {
    values.iter().map(WireEncode::encoded_len).sum()
}

/// Encodes every element of `values` in index order, threading the offset
/// from one element into the next.
///
/// No length prefix is written: the element count is part of the message
/// framing owned by the caller. The whole array is bounds checked up front,
/// so a failed call writes nothing.
///
/// # Arguments
/// * `values` - Elements to encode
/// * `buffer` - Destination buffer
/// * `offset` - Byte offset of the first element
///
/// # Returns
/// The offset just past the last element.
pub fn encode_array<T, B>(values: &[T], buffer: &mut B, offset: usize) -> Result<usize>
where
    T: WireEncode,
    B: WriteBuffer + ?Sized,
{
    tracing::trace!(len = values.len(), offset, "encoding array");
    buffer.ensure_writable(offset, array_encoded_len(values))?;
    values
        .iter()
        .try_fold(offset, |offset, value| value.encode(buffer, offset))
}

/// Encodes a caller-supplied byte sequence as a legacy int64/uint64 field.
///
/// The sequence must be exactly eight bytes; it is copied verbatim.
///
/// # Errors
/// Returns [`Error::InvalidOperand`] for any other length, without touching
/// the buffer.
pub fn encode_raw64<B: WriteBuffer + ?Sized>(
    bytes: &[u8],
    buffer: &mut B,
    offset: usize,
) -> Result<usize> {
    let raw = Raw64::try_from(bytes).inspect_err(|err| {
        tracing::debug!(%err, offset, "rejected 64-bit operand");
    })?;
    raw.encode(buffer, offset)
}

/// Helper for encoding a sequence of fields into one buffer.
///
/// Tracks the current write position so a schema walker can emit fields in
/// declaration order without threading offsets by hand.
#[derive(Debug)]
pub struct WireWriter<'a, B: WriteBuffer + ?Sized> {
    buffer: &'a mut B,
    offset: usize,
    position: usize,
}

impl<'a, B: WriteBuffer + ?Sized> WireWriter<'a, B> {
    /// Creates a new writer.
    ///
    /// # Arguments
    /// * `buffer` - Mutable byte buffer to write to
    /// * `offset` - Starting offset in the buffer
    #[must_use]
    pub fn new(buffer: &'a mut B, offset: usize) -> Self {
        Self {
            buffer,
            offset,
            position: offset,
        }
    }

    /// Returns the underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &B {
        self.buffer
    }

    /// Returns the starting offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the current write position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes written.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.position - self.offset
    }

    /// Returns the remaining capacity.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Encodes one value at the current position and advances.
    pub fn write<T: WireEncode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.position = value.encode(&mut *self.buffer, self.position)?;
        Ok(())
    }

    /// Encodes an array at the current position and advances.
    pub fn write_array<T: WireEncode>(&mut self, values: &[T]) -> Result<()> {
        self.position = encode_array(values, &mut *self.buffer, self.position)?;
        Ok(())
    }

    /// Encodes a legacy 64-bit byte sequence at the current position and
    /// advances.
    pub fn write_raw64(&mut self, bytes: &[u8]) -> Result<()> {
        self.position = encode_raw64(bytes, &mut *self.buffer, self.position)?;
        Ok(())
    }

    /// Consumes the writer and returns the final position.
    #[must_use]
    pub fn finish(self) -> usize {
        self.position
    }
}

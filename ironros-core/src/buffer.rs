//! Buffer traits for bounds-checked primitive reads and writes.
//!
//! This module provides:
//! - [`ReadBuffer`] trait for read-only buffer access
//! - [`WriteBuffer`] trait for read-write buffer access
//!
//! Both traits are implemented for byte slices, fixed-size byte arrays,
//! `Vec<u8>` and the `bytes` crate containers. Buffers are never grown:
//! a `Vec<u8>` behaves as a fixed region of its current length, and any
//! access that would cross its end fails with an error instead of panicking.

use bytes::{Bytes, BytesMut};

use crate::error::{Error, Result};

/// Trait for read-only buffer access with checked primitive reads.
///
/// All read methods use little-endian byte order.
pub trait ReadBuffer {
    /// Returns the buffer as a byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the length of the buffer in bytes.
    #[inline(always)]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that `len` bytes starting at `offset` lie inside the buffer.
    ///
    /// # Errors
    /// Returns [`Error::BufferUnderrun`] if the range crosses the end.
    #[inline]
    fn ensure_readable(&self, offset: usize, len: usize) -> Result<()> {
        let size = self.len();
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::BufferUnderrun {
                offset,
                required: len,
                len: size,
            }),
        }
    }

    /// Returns a slice of `len` bytes at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to start from
    /// * `len` - Number of bytes to read
    #[inline]
    fn get_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.ensure_readable(offset, len)?;
        Ok(&self.as_slice()[offset..offset + len])
    }

    /// Copies `N` bytes at the given offset into an array.
    #[inline]
    fn get_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.get_bytes(offset, N)?);
        Ok(out)
    }

    /// Reads a u8 at the given offset.
    #[inline(always)]
    fn get_u8(&self, offset: usize) -> Result<u8> {
        Ok(u8::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an i8 at the given offset.
    #[inline(always)]
    fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(i8::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads a u16 in little-endian at the given offset.
    #[inline(always)]
    fn get_u16_le(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an i16 in little-endian at the given offset.
    #[inline(always)]
    fn get_i16_le(&self, offset: usize) -> Result<i16> {
        Ok(i16::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads a u32 in little-endian at the given offset.
    #[inline(always)]
    fn get_u32_le(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an i32 in little-endian at the given offset.
    #[inline(always)]
    fn get_i32_le(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads a u64 in little-endian at the given offset.
    #[inline(always)]
    fn get_u64_le(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an i64 in little-endian at the given offset.
    #[inline(always)]
    fn get_i64_le(&self, offset: usize) -> Result<i64> {
        Ok(i64::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an f32 in little-endian at the given offset.
    #[inline(always)]
    fn get_f32_le(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.get_array(offset)?))
    }

    /// Reads an f64 in little-endian at the given offset.
    #[inline(always)]
    fn get_f64_le(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_le_bytes(self.get_array(offset)?))
    }
}

/// Trait for read-write buffer access with checked primitive writes.
///
/// Every `put_*` method returns the offset just past the written bytes, so
/// calls can be chained by threading the returned offset. A write that does
/// not fit leaves the buffer untouched.
pub trait WriteBuffer: ReadBuffer {
    /// Returns the buffer as a mutable byte slice.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Checks that `len` bytes starting at `offset` can be written.
    ///
    /// # Errors
    /// Returns [`Error::BufferOverrun`] if the range crosses the end.
    #[inline]
    fn ensure_writable(&self, offset: usize, len: usize) -> Result<()> {
        let size = self.len();
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::BufferOverrun {
                offset,
                required: len,
                len: size,
            }),
        }
    }

    /// Writes a byte slice at the given offset.
    ///
    /// # Arguments
    /// * `offset` - Byte offset to write to
    /// * `src` - Source bytes to copy
    #[inline]
    fn put_bytes(&mut self, offset: usize, src: &[u8]) -> Result<usize> {
        self.ensure_writable(offset, src.len())?;
        let end = offset + src.len();
        self.as_mut_slice()[offset..end].copy_from_slice(src);
        Ok(end)
    }

    /// Writes a u8 at the given offset.
    #[inline(always)]
    fn put_u8(&mut self, offset: usize, value: u8) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an i8 at the given offset.
    #[inline(always)]
    fn put_i8(&mut self, offset: usize, value: i8) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes a u16 in little-endian at the given offset.
    #[inline(always)]
    fn put_u16_le(&mut self, offset: usize, value: u16) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an i16 in little-endian at the given offset.
    #[inline(always)]
    fn put_i16_le(&mut self, offset: usize, value: i16) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes a u32 in little-endian at the given offset.
    #[inline(always)]
    fn put_u32_le(&mut self, offset: usize, value: u32) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an i32 in little-endian at the given offset.
    #[inline(always)]
    fn put_i32_le(&mut self, offset: usize, value: i32) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes a u64 in little-endian at the given offset.
    #[inline(always)]
    fn put_u64_le(&mut self, offset: usize, value: u64) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an i64 in little-endian at the given offset.
    #[inline(always)]
    fn put_i64_le(&mut self, offset: usize, value: i64) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an f32 in little-endian at the given offset.
    #[inline(always)]
    fn put_f32_le(&mut self, offset: usize, value: f32) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }

    /// Writes an f64 in little-endian at the given offset.
    #[inline(always)]
    fn put_f64_le(&mut self, offset: usize, value: f64) -> Result<usize> {
        self.put_bytes(offset, &value.to_le_bytes())
    }
}

impl ReadBuffer for [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl WriteBuffer for [u8] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> ReadBuffer for [u8; N] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> WriteBuffer for [u8; N] {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl ReadBuffer for Vec<u8> {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl WriteBuffer for Vec<u8> {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl ReadBuffer for Bytes {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl ReadBuffer for BytesMut {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl WriteBuffer for BytesMut {
    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

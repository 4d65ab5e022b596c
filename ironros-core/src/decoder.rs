//! Decoder table for ROS primitive types.
//!
//! This module provides the [`WireDecode`] trait, its implementations for
//! every primitive wire type, the generic [`decode_array`] and
//! [`decode_array_into`] combinators and the [`WireReader`] helper.
//!
//! Decoders read at the cursor position and advance the cursor by exactly
//! the number of bytes consumed. A failed decode leaves the cursor where it
//! was.

use crate::buffer::ReadBuffer;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::types::{Duration, Raw64, Time};

/// Trait for values that can be read from the ROS wire format.
pub trait WireDecode: Sized {
    /// Reads a value at the cursor and advances it.
    ///
    /// # Errors
    /// Returns [`Error::BufferUnderrun`] if the buffer ends early.
    fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self>;
}

macro_rules! impl_wire_decode_numeric {
    ($ty:ty, $get:ident) => {
        impl WireDecode for $ty {
            #[inline(always)]
            fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
                let value = buffer.$get(cursor.position())?;
                cursor.advance(std::mem::size_of::<$ty>());
                Ok(value)
            }
        }
    };
}

impl_wire_decode_numeric!(u8, get_u8);
impl_wire_decode_numeric!(i8, get_i8);
impl_wire_decode_numeric!(u16, get_u16_le);
impl_wire_decode_numeric!(i16, get_i16_le);
impl_wire_decode_numeric!(u32, get_u32_le);
impl_wire_decode_numeric!(i32, get_i32_le);
impl_wire_decode_numeric!(u64, get_u64_le);
impl_wire_decode_numeric!(i64, get_i64_le);
impl_wire_decode_numeric!(f32, get_f32_le);
impl_wire_decode_numeric!(f64, get_f64_le);

/// Any non-zero byte decodes as `true`.
impl WireDecode for bool {
    #[inline(always)]
    fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
        Ok(i8::decode(buffer, cursor)? != 0)
    }
}

impl WireDecode for String {
    fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
        let start = cursor.position();
        let len = buffer.get_u32_le(start)? as usize;
        let body = start + 4;
        let bytes = buffer.get_bytes(body, len)?;
        let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            offset: body + e.valid_up_to(),
        })?;
        cursor.advance(4 + len);
        Ok(text.to_owned())
    }
}

impl WireDecode for Raw64 {
    #[inline(always)]
    fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
        let bytes = buffer.get_array(cursor.position())?;
        cursor.advance(Self::ENCODED_LENGTH);
        Ok(Self(bytes))
    }
}

macro_rules! impl_wire_decode_secs_nsecs {
    ($ty:ident) => {
        impl WireDecode for $ty {
            #[inline]
            fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
                buffer.ensure_readable(cursor.position(), $ty::ENCODED_LENGTH)?;
                let secs = i32::decode(buffer, cursor)?;
                let nsecs = i32::decode(buffer, cursor)?;
                Ok($ty { secs, nsecs })
            }
        }
    };
}

impl_wire_decode_secs_nsecs!(Time);
impl_wire_decode_secs_nsecs!(Duration);

/// Fixed-length arrays are read as `N` elements back to back.
impl<T: WireDecode + Default, const N: usize> WireDecode for [T; N] {
    fn decode<B: ReadBuffer + ?Sized>(buffer: &B, cursor: &mut Cursor) -> Result<Self> {
        let mut out: [T; N] = std::array::from_fn(|_| T::default());
        decode_array_into(buffer, cursor, &mut out)?;
        Ok(out)
    }
}

/// Fills every slot of `out` in index order, decoding one element per slot.
///
/// The slot count is the element count; nothing is read from the wire to
/// determine it. On error the cursor is left where it was, although slots
/// before the failing element may already have been overwritten.
///
/// # Arguments
/// * `buffer` - Source buffer
/// * `cursor` - Read position, advanced past the array on success
/// * `out` - Container to fill
pub fn decode_array_into<T, B>(buffer: &B, cursor: &mut Cursor, out: &mut [T]) -> Result<()>
where
    T: WireDecode,
    B: ReadBuffer + ?Sized,
{
    tracing::trace!(len = out.len(), offset = cursor.position(), "decoding array");
    let mut scratch = Cursor::new(cursor.position());
    for slot in out.iter_mut() {
        *slot = T::decode(buffer, &mut scratch)?;
    }
    cursor.advance_to(scratch.position());
    Ok(())
}

/// Decodes `len` elements in index order into a new vector.
///
/// On error the cursor is left where it was.
pub fn decode_array<T, B>(buffer: &B, cursor: &mut Cursor, len: usize) -> Result<Vec<T>>
where
    T: WireDecode,
    B: ReadBuffer + ?Sized,
{
    tracing::trace!(len, offset = cursor.position(), "decoding array");
    // each element occupies at least one byte
    let mut values = Vec::with_capacity(len.min(cursor.remaining(buffer)));
    let mut scratch = Cursor::new(cursor.position());
    for _ in 0..len {
        values.push(T::decode(buffer, &mut scratch)?);
    }
    cursor.advance_to(scratch.position());
    Ok(values)
}

/// Helper for decoding a sequence of fields from one buffer.
///
/// Owns the traversal's [`Cursor`] so fields can be read in declaration
/// order without threading the cursor by hand.
#[derive(Debug)]
pub struct WireReader<'a, B: ReadBuffer + ?Sized> {
    buffer: &'a B,
    cursor: Cursor,
}

impl<'a, B: ReadBuffer + ?Sized> WireReader<'a, B> {
    /// Creates a reader starting at `offset`.
    #[must_use]
    pub fn new(buffer: &'a B, offset: usize) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(offset),
        }
    }

    /// Returns the underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &'a B {
        self.buffer
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining(self.buffer)
    }

    /// Returns a mutable handle to the cursor for use with free codec
    /// functions.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Decodes one value and advances.
    pub fn read<T: WireDecode>(&mut self) -> Result<T> {
        T::decode(self.buffer, &mut self.cursor)
    }

    /// Decodes `len` array elements and advances.
    pub fn read_array<T: WireDecode>(&mut self, len: usize) -> Result<Vec<T>> {
        decode_array(self.buffer, &mut self.cursor, len)
    }

    /// Fills `out` with array elements and advances.
    pub fn read_array_into<T: WireDecode>(&mut self, out: &mut [T]) -> Result<()> {
        decode_array_into(self.buffer, &mut self.cursor, out)
    }

    /// Consumes the reader and returns its cursor.
    #[must_use]
    pub fn into_cursor(self) -> Cursor {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{WireEncode, encode_array};

    #[test]
    fn test_decode_numeric() {
        let mut buf = [0u8; 32];
        let mut offset = (-3i16).encode(&mut buf, 0).unwrap();
        offset = 0xDEADBEEFu32.encode(&mut buf, offset).unwrap();
        offset = 2.5f32.encode(&mut buf, offset).unwrap();
        (-9_000_000_000i64).encode(&mut buf, offset).unwrap();

        let mut cursor = Cursor::default();
        assert_eq!(i16::decode(&buf, &mut cursor).unwrap(), -3);
        assert_eq!(cursor.position(), 2);
        assert_eq!(u32::decode(&buf, &mut cursor).unwrap(), 0xDEADBEEF);
        assert_eq!(cursor.position(), 6);
        assert_eq!(f32::decode(&buf, &mut cursor).unwrap(), 2.5);
        assert_eq!(cursor.position(), 10);
        assert_eq!(i64::decode(&buf, &mut cursor).unwrap(), -9_000_000_000);
        assert_eq!(cursor.position(), 18);
    }

    #[test]
    fn test_decode_bool_truthiness() {
        let buf = [0x00u8, 0x01, 0x02, 0xFF];
        let mut cursor = Cursor::default();
        assert!(!bool::decode(&buf, &mut cursor).unwrap());
        assert!(bool::decode(&buf, &mut cursor).unwrap());
        assert!(bool::decode(&buf, &mut cursor).unwrap());
        assert!(bool::decode(&buf, &mut cursor).unwrap());
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_decode_string() {
        let mut buf = [0u8; 16];
        "ros".encode(&mut buf, 1).unwrap();
        let mut cursor = Cursor::new(1);
        assert_eq!(String::decode(&buf, &mut cursor).unwrap(), "ros");
        assert_eq!(cursor.position(), 1 + 4 + 3);
    }

    #[test]
    fn test_decode_empty_string() {
        let buf = [0u8; 4];
        let mut cursor = Cursor::default();
        assert_eq!(String::decode(&buf, &mut cursor).unwrap(), "");
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_decode_string_truncated_body() {
        let mut buf = vec![10u8, 0, 0, 0];
        buf.extend_from_slice(b"short");
        let mut cursor = Cursor::default();
        assert_eq!(
            String::decode(&buf, &mut cursor),
            Err(Error::BufferUnderrun {
                offset: 4,
                required: 10,
                len: 9,
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_decode_string_invalid_utf8() {
        let buf = [3u8, 0, 0, 0, b'a', 0xFF, b'b'];
        let mut cursor = Cursor::default();
        assert_eq!(
            String::decode(&buf, &mut cursor),
            Err(Error::InvalidUtf8 { offset: 5 })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_decode_time_round_trip() {
        let mut buf = [0u8; 8];
        let time = Time::new(-5, 999_999_999);
        assert_eq!(time.encode(&mut buf, 0).unwrap(), 8);

        let mut cursor = Cursor::default();
        assert_eq!(Time::decode(&buf, &mut cursor).unwrap(), time);
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_decode_duration_underrun_keeps_cursor() {
        let buf = [0u8; 12];
        let mut cursor = Cursor::new(6);
        assert!(matches!(
            Duration::decode(&buf, &mut cursor),
            Err(Error::BufferUnderrun { offset: 6, .. })
        ));
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_decode_raw64() {
        let buf = [9u8, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut cursor = Cursor::new(1);
        let raw = Raw64::decode(&buf, &mut cursor).unwrap();
        assert_eq!(raw, Raw64::new([8, 7, 6, 5, 4, 3, 2, 1]));
        assert_eq!(cursor.position(), 9);
    }

    #[test]
    fn test_raw64_matches_numeric_layout() {
        let mut buf = [0u8; 8];
        0x0102030405060708u64.encode(&mut buf, 0).unwrap();
        let raw = Raw64::decode(&buf, &mut Cursor::default()).unwrap();
        assert_eq!(raw.as_bytes(), &0x0102030405060708u64.to_le_bytes());
    }

    #[test]
    fn test_decode_past_end() {
        let buf = [0u8; 3];
        let mut cursor = Cursor::default();
        assert!(matches!(
            u32::decode(&buf, &mut cursor),
            Err(Error::BufferUnderrun { .. })
        ));
        assert!(matches!(
            f64::decode(&buf, &mut cursor),
            Err(Error::BufferUnderrun { .. })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_decode_array_round_trip() {
        for len in 0..5usize {
            let values: Vec<i32> = (0..len as i32).map(|v| v * -7).collect();
            let mut buf = vec![0u8; 2 + len * 4];
            let end = encode_array(&values, &mut buf, 2).unwrap();
            assert_eq!(end, 2 + len * 4);

            let mut cursor = Cursor::new(2);
            let decoded: Vec<i32> = decode_array(&buf, &mut cursor, len).unwrap();
            assert_eq!(decoded, values);
            assert_eq!(cursor.position(), 2 + len * 4);
        }
    }

    #[test]
    fn test_decode_array_into_fills_container() {
        let mut buf = [0u8; 16];
        encode_array(&[Time::new(1, 2), Time::new(3, 4)], &mut buf, 0).unwrap();

        let mut out = [Time::default(); 2];
        let mut cursor = Cursor::default();
        decode_array_into(&buf, &mut cursor, &mut out).unwrap();
        assert_eq!(out, [Time::new(1, 2), Time::new(3, 4)]);
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn test_decode_array_failure_keeps_cursor() {
        let buf = [1u8, 0, 2, 0, 3];
        let mut cursor = Cursor::default();
        let result: Result<Vec<u16>> = decode_array(&buf, &mut cursor, 3);
        assert!(result.is_err());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_decode_array_huge_len_fails_cleanly() {
        let buf = [0u8; 4];
        let mut cursor = Cursor::default();
        let result: Result<Vec<u8>> = decode_array(&buf, &mut cursor, usize::MAX);
        assert!(matches!(result, Err(Error::BufferUnderrun { offset: 4, .. })));
    }

    #[test]
    fn test_decode_fixed_array() {
        let buf = [1u8, 2, 3];
        let mut cursor = Cursor::default();
        let out = <[u8; 3]>::decode(&buf, &mut cursor).unwrap();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn test_decode_string_array() {
        let mut buf = [0u8; 32];
        let end = encode_array(&["x", "", "yz"], &mut buf, 0).unwrap();
        let mut cursor = Cursor::default();
        let decoded: Vec<String> = decode_array(&buf, &mut cursor, 3).unwrap();
        assert_eq!(decoded, vec!["x", "", "yz"]);
        assert_eq!(cursor.position(), end);
    }

    #[test]
    fn test_wire_reader() {
        let mut buf = [0u8; 32];
        let mut offset = 42u32.encode(&mut buf, 0).unwrap();
        offset = "map".encode(&mut buf, offset).unwrap();
        offset = encode_array(&[1.0f64, -1.0], &mut buf, offset).unwrap();

        let mut reader = WireReader::new(&buf[..], 0);
        assert_eq!(reader.read::<u32>().unwrap(), 42);
        assert_eq!(reader.read::<String>().unwrap(), "map");
        assert_eq!(reader.read_array::<f64>(2).unwrap(), vec![1.0, -1.0]);
        assert_eq!(reader.position(), offset);
        assert_eq!(reader.remaining(), 32 - offset);
        assert!(reader.read_array::<u64>(2).is_err());
        assert_eq!(reader.into_cursor().position(), offset);
    }
}

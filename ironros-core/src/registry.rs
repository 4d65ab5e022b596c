//! Dispatch table from primitive type tags to their codecs.
//!
//! [`CodecTable`] is the entry point for callers that only learn field types
//! at runtime, such as a schema walker driven by a parsed message
//! definition. Each call selects the scalar codec for a [`PrimitiveType`] and
//! moves values in and out as [`Value`].

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::cursor::Cursor;
use crate::decoder::WireDecode;
use crate::encoder::WireEncode;
use crate::error::{Error, Result};
use crate::types::{Duration, PrimitiveType, Raw64, Time, WideIntMode};
use crate::value::Value;

/// Encoder and decoder table over every primitive type.
///
/// The table itself holds only configuration; it is cheap to copy and every
/// call is independent.
///
/// # Example
/// ```
/// use ironros_core::{CodecTable, Cursor, PrimitiveType, Value, WideIntMode};
///
/// let table = CodecTable::new(WideIntMode::Numeric);
/// let mut buf = [0u8; 16];
/// let end = table
///     .encode(PrimitiveType::String, &Value::from("map"), &mut buf, 0)
///     .unwrap();
/// assert_eq!(end, 7);
///
/// let mut cursor = Cursor::default();
/// let value = table.decode(PrimitiveType::String, &buf, &mut cursor).unwrap();
/// assert_eq!(value.as_str(), Some("map"));
/// assert_eq!(cursor.position(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecTable {
    wide_int_mode: WideIntMode,
}

impl CodecTable {
    /// Creates a table that decodes int64/uint64 fields according to `mode`.
    #[must_use]
    pub const fn new(wide_int_mode: WideIntMode) -> Self {
        Self { wide_int_mode }
    }

    /// Returns the configured 64-bit integer mode.
    #[must_use]
    pub const fn wide_int_mode(&self) -> WideIntMode {
        self.wide_int_mode
    }

    /// Returns a copy of the table using `mode` for 64-bit integers.
    #[must_use]
    pub const fn with_wide_int_mode(mut self, mode: WideIntMode) -> Self {
        self.wide_int_mode = mode;
        self
    }

    /// Encodes `value` as `ty` at `offset` and returns the advanced offset.
    ///
    /// [`Value::Array`] encodes each element as `ty`, back to back with no
    /// length prefix. For `int64` and `uint64`, both the native variant and
    /// [`Value::Raw64`] are accepted whatever the table's mode.
    ///
    /// # Errors
    /// - [`Error::TypeMismatch`] if the value (or any array element) is not
    ///   of type `ty`
    /// - [`Error::BufferOverrun`] if the encoding does not fit
    ///
    /// Nothing is written on error.
    pub fn encode<B: WriteBuffer + ?Sized>(
        &self,
        ty: PrimitiveType,
        value: &Value,
        buffer: &mut B,
        offset: usize,
    ) -> Result<usize> {
        match value {
            Value::Array(items) => {
                tracing::trace!(%ty, len = items.len(), offset, "encoding array");
                if let Some(item) = items.iter().find(|item| !accepts(ty, item)) {
                    return Err(mismatch(ty, item));
                }
                buffer.ensure_writable(offset, value.encoded_len())?;
                items
                    .iter()
                    .try_fold(offset, |offset, item| encode_scalar(ty, item, buffer, offset))
            }
            _ => encode_scalar(ty, value, buffer, offset),
        }
    }

    /// Decodes one `ty` value at the cursor.
    ///
    /// `int64` and `uint64` fields decode to [`Value::Int64`] and
    /// [`Value::Uint64`] in [`WideIntMode::Numeric`], and to
    /// [`Value::Raw64`] in [`WideIntMode::Raw`].
    ///
    /// # Errors
    /// Returns [`Error::BufferUnderrun`] or [`Error::InvalidUtf8`]; the
    /// cursor is left unchanged.
    pub fn decode<B: ReadBuffer + ?Sized>(
        &self,
        ty: PrimitiveType,
        buffer: &B,
        cursor: &mut Cursor,
    ) -> Result<Value> {
        let value = match ty {
            PrimitiveType::Bool => Value::Bool(bool::decode(buffer, cursor)?),
            PrimitiveType::Int8 => Value::Int8(i8::decode(buffer, cursor)?),
            PrimitiveType::Int16 => Value::Int16(i16::decode(buffer, cursor)?),
            PrimitiveType::Int32 => Value::Int32(i32::decode(buffer, cursor)?),
            PrimitiveType::Uint8 => Value::Uint8(u8::decode(buffer, cursor)?),
            PrimitiveType::Uint16 => Value::Uint16(u16::decode(buffer, cursor)?),
            PrimitiveType::Uint32 => Value::Uint32(u32::decode(buffer, cursor)?),
            PrimitiveType::Int64 | PrimitiveType::Uint64 => {
                self.decode_wide(ty, buffer, cursor)?
            }
            PrimitiveType::Float32 => Value::Float32(f32::decode(buffer, cursor)?),
            PrimitiveType::Float64 => Value::Float64(f64::decode(buffer, cursor)?),
            PrimitiveType::String => Value::String(String::decode(buffer, cursor)?),
            PrimitiveType::Time => Value::Time(Time::decode(buffer, cursor)?),
            PrimitiveType::Duration => Value::Duration(Duration::decode(buffer, cursor)?),
        };
        Ok(value)
    }

    fn decode_wide<B: ReadBuffer + ?Sized>(
        &self,
        ty: PrimitiveType,
        buffer: &B,
        cursor: &mut Cursor,
    ) -> Result<Value> {
        Ok(match (self.wide_int_mode, ty) {
            (WideIntMode::Raw, _) => Value::Raw64(Raw64::decode(buffer, cursor)?),
            (WideIntMode::Numeric, PrimitiveType::Uint64) => {
                Value::Uint64(u64::decode(buffer, cursor)?)
            }
            (WideIntMode::Numeric, _) => Value::Int64(i64::decode(buffer, cursor)?),
        })
    }

    /// Decodes `len` consecutive `ty` values into a [`Value::Array`].
    ///
    /// # Errors
    /// Fails on the first element that cannot be decoded. The cursor only
    /// advances if every element succeeds.
    pub fn decode_array<B: ReadBuffer + ?Sized>(
        &self,
        ty: PrimitiveType,
        buffer: &B,
        cursor: &mut Cursor,
        len: usize,
    ) -> Result<Value> {
        tracing::trace!(%ty, len, offset = cursor.position(), "decoding array");
        let mut scratch = Cursor::new(cursor.position());
        // strings need at least their 4-byte prefix
        let min_width = ty.fixed_size().unwrap_or(4);
        let mut items = Vec::with_capacity(len.min(scratch.remaining(buffer) / min_width));
        for _ in 0..len {
            items.push(self.decode(ty, buffer, &mut scratch)?);
        }
        cursor.advance_to(scratch.position());
        Ok(Value::Array(items))
    }

    /// Decodes `out.len()` consecutive `ty` values into `out`, in index order.
    ///
    /// # Errors
    /// Fails on the first element that cannot be decoded. The cursor is then
    /// left unchanged, while the contents of `out` are unspecified.
    pub fn decode_array_into<B: ReadBuffer + ?Sized>(
        &self,
        ty: PrimitiveType,
        buffer: &B,
        cursor: &mut Cursor,
        out: &mut [Value],
    ) -> Result<()> {
        tracing::trace!(%ty, len = out.len(), offset = cursor.position(), "decoding array");
        let mut scratch = Cursor::new(cursor.position());
        for slot in out.iter_mut() {
            *slot = self.decode(ty, buffer, &mut scratch)?;
        }
        cursor.advance_to(scratch.position());
        Ok(())
    }

    /// Encodes `value` as the type named `type_name`, such as `"uint8"` or
    /// its alias `"char"`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownType`] for unrecognized names, otherwise as
    /// [`CodecTable::encode`].
    pub fn encode_named<B: WriteBuffer + ?Sized>(
        &self,
        type_name: &str,
        value: &Value,
        buffer: &mut B,
        offset: usize,
    ) -> Result<usize> {
        self.encode(resolve(type_name)?, value, buffer, offset)
    }

    /// Decodes one value of the type named `type_name`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownType`] for unrecognized names, otherwise as
    /// [`CodecTable::decode`].
    pub fn decode_named<B: ReadBuffer + ?Sized>(
        &self,
        type_name: &str,
        buffer: &B,
        cursor: &mut Cursor,
    ) -> Result<Value> {
        self.decode(resolve(type_name)?, buffer, cursor)
    }
}

fn resolve(type_name: &str) -> Result<PrimitiveType> {
    type_name.parse().inspect_err(|err| {
        tracing::debug!(%err, "type lookup failed");
    })
}

const fn accepts(ty: PrimitiveType, value: &Value) -> bool {
    matches!(
        (ty, value),
        (PrimitiveType::Bool, Value::Bool(_))
            | (PrimitiveType::Int8, Value::Int8(_))
            | (PrimitiveType::Int16, Value::Int16(_))
            | (PrimitiveType::Int32, Value::Int32(_))
            | (PrimitiveType::Int64, Value::Int64(_))
            | (PrimitiveType::Uint8, Value::Uint8(_))
            | (PrimitiveType::Uint16, Value::Uint16(_))
            | (PrimitiveType::Uint32, Value::Uint32(_))
            | (PrimitiveType::Uint64, Value::Uint64(_))
            | (PrimitiveType::Int64 | PrimitiveType::Uint64, Value::Raw64(_))
            | (PrimitiveType::Float32, Value::Float32(_))
            | (PrimitiveType::Float64, Value::Float64(_))
            | (PrimitiveType::String, Value::String(_))
            | (PrimitiveType::Time, Value::Time(_))
            | (PrimitiveType::Duration, Value::Duration(_))
    )
}

fn mismatch(ty: PrimitiveType, value: &Value) -> Error {
    let err = Error::TypeMismatch {
        expected: ty.name(),
        actual: value.variant_name(),
    };
    tracing::debug!(%err, "rejected value");
    err
}

fn encode_scalar<B: WriteBuffer + ?Sized>(
    ty: PrimitiveType,
    value: &Value,
    buffer: &mut B,
    offset: usize,
) -> Result<usize> {
    match (ty, value) {
        (PrimitiveType::Bool, Value::Bool(v)) => v.encode(buffer, offset),
        (PrimitiveType::Int8, Value::Int8(v)) => v.encode(buffer, offset),
        (PrimitiveType::Int16, Value::Int16(v)) => v.encode(buffer, offset),
        (PrimitiveType::Int32, Value::Int32(v)) => v.encode(buffer, offset),
        (PrimitiveType::Int64, Value::Int64(v)) => v.encode(buffer, offset),
        (PrimitiveType::Uint8, Value::Uint8(v)) => v.encode(buffer, offset),
        (PrimitiveType::Uint16, Value::Uint16(v)) => v.encode(buffer, offset),
        (PrimitiveType::Uint32, Value::Uint32(v)) => v.encode(buffer, offset),
        (PrimitiveType::Uint64, Value::Uint64(v)) => v.encode(buffer, offset),
        (PrimitiveType::Int64 | PrimitiveType::Uint64, Value::Raw64(v)) => {
            v.encode(buffer, offset)
        }
        (PrimitiveType::Float32, Value::Float32(v)) => v.encode(buffer, offset),
        (PrimitiveType::Float64, Value::Float64(v)) => v.encode(buffer, offset),
        (PrimitiveType::String, Value::String(v)) => v.encode(buffer, offset),
        (PrimitiveType::Time, Value::Time(v)) => v.encode(buffer, offset),
        (PrimitiveType::Duration, Value::Duration(v)) => v.encode(buffer, offset),
        _ => Err(mismatch(ty, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(table: &CodecTable, ty: PrimitiveType, value: Value) -> Value {
        let mut buf = vec![0u8; 64];
        let end = table.encode(ty, &value, &mut buf, 0).unwrap();
        assert_eq!(end, value.encoded_len());
        let mut cursor = Cursor::default();
        let decoded = table.decode(ty, &buf, &mut cursor).unwrap();
        assert_eq!(cursor.position(), end);
        decoded
    }

    fn sample(ty: PrimitiveType) -> Value {
        match ty {
            PrimitiveType::Bool => Value::Bool(true),
            PrimitiveType::Int8 => Value::Int8(-128),
            PrimitiveType::Int16 => Value::Int16(-12_345),
            PrimitiveType::Int32 => Value::Int32(i32::MIN),
            PrimitiveType::Int64 => Value::Int64(-9_007_199_254_740_993),
            PrimitiveType::Uint8 => Value::Uint8(255),
            PrimitiveType::Uint16 => Value::Uint16(65_535),
            PrimitiveType::Uint32 => Value::Uint32(4_000_000_000),
            PrimitiveType::Uint64 => Value::Uint64(u64::MAX - 1),
            PrimitiveType::Float32 => Value::Float32(-1.5),
            PrimitiveType::Float64 => Value::Float64(std::f64::consts::PI),
            PrimitiveType::String => Value::from("base_link"),
            PrimitiveType::Time => Value::Time(Time::new(-5, 999_999_999)),
            PrimitiveType::Duration => Value::Duration(Duration::new(-1, 500)),
        }
    }

    #[test]
    fn test_table_round_trip_every_type() {
        let table = CodecTable::new(WideIntMode::Numeric);
        for ty in PrimitiveType::ALL {
            let value = sample(ty);
            assert_eq!(round_trip(&table, ty, value.clone()), value, "{ty}");
        }
    }

    #[test]
    fn test_table_fixed_sizes_match_encoding() {
        let table = CodecTable::new(WideIntMode::Numeric);
        for ty in PrimitiveType::ALL {
            if let Some(size) = ty.fixed_size() {
                let mut buf = [0u8; 8];
                assert_eq!(table.encode(ty, &sample(ty), &mut buf, 0).unwrap(), size);
            }
        }
    }

    #[test]
    fn test_table_raw_mode_decodes_opaque_bytes() {
        let table = CodecTable::new(WideIntMode::Raw);
        let raw = Raw64::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        for ty in [PrimitiveType::Int64, PrimitiveType::Uint64] {
            assert_eq!(round_trip(&table, ty, Value::Raw64(raw)), Value::Raw64(raw));
        }

        // native values are still accepted when encoding
        let decoded = round_trip(&table, PrimitiveType::Uint64, Value::Uint64(1));
        assert_eq!(decoded, Value::Raw64(Raw64::new([1, 0, 0, 0, 0, 0, 0, 0])));
    }

    #[test]
    fn test_table_numeric_mode_accepts_raw_operand() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let raw = Raw64::new((-2i64).to_le_bytes());
        assert_eq!(round_trip(&table, PrimitiveType::Int64, Value::Raw64(raw)), Value::Int64(-2));
    }

    #[test]
    fn test_table_with_wide_int_mode() {
        let table = CodecTable::new(WideIntMode::Numeric).with_wide_int_mode(WideIntMode::Raw);
        assert_eq!(table.wide_int_mode(), WideIntMode::Raw);
    }

    #[test]
    fn test_table_bool_decoding() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let mut buf = [0xAAu8; 2];
        table.encode(PrimitiveType::Bool, &Value::Bool(true), &mut buf, 0).unwrap();
        table.encode(PrimitiveType::Bool, &Value::Bool(false), &mut buf, 1).unwrap();
        assert_eq!(buf, [0x01, 0x00]);

        let mut cursor = Cursor::default();
        let value = table.decode(PrimitiveType::Bool, &[0x02u8], &mut cursor).unwrap();
        assert_eq!(value, Value::Bool(true));
    }

    #[test]
    fn test_table_type_mismatch() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let mut buf = [0u8; 8];
        let err = table
            .encode(PrimitiveType::Uint32, &Value::Int32(1), &mut buf, 0)
            .unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "uint32",
                actual: "Int32",
            }
        );
        assert!(matches!(
            table.encode(PrimitiveType::Time, &Value::Duration(Duration::default()), &mut buf, 0),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(buf, [0u8; 8]);
    }

    #[test]
    fn test_table_array_round_trip() {
        let table = CodecTable::new(WideIntMode::Numeric);
        for len in 0..6u16 {
            let value = Value::from((0..len).map(|i| i * 300).collect::<Vec<u16>>());
            let mut buf = [0u8; 16];
            let end = table.encode(PrimitiveType::Uint16, &value, &mut buf, 2).unwrap();
            assert_eq!(end, 2 + 2 * usize::from(len));

            let mut cursor = Cursor::new(2);
            let decoded = table
                .decode_array(PrimitiveType::Uint16, &buf, &mut cursor, usize::from(len))
                .unwrap();
            assert_eq!(decoded, value);
            assert_eq!(cursor.position(), end);
        }
    }

    #[test]
    fn test_table_array_of_strings() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let value = Value::from(vec!["odom", "", "map"]);
        let mut buf = [0u8; 32];
        let end = table.encode(PrimitiveType::String, &value, &mut buf, 0).unwrap();
        assert_eq!(end, 8 + 4 + 7);

        let mut cursor = Cursor::default();
        let mut out = vec![Value::Bool(false); 3];
        table
            .decode_array_into(PrimitiveType::String, &buf, &mut cursor, &mut out)
            .unwrap();
        assert_eq!(Value::Array(out), value);
        assert_eq!(cursor.position(), end);
    }

    #[test]
    fn test_table_array_mismatch_writes_nothing() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let value = Value::Array(vec![Value::Int8(1), Value::Int8(2), Value::Uint8(3)]);
        let mut buf = [0u8; 4];
        let err = table.encode(PrimitiveType::Int8, &value, &mut buf, 0).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { actual: "Uint8", .. }));
        assert_eq!(buf, [0u8; 4]);

        let nested = Value::Array(vec![Value::from(vec![1i8])]);
        assert!(table.encode(PrimitiveType::Int8, &nested, &mut buf, 0).is_err());
    }

    #[test]
    fn test_table_array_overrun_writes_nothing() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let value = Value::from(vec![1u32, 2, 3]);
        let mut buf = [0u8; 10];
        let err = table.encode(PrimitiveType::Uint32, &value, &mut buf, 0).unwrap_err();
        assert_eq!(
            err,
            Error::BufferOverrun {
                offset: 0,
                required: 12,
                len: 10,
            }
        );
        assert_eq!(buf, [0u8; 10]);
    }

    #[test]
    fn test_table_decode_array_failure_keeps_cursor() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let buf = [0u8; 12];
        let mut cursor = Cursor::new(4);
        let err = table
            .decode_array(PrimitiveType::Time, &buf, &mut cursor, 2)
            .unwrap_err();
        assert!(matches!(err, Error::BufferUnderrun { offset: 12, .. }));
        assert_eq!(cursor.position(), 4);

        let mut out = vec![Value::Int32(0); 4];
        assert!(
            table
                .decode_array_into(PrimitiveType::Int32, &buf, &mut cursor, &mut out)
                .is_err()
        );
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_table_decode_underrun() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let mut cursor = Cursor::new(1);
        let err = table
            .decode(PrimitiveType::Float64, &[0u8; 8], &mut cursor)
            .unwrap_err();
        assert_eq!(
            err,
            Error::BufferUnderrun {
                offset: 1,
                required: 8,
                len: 8,
            }
        );
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_table_cursor_is_sum_of_widths() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let fields = [
            (PrimitiveType::Uint32, Value::Uint32(7)),
            (PrimitiveType::Time, Value::Time(Time::new(1, 2))),
            (PrimitiveType::String, Value::from("laser")),
            (PrimitiveType::Bool, Value::Bool(true)),
            (PrimitiveType::Float64, Value::Float64(0.25)),
        ];
        let mut buf = [0u8; 64];
        let end = fields.iter().try_fold(0, |offset, (ty, value)| {
            table.encode(*ty, value, &mut buf, offset)
        });
        assert_eq!(end.unwrap(), 4 + 8 + 9 + 1 + 8);

        let mut cursor = Cursor::default();
        for (ty, value) in &fields {
            assert_eq!(&table.decode(*ty, &buf, &mut cursor).unwrap(), value);
        }
        assert_eq!(cursor.position(), 30);
    }

    #[test]
    fn test_table_named_lookup_and_aliases() {
        let table = CodecTable::new(WideIntMode::Numeric);
        let mut buf = [0u8; 2];
        let end = table.encode_named("char", &Value::Uint8(b'A'), &mut buf, 0).unwrap();
        let end = table.encode_named("byte", &Value::Int8(-1), &mut buf, end).unwrap();
        assert_eq!(end, 2);
        assert_eq!(buf, [0x41, 0xFF]);

        let mut cursor = Cursor::default();
        assert_eq!(table.decode_named("char", &buf, &mut cursor).unwrap(), Value::Uint8(0x41));
        assert_eq!(table.decode_named("byte", &buf, &mut cursor).unwrap(), Value::Int8(-1));

        let err = table.decode_named("float16", &buf, &mut cursor).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownType {
                name: "float16".to_string(),
            }
        );
        assert!(matches!(
            table.encode_named("header", &Value::Bool(true), &mut buf, 0),
            Err(Error::UnknownType { .. })
        ));
    }
}

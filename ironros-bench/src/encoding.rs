//! Message fixtures and field walkers shared by the codec benchmarks.

use ironros_core::{
    CodecTable, Cursor, Duration, PrimitiveType, ReadBuffer, Result, Time, Value, WriteBuffer,
};

/// Number of range readings in [`scan_fields`].
pub const SCAN_RANGES: usize = 360;

/// Builds the fields of a laser-scan-like message, in schema order.
#[must_use]
pub fn scan_fields() -> Vec<(PrimitiveType, Value)> {
    let ranges = (0..SCAN_RANGES).map(|i| i as f32 * 0.01).collect::<Vec<_>>();
    vec![
        (PrimitiveType::Uint32, Value::Uint32(1)),
        (PrimitiveType::Time, Value::Time(Time::new(1_700_000_000, 0))),
        (PrimitiveType::String, Value::from("base_scan")),
        (PrimitiveType::Float32, Value::Float32(-2.35)),
        (PrimitiveType::Float32, Value::Float32(2.35)),
        (PrimitiveType::Duration, Value::Duration(Duration::from_nanos(25_000_000))),
        (PrimitiveType::Float32, Value::from(ranges)),
        (PrimitiveType::Int64, Value::Int64(-1)),
    ]
}

/// Returns the encoded size of `fields`.
#[must_use]
pub fn encoded_len(fields: &[(PrimitiveType, Value)]) -> usize {
    fields.iter().map(|(_, value)| value.encoded_len()).sum()
}

/// Encodes `fields` back to back from offset zero.
///
/// # Errors
/// Propagates the first field error.
pub fn encode_fields<B: WriteBuffer + ?Sized>(
    table: &CodecTable,
    fields: &[(PrimitiveType, Value)],
    buffer: &mut B,
) -> Result<usize> {
    fields
        .iter()
        .try_fold(0, |offset, (ty, value)| table.encode(*ty, value, buffer, offset))
}

/// Decodes a message laid out like `fields`, using their array lengths.
///
/// # Errors
/// Propagates the first field error.
pub fn decode_fields<B: ReadBuffer + ?Sized>(
    table: &CodecTable,
    fields: &[(PrimitiveType, Value)],
    buffer: &B,
) -> Result<Vec<Value>> {
    let mut cursor = Cursor::default();
    fields
        .iter()
        .map(|(ty, value)| match value.as_array() {
            Some(items) => table.decode_array(*ty, buffer, &mut cursor, items.len()),
            None => table.decode(*ty, buffer, &mut cursor),
        })
        .collect()
}

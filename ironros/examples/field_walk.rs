//! Example schema walker encoding and decoding a laser-scan-like message.
//!
//! Run with: `cargo run --example field_walk`
//!
//! Set `IRONROS_WIDE_INT=raw` to surface 64-bit fields as opaque bytes, and
//! `RUST_LOG=trace` to see the codec's own logging.

use ironros::prelude::*;

/// One field of a message definition: name, ROS type name, fixed array length.
struct Field {
    name: &'static str,
    type_name: &'static str,
    array_len: Option<usize>,
}

const fn field(name: &'static str, type_name: &'static str) -> Field {
    Field {
        name,
        type_name,
        array_len: None,
    }
}

const fn array(name: &'static str, type_name: &'static str, len: usize) -> Field {
    Field {
        name,
        type_name,
        array_len: Some(len),
    }
}

const SCHEMA: [Field; 8] = [
    field("seq", "uint32"),
    field("stamp", "time"),
    field("frame_id", "string"),
    field("angle_min", "float32"),
    field("scan_time", "duration"),
    array("ranges", "float32", 4),
    array("flags", "byte", 2),
    field("sensor_id", "uint64"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mode = std::env::var("IRONROS_WIDE_INT")
        .ok()
        .and_then(|name| WideIntMode::parse(&name))
        .unwrap_or(WideIntMode::Numeric);
    let table = CodecTable::new(mode);
    tracing::info!(mode = mode.name(), "codec table ready");

    let values = [
        Value::Uint32(42),
        Value::Time(Time::new(1_700_000_000, 250_000_000)),
        Value::from("laser"),
        Value::Float32(-1.57),
        Value::Duration(Duration::from_nanos(100_000_000)),
        Value::from(vec![0.5f32, 1.25, 2.0, 8.75]),
        Value::from(vec![-1i8, 3]),
        Value::Uint64(0x0102_0304_0506_0708),
    ];

    let size: usize = values.iter().map(Value::encoded_len).sum();
    let mut buf = vec![0u8; size];

    let mut offset = 0;
    for (field, value) in SCHEMA.iter().zip(&values) {
        offset = table.encode_named(field.type_name, value, &mut buf, offset)?;
    }
    println!("Encoded {} fields into {} bytes", SCHEMA.len(), offset);

    let mut cursor = Cursor::default();
    for field in &SCHEMA {
        let ty: PrimitiveType = field.type_name.parse()?;
        let value = match field.array_len {
            Some(len) => table.decode_array(ty, &buf, &mut cursor, len)?,
            None => table.decode(ty, &buf, &mut cursor)?,
        };
        println!("{:>10} @ {:>3}: {:?}", field.name, cursor.position(), value);
    }

    // a truncated buffer is reported, never read past
    let truncated = &buf[..offset - 3];
    let mut cursor = Cursor::default();
    for field in &SCHEMA {
        let ty: PrimitiveType = field.type_name.parse()?;
        let decoded = match field.array_len {
            Some(len) => table.decode_array(ty, truncated, &mut cursor, len),
            None => table.decode(ty, truncated, &mut cursor),
        };
        if let Err(e) = decoded {
            println!("Stopped at '{}' (offset {}): {}", field.name, cursor.position(), e);
            break;
        }
    }

    Ok(())
}

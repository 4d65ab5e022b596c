//! # IronROS
//!
//! Encoding and decoding of ROS message primitives for Rust.
//!
//! IronROS implements the little-endian wire format ROS uses for message
//! fields: fixed-width numbers, length-prefixed strings, `time` and
//! `duration`, and fixed-length arrays of any of them. Message layout is left
//! to the caller, which walks its schema and invokes one codec per field.
//!
//! ## Features
//!
//! - **Bounds-checked buffers** - Every read and write returns a `Result`
//! - **Static and dynamic dispatch** - [`WireEncode`]/[`WireDecode`] for
//!   typed code, [`CodecTable`] for schema-driven walkers
//! - **Two 64-bit paths** - Native integers or opaque legacy byte sequences
//!
//! ## Quick Start
//!
//! ```
//! use ironros::prelude::*;
//!
//! let mut buf = [0u8; 32];
//! let mut writer = WireWriter::new(&mut buf[..], 0);
//! writer.write(&7u32).unwrap();
//! writer.write(&Time::new(12, 500)).unwrap();
//! writer.write("base_link").unwrap();
//! let end = writer.finish();
//!
//! let table = CodecTable::new(WideIntMode::Numeric);
//! let mut cursor = Cursor::default();
//! let seq = table.decode(PrimitiveType::Uint32, &buf, &mut cursor).unwrap();
//! assert_eq!(seq.as_u64(), Some(7));
//! # let _ = end;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Buffer traits, cursor, primitive codecs and the codec table

pub mod prelude;

/// Core types and traits for ROS wire encoding/decoding.
pub mod core {
    pub use ironros_core::*;
}

// Re-export commonly used items at the crate root
pub use ironros_core::{
    buffer::{ReadBuffer, WriteBuffer},
    cursor::Cursor,
    decoder::{WireDecode, WireReader},
    encoder::{WireEncode, WireWriter},
    error::{Error, Result},
    registry::CodecTable,
    types::{Duration, PrimitiveType, Raw64, Time, WideIntMode},
    value::Value,
};

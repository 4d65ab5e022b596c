//! # IronROS Core
//!
//! Primitive codecs for the ROS message wire format.
//!
//! This crate provides:
//! - Bounds-checked buffer traits for reading and writing little-endian data
//! - The [`Cursor`] threaded through successive field operations
//! - Primitive type tags and the `time`, `duration` and raw 64-bit value types
//! - [`WireEncode`] / [`WireDecode`] implementations for every primitive type,
//!   with generic array combinators
//! - [`CodecTable`], a runtime dispatch table keyed by [`PrimitiveType`]
//! - Error types for encoding/decoding operations

pub mod buffer;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod types;
pub mod value;

pub use buffer::{ReadBuffer, WriteBuffer};
pub use cursor::Cursor;
pub use decoder::{WireDecode, WireReader, decode_array, decode_array_into};
pub use encoder::{WireEncode, WireWriter, array_encoded_len, encode_array, encode_raw64};
pub use error::{Error, Result};
pub use registry::CodecTable;
pub use types::{Duration, PrimitiveType, Raw64, Time, WideIntMode};
pub use value::Value;

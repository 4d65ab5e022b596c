//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use ironros::prelude::*;
//! ```

// Buffers and position
pub use ironros_core::buffer::{ReadBuffer, WriteBuffer};
pub use ironros_core::cursor::Cursor;

// Static codecs
pub use ironros_core::decoder::{WireDecode, WireReader, decode_array, decode_array_into};
pub use ironros_core::encoder::{WireEncode, WireWriter, encode_array, encode_raw64};
pub use ironros_core::error::{Error as CoreError, Result as CoreResult};

// Dynamic dispatch
pub use ironros_core::registry::CodecTable;
pub use ironros_core::types::{Duration, PrimitiveType, Raw64, Time, WideIntMode};
pub use ironros_core::value::Value;

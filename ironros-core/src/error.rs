//! Error types for IronROS core operations.

use thiserror::Error;

/// Core error type for IronROS codec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A legacy 64-bit integer operand was not an 8-byte sequence.
    #[error("invalid {type_name} operand: expected {expected} bytes, got {actual}")]
    InvalidOperand {
        /// Wire type name the operand was supplied for.
        type_name: &'static str,
        /// Required operand length in bytes.
        expected: usize,
        /// Supplied operand length in bytes.
        actual: usize,
    },

    /// A decode would read past the end of the buffer.
    #[error(
        "buffer underrun: reading {required} bytes at offset {offset} exceeds buffer of {len} bytes"
    )]
    BufferUnderrun {
        /// Offset the read started at.
        offset: usize,
        /// Number of bytes the read needed.
        required: usize,
        /// Total buffer length in bytes.
        len: usize,
    },

    /// An encode would write past the end of the buffer.
    #[error(
        "buffer overrun: writing {required} bytes at offset {offset} exceeds buffer of {len} bytes"
    )]
    BufferOverrun {
        /// Offset the write started at.
        offset: usize,
        /// Number of bytes the write needed.
        required: usize,
        /// Total buffer length in bytes.
        len: usize,
    },

    /// A dynamic value does not match the requested wire type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Wire type name requested by the caller.
        expected: &'static str,
        /// Variant name of the supplied value.
        actual: &'static str,
    },

    /// A type tag name is not part of the primitive set.
    #[error("unknown primitive type '{name}'")]
    UnknownType {
        /// The unrecognized name.
        name: String,
    },

    /// Decoded string bytes are not valid text.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where the invalid sequence starts.
        offset: usize,
    },

    /// A string is too long for its 4-byte length prefix.
    #[error("string of {len} bytes does not fit a u32 length prefix")]
    LengthOverflow {
        /// Length of the rejected string in bytes.
        len: usize,
    },
}

/// Result type alias for IronROS core operations.
pub type Result<T> = std::result::Result<T, Error>;

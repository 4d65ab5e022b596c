//! Primitive type tags and composite value types for the ROS wire format.
//!
//! This module maps ROS message primitive types to Rust types and defines
//! the fixed-layout values that have no native Rust counterpart:
//! [`Time`], [`Duration`] and the opaque [`Raw64`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// ROS primitive type enumeration.
///
/// `char` and `byte` are not separate tags: they resolve to [`Self::Uint8`]
/// and [`Self::Int8`] in [`Self::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean stored as one byte.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Length-prefixed byte string.
    String,
    /// Point in time, `secs` + `nsecs`.
    Time,
    /// Signed span of time, `secs` + `nsecs`.
    Duration,
}

impl PrimitiveType {
    /// Every primitive type tag, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::Time,
        Self::Duration,
    ];

    /// Returns the encoded size in bytes, or `None` for variable-length types.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 | Self::Time | Self::Duration => Some(8),
            Self::String => None,
        }
    }

    /// Returns the ROS type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Time => "time",
            Self::Duration => "duration",
        }
    }

    /// Parses a primitive type from its ROS name, including the
    /// `char` and `byte` aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "int8" | "byte" => Some(Self::Int8),
            "int16" => Some(Self::Int16),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint8" | "char" => Some(Self::Uint8),
            "uint16" => Some(Self::Uint16),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "float32" => Some(Self::Float32),
            "float64" => Some(Self::Float64),
            "string" => Some(Self::String),
            "time" => Some(Self::Time),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true for the 64-bit integer types, whose decoded form
    /// depends on [`WideIntMode`].
    #[must_use]
    pub const fn is_wide_int(&self) -> bool {
        matches!(self, Self::Int64 | Self::Uint64)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownType {
            name: s.to_string(),
        })
    }
}

/// How 64-bit integer fields are surfaced when decoded.
///
/// Both modes read and write the same eight little-endian bytes; they only
/// differ in the value handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WideIntMode {
    /// Decode to native `i64` / `u64`.
    Numeric,
    /// Decode to an opaque [`Raw64`] byte sequence (legacy behavior).
    Raw,
}

impl WideIntMode {
    /// Parses a mode from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "numeric" | "native" => Some(Self::Numeric),
            "raw" | "legacy" | "bytes" => Some(Self::Raw),
            _ => None,
        }
    }

    /// Returns the canonical name of the mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Raw => "raw",
        }
    }
}

/// Opaque 8-byte value carried by the legacy int64/uint64 path.
///
/// The bytes are copied to and from the wire verbatim and never interpreted
/// as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Raw64(pub [u8; 8]);

impl Raw64 {
    /// Encoded length in bytes.
    pub const ENCODED_LENGTH: usize = 8;

    /// Type name reported in [`Error::InvalidOperand`].
    pub const TYPE_NAME: &'static str = "int64/uint64";

    /// Creates a raw value from eight bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for Raw64 {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Raw64 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 8] = bytes.try_into().map_err(|_| Error::InvalidOperand {
            type_name: Self::TYPE_NAME,
            expected: Self::ENCODED_LENGTH,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Raw64 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// ROS `time`: seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    /// Whole seconds.
    pub secs: i32,
    /// Nanoseconds past `secs`.
    pub nsecs: i32,
}

impl Time {
    /// Encoded length in bytes.
    pub const ENCODED_LENGTH: usize = 8;

    /// Creates a time value.
    #[must_use]
    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }

    /// Creates a time value from the system clock.
    ///
    /// Seconds are truncated to 32 bits.
    #[must_use]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            secs: elapsed.as_secs() as i32,
            nsecs: elapsed.subsec_nanos() as i32,
        }
    }

    /// Returns the total value in nanoseconds.
    #[must_use]
    pub const fn to_nanos(&self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }
}

/// ROS `duration`: a signed span of seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    /// Whole seconds.
    pub secs: i32,
    /// Nanoseconds past `secs`.
    pub nsecs: i32,
}

impl Duration {
    /// Encoded length in bytes.
    pub const ENCODED_LENGTH: usize = 8;

    /// Creates a duration value.
    #[must_use]
    pub const fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }

    /// Creates a duration from nanoseconds, keeping `nsecs` in
    /// `0..1_000_000_000`. Seconds are truncated to 32 bits.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            secs: nanos.div_euclid(NANOS_PER_SEC) as i32,
            nsecs: nanos.rem_euclid(NANOS_PER_SEC) as i32,
        }
    }

    /// Returns the total value in nanoseconds.
    #[must_use]
    pub const fn to_nanos(&self) -> i64 {
        self.secs as i64 * NANOS_PER_SEC + self.nsecs as i64
    }
}

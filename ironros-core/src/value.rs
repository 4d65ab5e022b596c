//! Dynamically typed field values for schema-driven encoding.
//!
//! A schema walker that only knows field types at runtime carries values as
//! [`Value`] and hands them to the [`CodecTable`](crate::registry::CodecTable)
//! together with the field's [`PrimitiveType`].

use crate::encoder::WireEncode;
use crate::types::{Duration, PrimitiveType, Raw64, Time};

/// A primitive value, or a homogeneous array of them.
///
/// 64-bit integers come in two shapes: the native `Int64`/`Uint64`
/// variants and the opaque [`Value::Raw64`] byte sequence. Both are accepted
/// for `int64` and `uint64` fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Raw64(Raw64),
    Float32(f32),
    Float64(f64),
    String(String),
    Time(Time),
    Duration(Duration),
    Array(Vec<Value>),
}

impl Value {
    /// Returns the wire type this value encodes as, or `None` for arrays.
    ///
    /// [`Value::Raw64`] reports `Uint64`; it encodes identically for
    /// `int64`.
    #[must_use]
    pub const fn primitive_type(&self) -> Option<PrimitiveType> {
        Some(match self {
            Value::Bool(_) => PrimitiveType::Bool,
            Value::Int8(_) => PrimitiveType::Int8,
            Value::Int16(_) => PrimitiveType::Int16,
            Value::Int32(_) => PrimitiveType::Int32,
            Value::Int64(_) => PrimitiveType::Int64,
            Value::Uint8(_) => PrimitiveType::Uint8,
            Value::Uint16(_) => PrimitiveType::Uint16,
            Value::Uint32(_) => PrimitiveType::Uint32,
            Value::Uint64(_) | Value::Raw64(_) => PrimitiveType::Uint64,
            Value::Float32(_) => PrimitiveType::Float32,
            Value::Float64(_) => PrimitiveType::Float64,
            Value::String(_) => PrimitiveType::String,
            Value::Time(_) => PrimitiveType::Time,
            Value::Duration(_) => PrimitiveType::Duration,
            Value::Array(_) => return None,
        })
    }

    /// Returns the number of bytes this value occupies on the wire.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::Bool(v) => v.encoded_len(),
            Value::Int8(v) => v.encoded_len(),
            Value::Int16(v) => v.encoded_len(),
            Value::Int32(v) => v.encoded_len(),
            Value::Int64(v) => v.encoded_len(),
            Value::Uint8(v) => v.encoded_len(),
            Value::Uint16(v) => v.encoded_len(),
            Value::Uint32(v) => v.encoded_len(),
            Value::Uint64(v) => v.encoded_len(),
            Value::Raw64(v) => v.encoded_len(),
            Value::Float32(v) => v.encoded_len(),
            Value::Float64(v) => v.encoded_len(),
            Value::String(v) => v.encoded_len(),
            Value::Time(v) => v.encoded_len(),
            Value::Duration(v) => v.encoded_len(),
            Value::Array(items) => items.iter().map(Value::encoded_len).sum(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            Value::Uint8(v) => Some(i64::from(*v)),
            Value::Uint16(v) => Some(i64::from(*v)),
            Value::Uint32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint8(v) => Some(u64::from(*v)),
            Value::Uint16(v) => Some(u64::from(*v)),
            Value::Uint32(v) => Some(u64::from(*v)),
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(v) => Some(f64::from(*v)),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_raw64(&self) -> Option<&Raw64> {
        match self {
            Value::Raw64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Time> {
        match self {
            Value::Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the variant name, used in type mismatch errors.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Uint8(_) => "Uint8",
            Value::Uint16(_) => "Uint16",
            Value::Uint32(_) => "Uint32",
            Value::Uint64(_) => "Uint64",
            Value::Raw64(_) => "Raw64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Time(_) => "Time",
            Value::Duration(_) => "Duration",
            Value::Array(_) => "Array",
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_value_from!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Raw64 => Raw64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Time => Time,
    Duration => Duration,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

//! Validation layer
//!
//! Composable precondition checks run before any unchecked write.
//!
//! ## Rules per operation
//! - unsigned byte: number, >= 0, < 2^8
//! - vint:          number, >= 0, < 2^31
//! - vlong:         number, >= 0, < 2^53
//! - object:        not null
//! - string:        string or null
//! - raw bytes:     not null

use bytes::Bytes;

use crate::codec::Object;
use crate::error::ValidationError;

/// Exclusive upper bound of a narrow varint
pub const MAX_VINT: i64 = 1 << 31;

/// Exclusive upper bound of a wide varint
pub const MAX_VLONG: i64 = 1 << 53;

/// A field value handed to the validated encoders
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Bytes(Bytes),
    Object(Object),
}

/// A named predicate over a [`Value`]
#[derive(Clone, Copy)]
pub struct Validator {
    /// Reported when the predicate fails
    pub rule: ValidationError,

    pub predicate: fn(&Value) -> bool,
}

pub const NOT_NULL: Validator = Validator {
    rule: ValidationError::Null,
    predicate: is_present,
};

pub const NUMBER: Validator = Validator {
    rule: ValidationError::NotNumber,
    predicate: is_number,
};

pub const NON_NEGATIVE: Validator = Validator {
    rule: ValidationError::Negative,
    predicate: is_non_negative,
};

pub const BELOW_2_8: Validator = Validator {
    rule: ValidationError::ByteTooBig,
    predicate: is_below_2_8,
};

pub const BELOW_2_31: Validator = Validator {
    rule: ValidationError::IntTooBig,
    predicate: is_below_2_31,
};

pub const BELOW_2_53: Validator = Validator {
    rule: ValidationError::LongTooBig,
    predicate: is_below_2_53,
};

pub const STRING_OR_NULL: Validator = Validator {
    rule: ValidationError::NotStringOrNull,
    predicate: is_string_or_null,
};

fn is_present(v: &Value) -> bool {
    !matches!(v, Value::Null)
}

fn is_number(v: &Value) -> bool {
    matches!(v, Value::Int(_))
}

fn is_non_negative(v: &Value) -> bool {
    matches!(v, Value::Int(n) if *n >= 0)
}

fn is_below_2_8(v: &Value) -> bool {
    matches!(v, Value::Int(n) if *n < 256)
}

fn is_below_2_31(v: &Value) -> bool {
    matches!(v, Value::Int(n) if *n < MAX_VINT)
}

fn is_below_2_53(v: &Value) -> bool {
    matches!(v, Value::Int(n) if *n < MAX_VLONG)
}

fn is_string_or_null(v: &Value) -> bool {
    matches!(v, Value::Null | Value::Text(_))
}

/// Run `validators` in order against `value`, failing on the first miss
pub fn check(validators: &[Validator], value: &Value) -> Result<(), ValidationError> {
    match validators.iter().find(|v| !(v.predicate)(value)) {
        Some(failed) => Err(failed.rule),
        None => Ok(()),
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    /// Values beyond `i64::MAX` saturate; they fail every range rule anyway.
    fn from(n: u64) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Option<&str>> for Value {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Value::Null, Value::from)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(bytes))
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

//! Error types for the Hot Rod codec
//!
//! Provides a unified error type for all encode/decode operations.

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// A violated input precondition.
///
/// Raised before any byte is written, so the buffer cursor is unchanged and
/// the caller may fix the input and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("must not be null")]
    Null,

    #[error("must be a number")]
    NotNumber,

    #[error("must be >= 0")]
    Negative,

    #[error("must be less than 2^8")]
    ByteTooBig,

    #[error("must be less than 2^31")]
    IntTooBig,

    #[error("must be less than 2^53")]
    LongTooBig,

    #[error("must be a String or null")]
    NotStringOrNull,
}

/// Unified error type for codec operations
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The value cannot be encoded under the current options. A usage
    /// defect, not something a retry fixes.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Buffer underflow: needed {needed} bytes, {available} available")]
    Underflow { needed: usize, available: usize },

    #[error("Variable-length number exceeds 64 bits")]
    VarintOverflow,

    #[error("Variable-length int out of range: {0}")]
    NarrowOverflow(u64),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for CodecError {
    fn from(err: bincode::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}

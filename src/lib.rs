//! # hotrod-codec
//!
//! Field-level binary codec for the Hot Rod key-value grid protocol:
//! - Unsigned bytes and base-128 variable-length numbers
//! - Length-prefixed UTF-8 strings, raw bytes and two-variant objects
//! - A growable buffer with an explicit cursor
//! - Validated encode pipelines with pluggable result reducers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Encoder / Decoder pipelines                    │
//! │            (ordered steps + Last / All / BytesWritten)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Validation layer                            │
//! │         (not null, number, >= 0, < 2^8 / 2^31 / 2^53)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  Primitive  │◄─────────│   Compound   │
//!   │ ubyte/varint│          │string/object │
//!   └──────┬──────┘          └──────┬───────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐
//!               │   ByteBuf    │
//!               │ (grow x2)    │
//!               └──────────────┘
//! ```
//!
//! Framing, network I/O and cluster logic live outside this crate.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod buffer;
pub mod validation;
pub mod codec;
pub mod pipeline;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, Result, ValidationError};
pub use config::ClientOptions;
pub use buffer::ByteBuf;
pub use validation::Value;
pub use codec::{BincodeMarshaller, Marshaller, Object};
pub use pipeline::{
    decode_bytes, decode_object, decode_string, decode_ubyte, decode_vint, decode_vlong,
    encode_bytes, encode_object, encode_string, encode_ubyte, encode_vint, encode_vlong, lift,
    All, BytesWritten, DecodeOp, Decoded, Decoder, EncodeOp, Encoder, Last, Reducer,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of hotrod-codec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

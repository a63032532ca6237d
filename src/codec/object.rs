//! Object codec
//!
//! An object is either text or an externally serialized message. The wire
//! form is a varint length plus payload with no discriminator; the
//! `protobuf` option alone decides which variant both sides use.

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::compound::write_prefixed;
use super::primitive::read_vnum;
use crate::buffer::ByteBuf;
use crate::config::ClientOptions;
use crate::error::{CodecError, Result};

/// A value carried in an object field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// UTF-8 text, used when `protobuf` is off
    Text(String),

    /// Bytes produced by an external serializer, used when `protobuf` is on
    Opaque(Bytes),
}

impl Object {
    pub fn text(s: impl Into<String>) -> Self {
        Object::Text(s.into())
    }

    /// Serialize `message` into an opaque object
    pub fn from_message<M: Marshaller>(marshaller: &M, message: &M::Message) -> Result<Self> {
        Ok(Object::Opaque(Bytes::from(marshaller.marshal(message)?)))
    }

    /// Deserialize an opaque object back into a message
    pub fn to_message<M: Marshaller>(&self, marshaller: &M) -> Result<M::Message> {
        match self {
            Object::Opaque(bytes) => marshaller.unmarshal(bytes),
            Object::Text(_) => Err(CodecError::UnsupportedType(
                "text object has no serialized message".to_string(),
            )),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Object::Text(s) => Some(s),
            Object::Opaque(_) => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Bytes> {
        match self {
            Object::Opaque(bytes) => Some(bytes),
            Object::Text(_) => None,
        }
    }
}

// =============================================================================
// External serializer
// =============================================================================

/// Serializer used for objects in `protobuf` mode
///
/// The codec never looks inside the payload; it only moves bytes.
pub trait Marshaller {
    type Message;

    fn marshal(&self, message: &Self::Message) -> Result<Vec<u8>>;

    fn unmarshal(&self, bytes: &[u8]) -> Result<Self::Message>;
}

/// [`Marshaller`] for any serde type, in bincode's compact format
pub struct BincodeMarshaller<T> {
    _message: PhantomData<fn() -> T>,
}

impl<T> BincodeMarshaller<T> {
    pub fn new() -> Self {
        Self { _message: PhantomData }
    }
}

impl<T> Default for BincodeMarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> Marshaller for BincodeMarshaller<T> {
    type Message = T;

    fn marshal(&self, message: &T) -> Result<Vec<u8>> {
        Ok(bincode::serialize(message)?)
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<T> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// =============================================================================
// Encoding/Decoding
// =============================================================================

/// Write a length-prefixed object
///
/// The variant must match the `protobuf` option; a mismatch is rejected
/// before anything is written.
pub fn write_object(buf: &mut ByteBuf, obj: &Object, options: &ClientOptions) -> Result<usize> {
    match (options.protobuf, obj) {
        (true, Object::Opaque(bytes)) => Ok(write_prefixed(buf, bytes)),
        (false, Object::Text(text)) => Ok(write_prefixed(buf, text.as_bytes())),
        (true, Object::Text(_)) => Err(CodecError::UnsupportedType(
            "text object while protobuf is enabled".to_string(),
        )),
        (false, Object::Opaque(_)) => Err(CodecError::UnsupportedType(
            "serialized object while protobuf is disabled".to_string(),
        )),
    }
}

/// Read a length-prefixed object
///
/// Returns `Ok(None)` when fewer bytes remain than the prefix declares. The
/// cursor is then restored to before the prefix, so the same call can be
/// retried once more bytes have been appended.
pub fn read_object(buf: &mut ByteBuf, options: &ClientOptions) -> Result<Option<Object>> {
    let start = buf.position();
    let declared = read_vnum(buf)?;

    let len = match usize::try_from(declared) {
        Ok(len) if len <= buf.remaining() => len,
        _ => {
            tracing::trace!(
                declared,
                capacity = buf.capacity(),
                offset = buf.position(),
                "object not fully available"
            );
            buf.rewind(start);
            return Ok(None);
        }
    };

    let payload = buf.read_slice(len)?;
    if options.protobuf {
        return Ok(Some(Object::Opaque(payload)));
    }

    match std::str::from_utf8(&payload) {
        Ok(text) => Ok(Some(Object::Text(text.to_owned()))),
        Err(e) => {
            buf.rewind(start);
            Err(e.into())
        }
    }
}

//! Compound codec
//!
//! Raw bytes (length out of band) and length-prefixed UTF-8 strings.

use bytes::Bytes;

use super::primitive::{put_vnum, read_vnum, varint_len};
use crate::buffer::ByteBuf;
use crate::error::Result;

/// Write a varint length followed by `payload`
///
/// Capacity for prefix and payload is reserved in one step, so growth
/// happens at most once per field.
pub(crate) fn write_prefixed(buf: &mut ByteBuf, payload: &[u8]) -> usize {
    let prefix_len = varint_len(payload.len() as u64);
    buf.ensure_capacity(prefix_len + payload.len());

    let start = buf.position();
    let offset = put_vnum(buf, start, payload.len() as u64);
    if !payload.is_empty() {
        buf.put_slice(offset, payload);
    }
    offset + payload.len()
}

/// Read a varint length, then that many bytes
///
/// On failure the cursor is left where it was before the call.
pub(crate) fn read_prefixed(buf: &mut ByteBuf) -> Result<Bytes> {
    let start = buf.position();
    let len = read_vnum(buf)?;

    // Lengths past usize::MAX cannot be satisfied, report them as underflow
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    let payload = buf.read_slice(len);
    if payload.is_err() {
        buf.rewind(start);
    }
    payload
}

// =============================================================================
// Raw bytes
// =============================================================================

/// Copy `bytes` verbatim at the cursor, no length prefix
pub fn write_bytes(buf: &mut ByteBuf, bytes: &[u8]) -> usize {
    buf.ensure_capacity(bytes.len());
    let offset = buf.position();
    buf.put_slice(offset, bytes);
    offset + bytes.len()
}

/// Read exactly `len` bytes; the caller knows the length
pub fn read_bytes(buf: &mut ByteBuf, len: usize) -> Result<Bytes> {
    buf.read_slice(len)
}

// =============================================================================
// Strings
// =============================================================================

/// Write a length-prefixed string; `None` encodes as length zero
pub fn write_string(buf: &mut ByteBuf, s: Option<&str>) -> usize {
    write_prefixed(buf, s.map_or(&[][..], str::as_bytes))
}

pub fn read_string(buf: &mut ByteBuf) -> Result<String> {
    let start = buf.position();
    let payload = read_prefixed(buf)?;

    match std::str::from_utf8(&payload) {
        Ok(text) => Ok(text.to_owned()),
        Err(e) => {
            buf.rewind(start);
            Err(e.into())
        }
    }
}

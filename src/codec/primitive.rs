//! Primitive codec
//!
//! Unsigned bytes and base-128 variable-length numbers.
//!
//! Writers never move the cursor: they return the offset just past what they
//! wrote and leave committing it to the caller. Readers advance the cursor.

use crate::buffer::ByteBuf;
use crate::error::{CodecError, Result};

/// Continuation bit
const MSB: u8 = 0x80;

/// Payload bits of one group
const REST: u8 = 0x7F;

/// Longest encoding of a `u64`
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes `n` occupies on the wire
pub fn varint_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= u64::from(MSB) {
        n >>= 7;
        len += 1;
    }
    len
}

/// Write the groups of `n` starting at `offset`
///
/// Capacity for `varint_len(n)` bytes at `offset` must already exist.
pub(crate) fn put_vnum(buf: &mut ByteBuf, mut offset: usize, mut n: u64) -> usize {
    while n >= u64::from(MSB) {
        buf.put_u8(offset, (n as u8 & REST) | MSB);
        n >>= 7;
        offset += 1;
    }
    buf.put_u8(offset, n as u8);
    offset + 1
}

// =============================================================================
// Unchecked writers
// =============================================================================

pub fn write_ubyte(buf: &mut ByteBuf, byte: u8) -> usize {
    buf.ensure_capacity(1);
    let offset = buf.position();
    buf.put_u8(offset, byte);
    offset + 1
}

/// Write `n` as a varint at the cursor, growing by exactly its encoded size
pub fn write_vnum(buf: &mut ByteBuf, n: u64) -> usize {
    buf.ensure_capacity(varint_len(n));
    let offset = buf.position();
    put_vnum(buf, offset, n)
}

// =============================================================================
// Readers
// =============================================================================

/// Read one byte; no range check, the byte is the value
pub fn read_ubyte(buf: &mut ByteBuf) -> Result<u8> {
    buf.read_u8()
}

/// Read a varint of up to 64 bits
///
/// On failure the cursor is left where it was before the call.
pub fn read_vnum(buf: &mut ByteBuf) -> Result<u64> {
    let start = buf.position();
    let decoded = accumulate(buf);
    if decoded.is_err() {
        buf.rewind(start);
    }
    decoded
}

fn accumulate(buf: &mut ByteBuf) -> Result<u64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = buf.read_u8()?;
        let group = u64::from(byte & REST);

        // The tenth group may only carry the top bit of a u64
        if shift > 63 || (shift == 63 && group > 1) {
            return Err(CodecError::VarintOverflow);
        }
        result |= group << shift;

        if byte & MSB == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

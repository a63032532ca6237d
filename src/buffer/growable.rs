//! Growable buffer implementation
//!
//! `BytesMut`-backed region whose length is the logical capacity.

use bytes::{Bytes, BytesMut};

use crate::error::{CodecError, Result};

/// Byte region plus cursor
///
/// The backing `BytesMut` is always fully initialized: its length is the
/// capacity the codec sees, and spare bytes are zero until written.
#[derive(Debug, Clone)]
pub struct ByteBuf {
    /// Visible region, `data.len()` is the capacity
    data: BytesMut,

    /// Next read/write offset, `position <= data.len()`
    position: usize,
}

impl ByteBuf {
    /// Create an empty buffer ready for encoding
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::zeroed(capacity),
            position: 0,
        }
    }

    /// Wrap received bytes for decoding, cursor at the start
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
            position: 0,
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor, rejecting offsets beyond the visible region
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(CodecError::Underflow {
                needed: position,
                available: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Bytes between the cursor and the end of the visible region
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    // =========================================================================
    // Growth
    // =========================================================================

    /// Make room for `additional` bytes at the cursor
    ///
    /// Doubles the capacity until `position + additional` fits and returns
    /// whether a new region was allocated. No-op when already sufficient.
    pub fn ensure_capacity(&mut self, additional: usize) -> bool {
        let required = self.position + additional;
        let capacity = self.data.len();
        if required <= capacity {
            return false;
        }

        // An empty region doubles from one byte
        let mut grown = capacity.max(1) * 2;
        while grown < required {
            grown *= 2;
        }

        let mut region = BytesMut::zeroed(grown);
        region[..capacity].copy_from_slice(&self.data);
        self.data = region;

        tracing::trace!(from = capacity, to = grown, "buffer grown");
        true
    }

    /// Append received bytes after the visible region
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Shrink the visible region to exactly `len` bytes
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        self.position = self.position.min(self.data.len());
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// The whole visible region, including unwritten spare capacity
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Bytes before the cursor
    pub fn written(&self) -> &[u8] {
        &self.data[..self.position]
    }

    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Write one byte at `offset`; capacity must already cover it
    pub(crate) fn put_u8(&mut self, offset: usize, byte: u8) {
        self.data[offset] = byte;
    }

    /// Copy `bytes` to `offset`; capacity must already cover them
    pub(crate) fn put_slice(&mut self, offset: usize, bytes: &[u8]) {
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Put the cursor back to an offset previously returned by `position`
    pub(crate) fn rewind(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    /// Read one byte at the cursor and advance past it
    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.position).ok_or(CodecError::Underflow {
            needed: 1,
            available: 0,
        })?;
        self.position += 1;
        Ok(byte)
    }

    /// Copy `len` bytes out from the cursor and advance past them
    pub(crate) fn read_slice(&mut self, len: usize) -> Result<Bytes> {
        if len > self.remaining() {
            return Err(CodecError::Underflow {
                needed: len,
                available: self.remaining(),
            });
        }
        let start = self.position;
        self.position += len;
        Ok(Bytes::copy_from_slice(&self.data[start..start + len]))
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_slice(&bytes)
    }
}

impl From<Bytes> for ByteBuf {
    fn from(bytes: Bytes) -> Self {
        Self::from_slice(&bytes)
    }
}

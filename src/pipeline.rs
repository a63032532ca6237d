//! Pipeline Module
//!
//! Validated field operations and the builders that sequence them over one
//! buffer.
//!
//! ## Flow
//! ```text
//!  Encoder ──► [EncodeOp + Value]* ──► validate ──► write ──► commit cursor
//!                                                       │
//!  Decoder ──► [DecodeOp]* ───────────────────► read ───┤
//!                                                       ▼
//!                                      ordered results ──► Reducer
//! ```
//!
//! A buffer belongs to one pipeline at a time (typically one buffer per
//! in-flight request); the `&mut ByteBuf` borrow enforces this.

use bytes::Bytes;

use crate::buffer::ByteBuf;
use crate::codec::{
    read_bytes, read_object, read_string, read_ubyte, read_vnum, write_bytes, write_object,
    write_string, write_ubyte, write_vnum, Object,
};
use crate::config::ClientOptions;
use crate::error::{CodecError, Result};
use crate::validation::{
    self, Validator, Value, BELOW_2_31, BELOW_2_53, BELOW_2_8, NON_NEGATIVE, NOT_NULL, NUMBER,
    STRING_OR_NULL,
};

const UBYTE_RULES: &[Validator] = &[NUMBER, NON_NEGATIVE, BELOW_2_8];
const VINT_RULES: &[Validator] = &[NUMBER, NON_NEGATIVE, BELOW_2_31];
const VLONG_RULES: &[Validator] = &[NUMBER, NON_NEGATIVE, BELOW_2_53];
const OBJECT_RULES: &[Validator] = &[NOT_NULL];
const STRING_RULES: &[Validator] = &[STRING_OR_NULL];
const BYTES_RULES: &[Validator] = &[NOT_NULL];

// =============================================================================
// Encode operations
// =============================================================================

/// A field encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOp {
    UByte,
    VInt,
    VLong,
    String,
    Bytes,
    Object,
}

impl EncodeOp {
    /// Preconditions checked before anything is written
    pub fn validators(self) -> &'static [Validator] {
        match self {
            EncodeOp::UByte => UBYTE_RULES,
            EncodeOp::VInt => VINT_RULES,
            EncodeOp::VLong => VLONG_RULES,
            EncodeOp::String => STRING_RULES,
            EncodeOp::Bytes => BYTES_RULES,
            EncodeOp::Object => OBJECT_RULES,
        }
    }

    /// Validate `value`, write it at the cursor and commit the new cursor
    ///
    /// On any error the cursor is unchanged.
    pub fn apply(self, buf: &mut ByteBuf, value: &Value, options: &ClientOptions) -> Result<usize> {
        validation::check(self.validators(), value)?;

        // Range rules above make the integer casts lossless
        let offset = match (self, value) {
            (EncodeOp::UByte, Value::Int(n)) => write_ubyte(buf, *n as u8),
            (EncodeOp::VInt | EncodeOp::VLong, Value::Int(n)) => write_vnum(buf, *n as u64),
            (EncodeOp::String, Value::Text(s)) => write_string(buf, Some(s.as_str())),
            (EncodeOp::String, Value::Null) => write_string(buf, None),
            (EncodeOp::Bytes, Value::Bytes(bytes)) => write_bytes(buf, bytes),
            (EncodeOp::Object, Value::Object(obj)) => write_object(buf, obj, options)?,
            (EncodeOp::Object, Value::Text(s)) if !options.protobuf => {
                write_string(buf, Some(s.as_str()))
            }
            (op, other) => {
                return Err(CodecError::UnsupportedType(format!(
                    "{:?} cannot encode {:?}",
                    op, other
                )))
            }
        };

        buf.set_position(offset)?;
        Ok(offset)
    }
}

/// Wrap `op` with its validators as a plain function
pub fn lift(op: EncodeOp) -> impl Fn(&mut ByteBuf, &Value, &ClientOptions) -> Result<usize> {
    move |buf: &mut ByteBuf, value: &Value, options: &ClientOptions| op.apply(buf, value, options)
}

// =============================================================================
// Decode operations
// =============================================================================

/// A field decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOp {
    UByte,
    VInt,
    VLong,
    String,
    /// Raw bytes of a length known to the caller
    Bytes(usize),
    Object,
}

/// A decoded field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    UByte(u8),
    VInt(u32),
    VLong(u64),
    String(String),
    Bytes(Bytes),
    Object(Object),
}

impl Decoded {
    /// Numeric fields widened to `u64`
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Decoded::UByte(n) => Some(u64::from(*n)),
            Decoded::VInt(n) => Some(u64::from(*n)),
            Decoded::VLong(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Decoded::String(s) => Some(s),
            Decoded::Object(obj) => obj.as_text(),
            _ => None,
        }
    }
}

impl DecodeOp {
    /// Read one field at the cursor
    ///
    /// `Ok(None)` means the field is not fully available yet.
    pub fn apply(self, buf: &mut ByteBuf, options: &ClientOptions) -> Result<Option<Decoded>> {
        let decoded = match self {
            DecodeOp::UByte => Decoded::UByte(decode_ubyte(buf)?),
            DecodeOp::VInt => Decoded::VInt(decode_vint(buf)?),
            DecodeOp::VLong => Decoded::VLong(decode_vlong(buf)?),
            DecodeOp::String => Decoded::String(decode_string(buf)?),
            DecodeOp::Bytes(len) => Decoded::Bytes(decode_bytes(buf, len)?),
            DecodeOp::Object => match decode_object(buf, options)? {
                Some(obj) => Decoded::Object(obj),
                None => return Ok(None),
            },
        };
        Ok(Some(decoded))
    }
}

// =============================================================================
// Reducers
// =============================================================================

/// Folds the ordered per-field results of a pipeline into one outcome
pub trait Reducer<T> {
    type Output;

    fn reduce(&self, values: Vec<T>, buf: &mut ByteBuf) -> Self::Output;
}

/// Keep only the final field's result
pub struct Last;

/// Keep every field's result, in order
pub struct All;

/// Report the final cursor and truncate the buffer to it
///
/// The buffer is then exactly the bytes to transmit.
pub struct BytesWritten;

impl<T> Reducer<T> for Last {
    type Output = Option<T>;

    fn reduce(&self, mut values: Vec<T>, _buf: &mut ByteBuf) -> Option<T> {
        values.pop()
    }
}

impl<T> Reducer<T> for All {
    type Output = Vec<T>;

    fn reduce(&self, values: Vec<T>, _buf: &mut ByteBuf) -> Vec<T> {
        values
    }
}

impl Reducer<usize> for BytesWritten {
    type Output = usize;

    fn reduce(&self, values: Vec<usize>, buf: &mut ByteBuf) -> usize {
        let bytes = values.last().copied().unwrap_or_else(|| buf.position());
        if bytes < buf.capacity() {
            buf.truncate(bytes);
        }
        bytes
    }
}

// =============================================================================
// Pipelines
// =============================================================================

/// Sequences encode steps over one buffer
///
/// ```
/// use hotrod_codec::{BytesWritten, ClientOptions, Encoder};
///
/// let options = ClientOptions::default();
/// let mut buf = options.new_buffer();
/// let written = Encoder::new(&mut buf, &options)
///     .ubyte(0xA0)
///     .vint(300)
///     .string("ab")
///     .run(BytesWritten)
///     .unwrap();
///
/// assert_eq!(written, 6);
/// assert_eq!(buf.as_slice(), &[0xA0, 0xAC, 0x02, 0x02, b'a', b'b']);
/// ```
pub struct Encoder<'a> {
    buf: &'a mut ByteBuf,
    options: &'a ClientOptions,
    steps: Vec<(EncodeOp, Value)>,
}

impl<'a> Encoder<'a> {
    pub fn new(buf: &'a mut ByteBuf, options: &'a ClientOptions) -> Self {
        Self {
            buf,
            options,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn field(mut self, op: EncodeOp, value: impl Into<Value>) -> Self {
        self.steps.push((op, value.into()));
        self
    }

    pub fn ubyte(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::UByte, value)
    }

    pub fn vint(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::VInt, value)
    }

    pub fn vlong(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::VLong, value)
    }

    pub fn string(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::String, value)
    }

    pub fn bytes(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::Bytes, value)
    }

    pub fn object(self, value: impl Into<Value>) -> Self {
        self.field(EncodeOp::Object, value)
    }

    /// Run every step in order and reduce the offsets they return
    ///
    /// The first failing step aborts the run and restores the cursor to
    /// where the pipeline started.
    pub fn run<R: Reducer<usize>>(self, reducer: R) -> Result<R::Output> {
        let Encoder { buf, options, steps } = self;
        let start = buf.position();

        let mut offsets = Vec::with_capacity(steps.len());
        for (op, value) in &steps {
            match op.apply(buf, value, options) {
                Ok(offset) => offsets.push(offset),
                Err(e) => {
                    buf.rewind(start);
                    return Err(e);
                }
            }
        }

        tracing::debug!(fields = offsets.len(), offset = buf.position(), "fields encoded");
        Ok(reducer.reduce(offsets, buf))
    }
}

/// Sequences decode steps over one buffer
pub struct Decoder<'a> {
    buf: &'a mut ByteBuf,
    options: &'a ClientOptions,
    steps: Vec<DecodeOp>,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a mut ByteBuf, options: &'a ClientOptions) -> Self {
        Self {
            buf,
            options,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn field(mut self, op: DecodeOp) -> Self {
        self.steps.push(op);
        self
    }

    pub fn ubyte(self) -> Self {
        self.field(DecodeOp::UByte)
    }

    pub fn vint(self) -> Self {
        self.field(DecodeOp::VInt)
    }

    pub fn vlong(self) -> Self {
        self.field(DecodeOp::VLong)
    }

    pub fn string(self) -> Self {
        self.field(DecodeOp::String)
    }

    pub fn bytes(self, len: usize) -> Self {
        self.field(DecodeOp::Bytes(len))
    }

    pub fn object(self) -> Self {
        self.field(DecodeOp::Object)
    }

    /// Run every step in order and reduce the decoded fields
    ///
    /// Returns `Ok(None)` when some field is not fully available yet. Both
    /// that case and errors restore the cursor to where the pipeline
    /// started, so the whole message can be decoded again later.
    pub fn run<R: Reducer<Decoded>>(self, reducer: R) -> Result<Option<R::Output>> {
        let Decoder { buf, options, steps } = self;
        let start = buf.position();

        let mut fields = Vec::with_capacity(steps.len());
        for op in steps {
            match op.apply(buf, options) {
                Ok(Some(field)) => fields.push(field),
                Ok(None) => {
                    tracing::trace!(step = fields.len(), "incomplete, need more bytes");
                    buf.rewind(start);
                    return Ok(None);
                }
                Err(e) => {
                    buf.rewind(start);
                    return Err(e);
                }
            }
        }

        tracing::debug!(fields = fields.len(), offset = buf.position(), "fields decoded");
        Ok(Some(reducer.reduce(fields, buf)))
    }
}

// =============================================================================
// Single-field helpers
// =============================================================================

pub fn encode_ubyte(buf: &mut ByteBuf, value: impl Into<Value>) -> Result<usize> {
    EncodeOp::UByte.apply(buf, &value.into(), &ClientOptions::default())
}

pub fn encode_vint(buf: &mut ByteBuf, value: impl Into<Value>) -> Result<usize> {
    EncodeOp::VInt.apply(buf, &value.into(), &ClientOptions::default())
}

pub fn encode_vlong(buf: &mut ByteBuf, value: impl Into<Value>) -> Result<usize> {
    EncodeOp::VLong.apply(buf, &value.into(), &ClientOptions::default())
}

pub fn encode_string(buf: &mut ByteBuf, value: impl Into<Value>) -> Result<usize> {
    EncodeOp::String.apply(buf, &value.into(), &ClientOptions::default())
}

pub fn encode_bytes(buf: &mut ByteBuf, value: impl Into<Value>) -> Result<usize> {
    EncodeOp::Bytes.apply(buf, &value.into(), &ClientOptions::default())
}

pub fn encode_object(
    buf: &mut ByteBuf,
    value: impl Into<Value>,
    options: &ClientOptions,
) -> Result<usize> {
    EncodeOp::Object.apply(buf, &value.into(), options)
}

pub fn decode_ubyte(buf: &mut ByteBuf) -> Result<u8> {
    read_ubyte(buf)
}

/// Read a narrow varint; values beyond `u32` are rejected and not consumed
pub fn decode_vint(buf: &mut ByteBuf) -> Result<u32> {
    let start = buf.position();
    let n = read_vnum(buf)?;
    u32::try_from(n).map_err(|_| {
        buf.rewind(start);
        CodecError::NarrowOverflow(n)
    })
}

pub fn decode_vlong(buf: &mut ByteBuf) -> Result<u64> {
    read_vnum(buf)
}

pub fn decode_string(buf: &mut ByteBuf) -> Result<String> {
    read_string(buf)
}

pub fn decode_bytes(buf: &mut ByteBuf, len: usize) -> Result<Bytes> {
    read_bytes(buf, len)
}

pub fn decode_object(buf: &mut ByteBuf, options: &ClientOptions) -> Result<Option<Object>> {
    read_object(buf, options)
}

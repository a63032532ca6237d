//! Codec Module
//!
//! Field-level encoding for the Hot Rod wire format.
//!
//! ## Wire Format
//! ```text
//! ubyte    ┌────────┐
//!          │ 1 byte │
//!          └────────┘
//! vint     ┌──────────┬──────────┬─────┬──────────┐
//! vlong    │1ggggggg  │1ggggggg  │ ... │0ggggggg  │   7-bit groups, LSB first
//!          └──────────┴──────────┴─────┴──────────┘
//! string   ┌──────────────┬───────────────────────┐
//! object   │ vlong length │  payload (len bytes)  │
//!          └──────────────┴───────────────────────┘
//! bytes    ┌───────────────────────┐
//!          │ payload, length known │
//!          └───────────────────────┘
//! ```
//!
//! ## Ranges
//! - vint:  [0, 2^31)
//! - vlong: [0, 2^53) on encode, the full `u64` range on decode

mod compound;
mod object;
mod primitive;

pub use compound::{read_bytes, read_string, write_bytes, write_string};
pub use object::{read_object, write_object, BincodeMarshaller, Marshaller, Object};
pub use primitive::{read_ubyte, read_vnum, varint_len, write_ubyte, write_vnum, MAX_VARINT_LEN};

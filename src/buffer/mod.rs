//! Buffer Module
//!
//! Growable in-memory byte region with an explicit read/write cursor.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────┬───────────────────────────┐
//! │  written [0, position)   │  spare [position, cap)    │
//! └──────────────────────────┴───────────────────────────┘
//!                            ▲
//!                         cursor
//! ```
//!
//! ## Growth
//! A write that would overflow doubles the capacity until it fits. The old
//! region is copied verbatim into the prefix of the new one. Every mutating
//! call takes `&mut ByteBuf`, so no reference into the previous region can
//! survive a growth.

mod growable;

pub use growable::ByteBuf;

//! Client options consumed by the codec
//!
//! A flat options structure; only the entries the codec reads live here.

use serde::{Deserialize, Serialize};

use crate::buffer::ByteBuf;

/// Options shared by encoder and decoder.
///
/// Both sides of a connection must agree on `protobuf` out of band: the
/// object encoding never carries a type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Objects are externally serialized messages instead of text
    pub protobuf: bool,

    /// Capacity of buffers created through [`ClientOptions::new_buffer`]
    pub initial_capacity: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            protobuf: false,
            initial_capacity: 64,
        }
    }
}

impl ClientOptions {
    /// Create a new options builder
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Create an empty buffer sized by `initial_capacity`
    pub fn new_buffer(&self) -> ByteBuf {
        ByteBuf::with_capacity(self.initial_capacity)
    }
}

/// Builder for ClientOptions
#[derive(Default)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl ClientOptionsBuilder {
    /// Select the externally-serialized object variant
    pub fn protobuf(mut self, enabled: bool) -> Self {
        self.options.protobuf = enabled;
        self
    }

    /// Set the initial capacity (in bytes) of new buffers
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.options.initial_capacity = bytes;
        self
    }

    pub fn build(self) -> ClientOptions {
        self.options
    }
}

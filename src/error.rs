//! Error types for the codec.

use std::io;

use thiserror::Error;

/// Errors surfaced by encoding, decoding and container parsing.
///
/// An empty input is not an error: it encodes to an artifact with a zero
/// symbol count and decodes back to an empty buffer.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A bit read went past the declared number of meaningful bits.
    #[error("bit read out of range: position {position}, limit {limit}")]
    OutOfRange {
        /// Bit position that was requested.
        position: u64,
        /// Number of meaningful bits in the stream.
        limit: u64,
    },

    /// The payload or stored table does not describe a valid stream.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// The encoder was handed a byte its own table has no code for.
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),

    /// A tree path grew past the widest code the table can hold.
    #[error("code for symbol {symbol:#04x} is {len} bits long")]
    CodeTooLong { symbol: u8, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        HuffmanError::CorruptStream(message.into())
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

//! Error types for huffpack

use thiserror::Error;

/// Result alias used throughout the codec.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The frequency table has no entries, so there is no tree to build.
    #[error("empty input")]
    EmptyInput,

    #[error("symbol 0x{symbol:02x} has no entry in the code table")]
    UnknownSymbol { symbol: u8 },

    /// The stream ended in the middle of a code.
    #[error("bitstream truncated after {bits_read} bits ({decoded} symbols decoded)")]
    TruncatedStream { bits_read: usize, decoded: usize },

    /// A bit sequence left the decoding trie without reaching a symbol.
    #[error("invalid code at bit offset {bit_offset}")]
    InvalidCode { bit_offset: usize },

    #[error("malformed code table: {0}")]
    MalformedCodeTable(String),

    #[error("input of {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("{unused} valid bits left unconsumed after the last symbol")]
    TrailingBits { unused: usize },

    #[error("bit length {bit_len} is inconsistent with a {byte_len}-byte buffer")]
    InvalidBitLength { bit_len: usize, byte_len: usize },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

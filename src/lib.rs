//! huffpack: static Huffman entropy coding for byte streams.
//!
//! The pipeline runs in one pass per call:
//! - [`FrequencyTable`] counts each byte value
//! - [`tree::build`] merges the two lightest nodes until one root remains
//! - [`CodeTable::generate`] reads codes off the tree (left = `0`, right = `1`)
//! - [`packer::encode`] concatenates codes MSB-first into a [`Bitstream`]
//! - [`unpacker::decode`] walks a trie rebuilt from the table
//! - [`serialize`] moves the table across process boundaries
//!
//! Equal frequencies are resolved by insertion order (leaves in ascending
//! symbol order, merged nodes in creation order), so encoding is deterministic.

pub mod bitstream;
pub mod code;
pub mod config;
pub mod error;
pub mod frequency;
pub mod packer;
pub mod serialize;
pub mod stats;
pub mod tree;
pub mod trie;
pub mod unpacker;

pub use crate::bitstream::Bitstream;
pub use crate::code::{Code, CodeTable};
pub use crate::config::CodecConfig;
pub use crate::error::{HuffmanError, Result};
pub use crate::frequency::FrequencyTable;
pub use crate::serialize::{SerializedCode, SerializedCodeTable};
pub use crate::stats::CompressionStats;
pub use crate::tree::HuffmanNode;

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::debug;

/// Result of encoding: everything a decoder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub stream: Bitstream,
    pub table: CodeTable,
    pub symbol_count: usize,
}

/// Self-contained transport container for an encoded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    pub table: SerializedCodeTable,
    pub symbol_count: u64,
    pub bit_len: u64,
    pub data: Vec<u8>,
}

impl EncodedPayload {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, self).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        bincode::deserialize_from(reader).map_err(|e| HuffmanError::Serialization(e.to_string()))
    }
}

impl From<&Encoded> for EncodedPayload {
    fn from(encoded: &Encoded) -> Self {
        Self {
            table: serialize::serialize(&encoded.table),
            symbol_count: encoded.symbol_count as u64,
            bit_len: encoded.stream.bit_len() as u64,
            data: encoded.stream.as_bytes().to_vec(),
        }
    }
}

impl TryFrom<&EncodedPayload> for Encoded {
    type Error = HuffmanError;

    fn try_from(payload: &EncodedPayload) -> Result<Self> {
        let bit_len = to_usize(payload.bit_len)?;
        let symbol_count = to_usize(payload.symbol_count)?;
        Ok(Self {
            stream: Bitstream::from_parts(payload.data.clone(), bit_len)?,
            table: serialize::deserialize(&payload.table)?,
            symbol_count,
        })
    }
}

fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| HuffmanError::Serialization(format!("{value} does not fit in usize")))
}

/// The codec engine
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    fn check_size(&self, data: &[u8]) -> Result<()> {
        if data.len() > self.config.max_input_size {
            return Err(HuffmanError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }
        Ok(())
    }

    /// Build a code table from `data` and pack `data` with it.
    pub fn encode(&self, data: &[u8]) -> Result<Encoded> {
        self.check_size(data)?;
        let freq = FrequencyTable::count(data);
        let root = tree::build(&freq)?;
        let table = CodeTable::generate(&root);
        let stream = packer::encode(data, &table)?;

        debug!(
            input_bytes = data.len(),
            output_bytes = stream.as_bytes().len(),
            distinct = table.len(),
            "encoded"
        );
        Ok(Encoded {
            stream,
            table,
            symbol_count: data.len(),
        })
    }

    pub fn decode(&self, stream: &Bitstream, table: &CodeTable, symbol_count: usize) -> Result<Vec<u8>> {
        unpacker::decode_with(stream, table, symbol_count, self.config.reject_trailing_bits)
    }

    /// Encode into a transport container.
    pub fn compress(&self, data: &[u8]) -> Result<EncodedPayload> {
        Ok(EncodedPayload::from(&self.encode(data)?))
    }

    /// Decode a transport container, re-validating its table first.
    pub fn decompress(&self, payload: &EncodedPayload) -> Result<Vec<u8>> {
        let encoded = Encoded::try_from(payload)?;
        self.decode(&encoded.stream, &encoded.table, encoded.symbol_count)
    }

    /// Statistics for the code `encode` would build for `data`.
    pub fn stats(&self, data: &[u8]) -> Result<CompressionStats> {
        self.check_size(data)?;
        let freq = FrequencyTable::count(data);
        let table = CodeTable::generate(&tree::build(&freq)?);
        Ok(CompressionStats::compute(&freq, &table))
    }
}

/// Encode with the default configuration.
pub fn encode(data: &[u8]) -> Result<Encoded> {
    HuffmanCodec::default().encode(data)
}

/// Decode with the default configuration.
pub fn decode(stream: &Bitstream, table: &CodeTable, symbol_count: usize) -> Result<Vec<u8>> {
    HuffmanCodec::default().decode(stream, table, symbol_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let encoded = encode(data).unwrap();
        let decoded = decode(&encoded.stream, &encoded.table, encoded.symbol_count).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_encode_empty() {
        assert!(matches!(encode(b""), Err(HuffmanError::EmptyInput)));
    }

    #[test]
    fn test_single_symbol_payload() {
        let encoded = encode(b"aaaa").unwrap();
        assert_eq!(encoded.table.get(b'a').unwrap().len(), 1);
        assert_eq!(encoded.stream.bit_len(), 4);
        assert_eq!(encoded.stream.as_bytes(), &[0x00]);
        assert_eq!(decode(&encoded.stream, &encoded.table, 4).unwrap(), b"aaaa");
    }

    #[test]
    fn test_known_bitstream() {
        // a weighs 2, b weighs 1: b pops first and goes left
        let encoded = encode(b"aab").unwrap();
        assert_eq!(encoded.table.get(b'b').unwrap().to_string(), "0");
        assert_eq!(encoded.table.get(b'a').unwrap().to_string(), "1");
        assert_eq!(encoded.stream.as_bytes(), &[0b1100_0000]);
        assert_eq!(encoded.stream.bit_len(), 3);
    }

    #[test]
    fn test_input_too_large() {
        let codec = HuffmanCodec::new(CodecConfig {
            max_input_size: 4,
            ..CodecConfig::default()
        });
        assert!(matches!(
            codec.encode(b"hello"),
            Err(HuffmanError::InputTooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_stats_respects_size_limit() {
        let codec = HuffmanCodec::new(CodecConfig {
            max_input_size: 4,
            ..CodecConfig::default()
        });
        assert!(codec.stats(b"abcd").is_ok());
        assert!(matches!(
            codec.stats(b"hello"),
            Err(HuffmanError::InputTooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_payload_oversized_count() {
        let codec = HuffmanCodec::default();
        let mut payload = codec.compress(b"abracadabra").unwrap();
        payload.symbol_count = u64::MAX;
        assert!(matches!(
            codec.decompress(&payload),
            Err(HuffmanError::TruncatedStream { .. }) | Err(HuffmanError::Serialization(_))
        ));
    }

    #[test]
    fn test_strict_codec_accepts_own_output() {
        let codec = HuffmanCodec::new(CodecConfig {
            reject_trailing_bits: true,
            ..CodecConfig::default()
        });
        let data = b"strict decoding still round-trips";
        let payload = codec.compress(data).unwrap();
        assert_eq!(codec.decompress(&payload).unwrap(), data);
    }

    #[test]
    fn test_payload_json_roundtrip() {
        let codec = HuffmanCodec::default();
        let data = b"hello world hello world hello";
        let payload = codec.compress(data).unwrap();
        let restored = EncodedPayload::from_json(&payload.to_json().unwrap()).unwrap();
        assert_eq!(restored, payload);
        assert_eq!(codec.decompress(&restored).unwrap(), data);
    }

    #[test]
    fn test_payload_bad_bit_len() {
        let codec = HuffmanCodec::default();
        let mut payload = codec.compress(b"hello").unwrap();
        payload.bit_len += 64;
        assert!(matches!(
            codec.decompress(&payload),
            Err(HuffmanError::InvalidBitLength { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let codec = HuffmanCodec::default();
        let stats = codec.stats(&"aaaaaaaaaa".repeat(100).into_bytes()).unwrap();
        assert_eq!(stats.huffman_bits, 1000);
        assert!(stats.ratio_raw < 1.0, "repetitive data should compress well");
    }
}

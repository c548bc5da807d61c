//! Packed bit sequences
//!
//! Bits are stored MSB-first within each byte. The final byte is zero padded
//! and `bit_len` records how many bits are real.

use crate::error::{HuffmanError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Bitstream {
    /// Wrap an existing buffer, checking that `bit_len` lands in its last byte.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        if bit_len.div_ceil(8) != bytes.len() {
            return Err(HuffmanError::InvalidBitLength {
                bit_len,
                byte_len: bytes.len(),
            });
        }
        Ok(Self { bytes, bit_len })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of valid bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Zero bits appended to reach a byte boundary.
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Bit at `index`, or `None` past the valid length.
    pub fn bit(&self, index: usize) -> Option<bool> {
        (index < self.bit_len).then(|| self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// A copy holding only the first `bit_len` bits.
    pub fn truncated(&self, bit_len: usize) -> Self {
        let bit_len = bit_len.min(self.bit_len);
        let mut bytes = self.bytes[..bit_len.div_ceil(8)].to_vec();
        if bit_len % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - bit_len % 8);
            }
        }
        Self { bytes, bit_len }
    }
}

//! Configuration for huffpack

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Largest input `encode` accepts, in bytes.
    pub max_input_size: usize,
    /// Fail decoding when valid bits remain after the expected symbol count.
    pub reject_trailing_bits: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: 100 * 1024 * 1024, // 100 MB
            reject_trailing_bits: false,
        }
    }
}

//! Transportable code table representation
//!
//! Each entry carries an explicit bit length next to its MSB-first packed
//! bits, so codes with leading zeros survive the round trip.

use crate::code::{Code, CodeTable, MAX_CODE_LEN};
use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCode {
    pub symbol: u8,
    pub bit_len: u16,
    pub bits: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCodeTable {
    pub entries: Vec<SerializedCode>,
}

/// Convert a table to its transportable form, entries in ascending symbol order.
pub fn serialize(table: &CodeTable) -> SerializedCodeTable {
    let entries = table
        .iter()
        .map(|(symbol, code)| SerializedCode {
            symbol,
            // CodeTable caps codes at MAX_CODE_LEN bits
            bit_len: code.len() as u16,
            bits: code.to_packed(),
        })
        .collect();
    SerializedCodeTable { entries }
}

/// Rebuild a table, validating every entry and the prefix-free property.
pub fn deserialize(form: &SerializedCodeTable) -> Result<CodeTable> {
    if form.entries.is_empty() {
        return Err(HuffmanError::MalformedCodeTable("code table has no entries".into()));
    }

    let mut seen = BTreeSet::new();
    let mut codes = Vec::with_capacity(form.entries.len());
    for entry in &form.entries {
        if !seen.insert(entry.symbol) {
            return Err(malformed(entry, "duplicate symbol"));
        }
        let bit_len = entry.bit_len as usize;
        if bit_len == 0 {
            return Err(malformed(entry, "zero bit length"));
        }
        if entry.bits.len() != bit_len.div_ceil(8) {
            return Err(malformed(
                entry,
                &format!("{} bytes cannot hold exactly {bit_len} bits", entry.bits.len()),
            ));
        }
        let spare = entry.bits.len() * 8 - bit_len;
        if let Some(&last) = entry.bits.last() {
            if spare > 0 && last & ((1u8 << spare) - 1) != 0 {
                return Err(malformed(entry, "bits set past bit length"));
            }
        }
        codes.push((entry.symbol, Code::from_packed(bit_len, &entry.bits)));
    }
    CodeTable::from_codes(codes)
}

fn malformed(entry: &SerializedCode, reason: &str) -> HuffmanError {
    HuffmanError::MalformedCodeTable(format!("symbol 0x{:02x}: {reason}", entry.symbol))
}

//! Code table generation
//!
//! Codes are read off the tree depth-first: descending left appends a `0`
//! bit, descending right appends a `1`. A tree consisting of a single leaf
//! assigns that symbol the 1-bit code `0`.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanNode;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Longest code a byte alphabet can produce: a chain of 256 leaves.
pub const MAX_CODE_LEN: usize = 255;

/// A variable-length bitstring, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Pack the bits MSB-first into `ceil(len / 8)` bytes, zero padded.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        out
    }

    /// Inverse of [`Code::to_packed`]; bits past `len` are ignored and
    /// missing bytes read as zero.
    pub fn from_packed(len: usize, bytes: &[u8]) -> Self {
        let bits = (0..len)
            .map(|i| bytes.get(i / 8).is_some_and(|b| b & (0x80 >> (i % 8)) != 0))
            .collect();
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(HuffmanError::MalformedCodeTable(format!(
                    "unexpected character {other:?} in code {s:?}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

/// Mapping from symbol to its prefix-free code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf.
    pub fn generate(root: &HuffmanNode) -> Self {
        let mut codes = BTreeMap::new();
        match root {
            HuffmanNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code::from_bits(vec![false]));
            }
            HuffmanNode::Internal { .. } => {
                let mut path = Vec::new();
                collect_codes(root, &mut path, &mut codes);
            }
        }
        Self { codes }
    }

    /// Build a table from explicit codes, rejecting anything that is not a
    /// non-empty prefix-free set.
    pub fn from_codes(entries: impl IntoIterator<Item = (u8, Code)>) -> Result<Self> {
        let mut codes = BTreeMap::new();
        for (symbol, code) in entries {
            if code.is_empty() {
                return Err(HuffmanError::MalformedCodeTable(format!(
                    "symbol 0x{symbol:02x} has an empty code"
                )));
            }
            if code.len() > MAX_CODE_LEN {
                return Err(HuffmanError::MalformedCodeTable(format!(
                    "symbol 0x{symbol:02x} has a {}-bit code, limit is {MAX_CODE_LEN}",
                    code.len()
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::MalformedCodeTable(format!(
                    "symbol 0x{symbol:02x} appears more than once"
                )));
            }
        }
        let table = Self { codes };
        if let Some((a, b)) = table.prefix_conflict() {
            return Err(HuffmanError::MalformedCodeTable(format!(
                "code for 0x{a:02x} is a prefix of code for 0x{b:02x}"
            )));
        }
        Ok(table)
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// The inverse mapping, bitstring to symbol.
    pub fn inverse(&self) -> BTreeMap<Code, u8> {
        self.codes.iter().map(|(&s, c)| (c.clone(), s)).collect()
    }

    pub fn is_prefix_free(&self) -> bool {
        self.prefix_conflict().is_none()
    }

    /// First pair `(a, b)` where the code of `a` is a prefix of the code of `b`.
    ///
    /// In lexicographic order a prefix sorts directly before some extension of
    /// itself, so comparing neighbours is enough.
    fn prefix_conflict(&self) -> Option<(u8, u8)> {
        let mut sorted: Vec<(&Code, u8)> = self.codes.iter().map(|(&s, c)| (c, s)).collect();
        sorted.sort();
        sorted
            .windows(2)
            .find(|w| w[0].0.is_prefix_of(w[1].0))
            .map(|w| (w[0].1, w[1].1))
    }

    /// Sum of `code length * frequency` over all symbols in `freq`.
    ///
    /// Symbols without a code are skipped.
    pub fn weighted_length(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .filter_map(|(s, c)| self.get(s).map(|code| code.len() as u64 * c))
            .sum()
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }
}

fn collect_codes(node: &HuffmanNode, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Code>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code::from_bits(path.clone()));
        }
        HuffmanNode::Internal { left, right, .. } => {
            path.push(false);
            collect_codes(left, path, codes);
            path.pop();
            path.push(true);
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}

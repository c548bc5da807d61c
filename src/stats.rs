//! Compression statistics and per-symbol code report

use crate::code::CodeTable;
use crate::frequency::FrequencyTable;
use serde::{Deserialize, Serialize};

/// Size comparison between raw bytes, a fixed-width code and the Huffman code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    /// 8 bits per input byte.
    pub raw_bits: u64,
    /// Smallest fixed-width code able to tell the distinct symbols apart.
    pub fixed_bits: u64,
    pub huffman_bits: u64,
    /// Shannon entropy in bits per symbol.
    pub entropy_bits: f64,
    pub average_code_length: f64,
    pub ratio_raw: f64,
    pub ratio_fixed: f64,
}

impl CompressionStats {
    pub fn compute(freq: &FrequencyTable, table: &CodeTable) -> Self {
        let n = freq.total();
        let distinct = freq.len();
        let raw_bits = n * 8;
        let fixed_bits = n * fixed_width(distinct) as u64;
        let huffman_bits = table.weighted_length(freq);

        Self {
            symbol_count: n,
            distinct_symbols: distinct,
            raw_bits,
            fixed_bits,
            huffman_bits,
            entropy_bits: entropy(freq),
            average_code_length: ratio(huffman_bits, n),
            ratio_raw: ratio(huffman_bits, raw_bits),
            ratio_fixed: ratio(huffman_bits, fixed_bits),
        }
    }
}

/// `ceil(log2(distinct))`, but never below one bit.
fn fixed_width(distinct: usize) -> u32 {
    match distinct {
        0 | 1 => 1,
        d => usize::BITS - (d - 1).leading_zeros(),
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Shannon entropy of the distribution in bits per symbol.
pub fn entropy(freq: &FrequencyTable) -> f64 {
    let total = freq.total() as f64;
    if total == 0.0 {
        return 0.0;
    }
    freq.iter()
        .map(|(_, c)| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReportRow {
    pub symbol: u8,
    pub label: String,
    pub frequency: u64,
    pub code_length: usize,
    pub code: String,
}

/// One row per symbol, most frequent first, ties in ascending symbol order.
pub fn code_report(freq: &FrequencyTable, table: &CodeTable) -> Vec<CodeReportRow> {
    let mut rows: Vec<CodeReportRow> = freq
        .iter()
        .map(|(symbol, frequency)| {
            let code = table.get(symbol).map(ToString::to_string).unwrap_or_default();
            CodeReportRow {
                symbol,
                label: symbol_label(symbol),
                frequency,
                code_length: code.len(),
                code,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.symbol.cmp(&b.symbol)));
    rows
}

/// Printable name for a byte.
pub fn symbol_label(symbol: u8) -> String {
    match symbol {
        b'\n' => "\\n".to_string(),
        0..=31 | 127 => format!("CTRL({symbol})"),
        32..=126 => (symbol as char).to_string(),
        _ => format!("0x{symbol:02x}"),
    }
}

//! Bit packing: symbols to a dense bitstream

use crate::bitstream::Bitstream;
use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use tracing::debug;

/// Append the code of every input symbol, in order, to a new bitstream.
///
/// Every symbol is resolved against `table` before any bits are written, so a
/// missing symbol fails with [`HuffmanError::UnknownSymbol`] and no output.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<Bitstream> {
    let codes = input
        .iter()
        .map(|&symbol| {
            table
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol { symbol })
        })
        .collect::<Result<Vec<_>>>()?;

    let bit_len: usize = codes.iter().map(|c| c.len()).sum();
    let mut writer = BitWriter::endian(Vec::with_capacity(bit_len.div_ceil(8)), BigEndian);
    for code in codes {
        for &bit in code.bits() {
            writer.write_bit(bit)?;
        }
    }
    writer.byte_align()?;
    let bytes = writer.into_writer();

    debug!(
        symbols = input.len(),
        bits = bit_len,
        bytes = bytes.len(),
        "packed bitstream"
    );
    Bitstream::from_parts(bytes, bit_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Code;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        CodeTable::from_codes(entries.iter().map(|&(s, c)| (s, c.parse::<Code>().unwrap()))).unwrap()
    }

    #[test]
    fn test_pack_msb_first() {
        let t = table(&[(b'c', "0"), (b'a', "10"), (b'b', "11")]);
        let stream = encode(b"abc", &t).unwrap();
        assert_eq!(stream.bit_len(), 5);
        assert_eq!(stream.as_bytes(), &[0b1011_0000]);
        assert_eq!(stream.padding_bits(), 3);
    }

    #[test]
    fn test_pack_across_byte_boundary() {
        let t = table(&[(b'x', "1"), (b'y', "0")]);
        let stream = encode(b"xxxxxxxxyx", &t).unwrap();
        assert_eq!(stream.bit_len(), 10);
        assert_eq!(stream.as_bytes(), &[0xFF, 0b0100_0000]);
    }

    #[test]
    fn test_exact_byte_has_no_padding() {
        let t = table(&[(b'x', "1"), (b'y', "0")]);
        let stream = encode(b"xyxyxyxy", &t).unwrap();
        assert_eq!(stream.as_bytes(), &[0b1010_1010]);
        assert_eq!(stream.padding_bits(), 0);
    }

    #[test]
    fn test_unknown_symbol() {
        let t = table(&[(b'x', "1"), (b'y', "0")]);
        let result = encode(b"xyz", &t);
        assert!(matches!(result, Err(HuffmanError::UnknownSymbol { symbol: b'z' })));
    }

    #[test]
    fn test_empty_input_packs_to_nothing() {
        let t = table(&[(b'x', "1")]);
        let stream = encode(b"", &t).unwrap();
        assert!(stream.is_empty());
        assert!(stream.as_bytes().is_empty());
    }
}

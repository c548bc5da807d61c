//! Bit unpacking: dense bitstream back to symbols

use crate::bitstream::Bitstream;
use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::trie::{DecodeTrie, Step};
use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::Cursor;
use tracing::{debug, warn};

/// Decode exactly `expected_symbols` symbols from `stream`.
///
/// Decoding stops once the expected count is reached; bits after that point
/// (including byte padding) are not interpreted. Running out of valid bits
/// first fails with [`HuffmanError::TruncatedStream`].
pub fn decode(stream: &Bitstream, table: &CodeTable, expected_symbols: usize) -> Result<Vec<u8>> {
    decode_with(stream, table, expected_symbols, false)
}

/// Like [`decode`], optionally failing with [`HuffmanError::TrailingBits`]
/// when valid bits remain after the last expected symbol.
pub fn decode_with(
    stream: &Bitstream,
    table: &CodeTable,
    expected_symbols: usize,
    reject_trailing_bits: bool,
) -> Result<Vec<u8>> {
    if table.is_empty() {
        return Err(HuffmanError::MalformedCodeTable("code table has no entries".into()));
    }

    let (output, consumed) = if table.len() == 1 {
        decode_single(stream, table, expected_symbols)?
    } else {
        decode_trie(stream, table, expected_symbols)?
    };

    let unused = stream.bit_len() - consumed;
    if reject_trailing_bits && unused > 0 {
        warn!(unused, "valid bits left after last symbol");
        return Err(HuffmanError::TrailingBits { unused });
    }

    debug!(
        symbols = output.len(),
        bits = consumed,
        "unpacked bitstream"
    );
    Ok(output)
}

/// A lone symbol carries no information per occurrence: emit it `expected`
/// times, provided the stream is long enough to have held that many codes.
fn decode_single(stream: &Bitstream, table: &CodeTable, expected: usize) -> Result<(Vec<u8>, usize)> {
    let Some((symbol, code)) = table.iter().next() else {
        return Err(HuffmanError::MalformedCodeTable("code table has no entries".into()));
    };
    let needed = code.len().saturating_mul(expected);
    if stream.bit_len() < needed {
        warn!(have = stream.bit_len(), needed, "single-symbol stream too short");
        return Err(HuffmanError::TruncatedStream {
            bits_read: stream.bit_len(),
            decoded: stream.bit_len() / code.len(),
        });
    }
    Ok((vec![symbol; expected], needed))
}

fn decode_trie(stream: &Bitstream, table: &CodeTable, expected: usize) -> Result<(Vec<u8>, usize)> {
    let trie = DecodeTrie::build(table)?;
    let mut reader = BitReader::endian(Cursor::new(stream.as_bytes()), BigEndian);
    // every symbol costs at least one bit
    let mut output = Vec::with_capacity(expected.min(stream.bit_len()));
    let mut node = trie.root();
    let mut pos = 0usize;

    while output.len() < expected {
        if pos == stream.bit_len() {
            warn!(bits_read = pos, decoded = output.len(), "bitstream ended mid-code");
            return Err(HuffmanError::TruncatedStream {
                bits_read: pos,
                decoded: output.len(),
            });
        }
        let bit = reader.read_bit()?;
        pos += 1;
        match trie.step(node, bit) {
            Step::Node(next) => node = next,
            Step::Symbol(symbol) => {
                output.push(symbol);
                node = trie.root();
            }
            Step::Dead => {
                warn!(bit_offset = pos - 1, "bit sequence matches no code");
                return Err(HuffmanError::InvalidCode { bit_offset: pos - 1 });
            }
        }
    }
    Ok((output, pos))
}

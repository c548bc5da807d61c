//! Symbol frequency analysis

/// Occurrence counts for every byte value present in an input.
///
/// Symbols that never occur have no entry: `get` returns `None` for them and
/// `iter` skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Count each byte of `input`.
    pub fn count(input: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in input {
            counts[b as usize] += 1;
        }
        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self {
            counts,
            distinct,
            total: input.len() as u64,
        }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            c => Some(c),
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, equal to the input length.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_basic() {
        let freq = FrequencyTable::count(b"abracadabra");
        assert_eq!(freq.get(b'a'), Some(5));
        assert_eq!(freq.get(b'b'), Some(2));
        assert_eq!(freq.get(b'r'), Some(2));
        assert_eq!(freq.get(b'c'), Some(1));
        assert_eq!(freq.get(b'd'), Some(1));
        assert_eq!(freq.len(), 5);
        assert_eq!(freq.total(), 11);
    }

    #[test]
    fn test_absent_symbols_have_no_entry() {
        let freq = FrequencyTable::count(b"zz");
        assert_eq!(freq.get(b'a'), None);
        assert_eq!(freq.iter().collect::<Vec<_>>(), vec![(b'z', 2)]);
    }

    #[test]
    fn test_empty_input() {
        let freq = FrequencyTable::count(b"");
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
        assert_eq!(freq.iter().count(), 0);
    }

    #[test]
    fn test_counts_sum_to_length() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let freq = FrequencyTable::count(&data);
        assert_eq!(freq.iter().map(|(_, c)| c).sum::<u64>(), data.len() as u64);
        assert_eq!(freq.len(), 256);
    }
}

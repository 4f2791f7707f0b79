/// Occurrence count for every byte value of one input buffer.
///
/// Built once per input and never mutated afterwards. Absent symbols keep a
/// count of zero and are skipped by [`FrequencyTable::iter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        data.iter().for_each(|&byte| {
            counts[byte as usize] += 1;
        });
        FrequencyTable { counts }
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }

    /// Sum of all counts, which equals the length of the scanned input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count != 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_byte() {
        let table = FrequencyTable::from_bytes(b"aabbbcccc");
        assert_eq!(table.get(b'a'), 2);
        assert_eq!(table.get(b'b'), 3);
        assert_eq!(table.get(b'c'), 4);
        assert_eq!(table.get(b'd'), 0);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 9);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn iter_skips_absent_symbols_in_order() {
        let table = FrequencyTable::from_bytes(&[255, 0, 7, 0]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 2), (7, 1), (255, 1)]);
    }
}

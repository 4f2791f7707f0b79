use std::collections::BTreeMap;
use std::fmt;

use tracing::trace;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree, NodeId};

/// Widest code a [`Code`] can hold.
///
/// A tree deeper than this needs a total weight beyond any buffer that fits
/// in memory (the weights along the deepest path grow at least like the
/// fibonacci sequence).
pub const MAX_CODE_LEN: usize = 64;

/// A prefix code packed into the low `len` bits of `bits`.
///
/// The most significant of those bits is the first one emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Builds a code from its packed value. Bits above `len` must be zero.
    pub fn new(bits: u64, len: u8) -> Option<Self> {
        let len_usize = len as usize;
        if len == 0 || len_usize > MAX_CODE_LEN {
            return None;
        }
        if len_usize < 64 && bits >> len != 0 {
            return None;
        }
        Some(Code { bits, len })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Bit `index` counted from the first emitted bit.
    pub fn bit(&self, index: usize) -> bool {
        (self.bits >> (self.len() - 1 - index)) & 1 == 1
    }

    /// Iterates bits in emission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |index| self.bit(index))
    }

    /// True when `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping. Iteration is in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derives codes by walking the tree, a zero bit for each zero-child step
    /// and a one bit for each one-child step.
    ///
    /// A tree whose root is a leaf gives that symbol the single-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = BTreeMap::new();
        if let Some(root) = tree.root() {
            if let HuffmanNode::Leaf { symbol, .. } = tree.node(root) {
                codes.insert(*symbol, Code { bits: 0, len: 1 });
            } else {
                Self::walk(tree, root, 0, 0, &mut codes)?;
            }
        }
        trace!(symbols = codes.len(), "derived code table");
        Ok(CodeTable { codes })
    }

    fn walk(
        tree: &HuffmanTree,
        id: NodeId,
        bits: u64,
        depth: usize,
        codes: &mut BTreeMap<u8, Code>,
    ) -> Result<()> {
        match tree.node(id) {
            HuffmanNode::Leaf { symbol, .. } => {
                if depth > MAX_CODE_LEN {
                    return Err(HuffmanError::CodeTooLong {
                        symbol: *symbol,
                        len: depth,
                    });
                }
                codes.insert(
                    *symbol,
                    Code {
                        bits,
                        len: depth as u8,
                    },
                );
            }
            HuffmanNode::Internal { zero, one, .. } => {
                let shifted = bits << 1;
                Self::walk(tree, *zero, shifted, depth + 1, codes)?;
                Self::walk(tree, *one, shifted | 1, depth + 1, codes)?;
            }
        }
        Ok(())
    }

    /// Table from explicit `(symbol, code)` pairs, as stored in a container.
    pub fn from_codes(entries: impl IntoIterator<Item = (u8, Code)>) -> Result<Self> {
        let mut codes = BTreeMap::new();
        for (symbol, code) in entries {
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::corrupt(format!(
                    "symbol {symbol:#04x} appears twice in code table"
                )));
            }
        }
        Ok(CodeTable { codes })
    }

    /// Rebuilds the canonical table for a set of code lengths.
    ///
    /// Codes are handed out in `(length, symbol)` order, each one the
    /// previous code plus one, shifted left whenever the length grows.
    pub fn from_lengths(entries: impl IntoIterator<Item = (u8, usize)>) -> Result<Self> {
        let mut lengths: Vec<(usize, u8)> = Vec::new();
        let mut seen = [false; 256];
        for (symbol, len) in entries {
            if len == 0 || len > MAX_CODE_LEN {
                return Err(HuffmanError::corrupt(format!(
                    "symbol {symbol:#04x} has invalid code length {len}"
                )));
            }
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(HuffmanError::corrupt(format!(
                    "symbol {symbol:#04x} appears twice in code table"
                )));
            }
            lengths.push((len, symbol));
        }
        lengths.sort_unstable();

        let mut codes = BTreeMap::new();
        // u128 so a full 64-bit length never overflows the shift
        let mut next: u128 = 0;
        let mut prev_len = 0usize;
        for (len, symbol) in lengths {
            next <<= len - prev_len;
            if next >= 1u128 << len {
                return Err(HuffmanError::corrupt(
                    "code lengths are oversubscribed".to_string(),
                ));
            }
            codes.insert(
                symbol,
                Code {
                    bits: next as u64,
                    len: len as u8,
                },
            );
            next += 1;
            prev_len = len;
        }
        Ok(CodeTable { codes })
    }

    /// Canonical form of this table: same lengths, normalized codes.
    pub fn canonical(&self) -> Result<Self> {
        Self::from_lengths(self.codes.iter().map(|(&symbol, code)| (symbol, code.len())))
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&symbol, &code)| (symbol, code))
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// No code is a prefix of, or equal to, another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<Code> = self.codes.values().copied().collect();
        // left-aligned order puts any prefix directly before some code it prefixes
        sorted.sort_unstable_by_key(|code| (code.bits << (64 - code.len()), code.len));
        sorted
            .windows(2)
            .all(|pair| !pair[0].is_prefix_of(&pair[1]))
    }

    /// Payload size in bits when encoding input with these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data));
        CodeTable::from_tree(&tree).unwrap()
    }

    fn code(text: &str) -> Code {
        let bits = u64::from_str_radix(text, 2).unwrap();
        Code::new(bits, text.len() as u8).unwrap()
    }

    #[test]
    fn scenario_codes() {
        let table = table_for(b"aabbbcccc");
        assert_eq!(table.get(b'c'), Some(code("0")));
        assert_eq!(table.get(b'a'), Some(code("10")));
        assert_eq!(table.get(b'b'), Some(code("11")));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn single_symbol_gets_one_bit_zero() {
        let table = table_for(b"aaaa");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'a'), Some(code("0")));
    }

    #[test]
    fn empty_tree_gives_empty_table() {
        let table = CodeTable::from_tree(&HuffmanTree::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn display_renders_bit_string() {
        assert_eq!(code("0110").to_string(), "0110");
        assert_eq!(code("1").to_string(), "1");
    }

    #[test]
    fn code_new_rejects_bad_shapes() {
        assert!(Code::new(0, 0).is_none());
        assert!(Code::new(0b100, 2).is_none());
        assert!(Code::new(0, 65).is_none());
        assert!(Code::new(u64::MAX, 64).is_some());
    }

    #[test]
    fn prefix_detection() {
        assert!(code("10").is_prefix_of(&code("101")));
        assert!(code("10").is_prefix_of(&code("10")));
        assert!(!code("11").is_prefix_of(&code("101")));
        assert!(!code("101").is_prefix_of(&code("10")));

        let bad = CodeTable::from_codes([(1, code("0")), (2, code("01")), (3, code("11"))])
            .unwrap();
        assert!(!bad.is_prefix_free());
    }

    #[test]
    fn canonical_keeps_lengths_and_orders_codes() {
        let table = table_for(b"aabbbcccc");
        let canonical = table.canonical().unwrap();
        assert_eq!(canonical.get(b'c'), Some(code("0")));
        assert_eq!(canonical.get(b'a'), Some(code("10")));
        assert_eq!(canonical.get(b'b'), Some(code("11")));

        let table = table_for(b"abcdefgh_hello world, hello huffman");
        let canonical = table.canonical().unwrap();
        assert!(canonical.is_prefix_free());
        for (symbol, code) in table.iter() {
            assert_eq!(canonical.get(symbol).unwrap().len(), code.len());
        }
    }

    #[test]
    fn from_lengths_rejects_invalid_sets() {
        assert!(matches!(
            CodeTable::from_lengths([(1, 1), (2, 1), (3, 1)]),
            Err(HuffmanError::CorruptStream(_))
        ));
        assert!(matches!(
            CodeTable::from_lengths([(1, 0)]),
            Err(HuffmanError::CorruptStream(_))
        ));
        assert!(matches!(
            CodeTable::from_lengths([(1, 1), (1, 2)]),
            Err(HuffmanError::CorruptStream(_))
        ));
    }

    #[test]
    fn from_lengths_accepts_full_width_codes() {
        let mut lengths: Vec<(u8, usize)> = (0..64).map(|len| (len as u8, len + 1)).collect();
        lengths.push((64, 64));
        let table = CodeTable::from_lengths(lengths).unwrap();
        assert_eq!(table.max_len(), 64);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn encoded_bit_len_matches_scenario() {
        let frequencies = FrequencyTable::from_bytes(b"aabbbcccc");
        let table = CodeTable::from_tree(&HuffmanTree::build(&frequencies)).unwrap();
        assert_eq!(table.encoded_bit_len(&frequencies), 2 * 2 + 3 * 2 + 4);
    }
}

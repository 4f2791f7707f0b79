use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};

#[derive(Debug, Clone, Copy, Default)]
struct TrieNode {
    children: [Option<u32>; 2],
    symbol: Option<u8>,
}

/// Outcome of following one bit from a trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Reached a leaf; decoding restarts at the root.
    Symbol(u8),
    /// Still inside the trie at this node.
    Inner(u32),
    /// No code continues with this bit.
    Dead,
}

/// Decode structure rebuilt from a stored [`CodeTable`].
///
/// Each code is a path from the root, `0` selecting the first child and `1`
/// the second. Paths the table never uses stay empty, so a damaged payload
/// can walk into a dead end.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    pub const ROOT: u32 = 0;

    /// Fails with `CorruptStream` when two codes collide, i.e. one is equal
    /// to or a prefix of another.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![TrieNode::default()];

        for (symbol, code) in table.iter() {
            let mut current = Self::ROOT as usize;
            for bit in code.iter() {
                if nodes[current].symbol.is_some() {
                    return Err(collision(symbol));
                }
                let child = nodes[current].children[bit as usize];
                current = match child {
                    Some(next) => next as usize,
                    None => {
                        nodes.push(TrieNode::default());
                        let next = nodes.len() - 1;
                        nodes[current].children[bit as usize] = Some(next as u32);
                        next
                    }
                };
            }

            let leaf = &mut nodes[current];
            if leaf.symbol.is_some() || leaf.children.iter().any(Option::is_some) {
                return Err(collision(symbol));
            }
            leaf.symbol = Some(symbol);
        }

        Ok(DecodeTrie { nodes })
    }

    pub fn step(&self, node: u32, bit: bool) -> Step {
        match self.nodes[node as usize].children[bit as usize] {
            None => Step::Dead,
            Some(next) => match self.nodes[next as usize].symbol {
                Some(symbol) => Step::Symbol(symbol),
                None => Step::Inner(next),
            },
        }
    }

    /// Number of trie nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

fn collision(symbol: u8) -> HuffmanError {
    HuffmanError::corrupt(format!(
        "code for symbol {symbol:#04x} collides with another code"
    ))
}

//! Decoding trie rebuilt from a code table
//!
//! The tree that produced a table is never transmitted, so the decoder
//! reconstructs an equivalent binary trie from the codes alone. Nodes live in
//! a flat arena and refer to their children by index.

use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<usize>; 2],
    symbol: Option<u8>,
}

/// Outcome of following one bit from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Node(usize),
    Symbol(u8),
    /// No code continues with this bit.
    Dead,
}

#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    pub fn build(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![TrieNode::default()];
        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(HuffmanError::MalformedCodeTable(format!(
                    "symbol 0x{symbol:02x} has an empty code"
                )));
            }
            let mut at = ROOT;
            for &bit in code.bits() {
                if nodes[at].symbol.is_some() {
                    return Err(prefix_error(symbol));
                }
                let child = nodes[at].children[bit as usize];
                at = match child {
                    Some(next) => next,
                    None => {
                        nodes.push(TrieNode::default());
                        let next = nodes.len() - 1;
                        nodes[at].children[bit as usize] = Some(next);
                        next
                    }
                };
            }
            let leaf = &mut nodes[at];
            if leaf.symbol.is_some() || leaf.children.iter().any(Option::is_some) {
                return Err(prefix_error(symbol));
            }
            leaf.symbol = Some(symbol);
        }
        Ok(Self { nodes })
    }

    pub fn root(&self) -> usize {
        ROOT
    }

    pub fn step(&self, node: usize, bit: bool) -> Step {
        match self.nodes[node].children[bit as usize] {
            None => Step::Dead,
            Some(next) => match self.nodes[next].symbol {
                Some(symbol) => Step::Symbol(symbol),
                None => Step::Node(next),
            },
        }
    }
}

fn prefix_error(symbol: u8) -> HuffmanError {
    HuffmanError::MalformedCodeTable(format!(
        "code for 0x{symbol:02x} overlaps another code"
    ))
}

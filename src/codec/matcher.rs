use crate::{code_table::{Code, CodeTable}, HuffError, Result, Symbol};

/// Outcome of feeding one bit to a [`PrefixMatcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The bits since the last match form the code of this symbol.
    Emit(Symbol),
    /// The bits so far are a proper prefix of at least one code.
    Pending,
    /// No code starts with the bits so far.
    Dead,
}

/// Incremental prefix-code matcher driven one bit at a time.
pub trait PrefixMatcher {
    fn push_bit(&mut self, bit: bool) -> Step;

    /// True when no bits are pending since the last emitted symbol.
    fn is_idle(&self) -> bool;
}

const NO_CHILD: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct TrieNode {
    children: [u32; 2],
    symbol: Option<Symbol>,
}

impl TrieNode {
    fn empty() -> Self {
        Self { children: [NO_CHILD; 2], symbol: None }
    }
}

/// Binary trie over the table's codes, stored as an arena. One step per bit.
#[derive(Clone, Debug)]
pub struct TrieMatcher {
    nodes: Vec<TrieNode>,
    current: u32,
}

impl TrieMatcher {
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![TrieNode::empty()];

        for (symbol, code) in table.iter() {
            let mut node = 0usize;
            for &bit in code.bits() {
                if nodes[node].symbol.is_some() {
                    return Err(HuffError::malformed(format!("code {code} of symbol {symbol:#04x} extends another code")));
                }
                let next = nodes[node].children[bit as usize];
                node = if next == NO_CHILD {
                    nodes.push(TrieNode::empty());
                    let created = nodes.len() - 1;
                    nodes[node].children[bit as usize] = created as u32;
                    created
                } else {
                    next as usize
                };
            }

            let leaf = &mut nodes[node];
            if node == 0 || leaf.symbol.is_some() || leaf.children != [NO_CHILD; 2] {
                return Err(HuffError::malformed(format!("code {code} of symbol {symbol:#04x} is ambiguous")));
            }
            leaf.symbol = Some(symbol);
        }

        Ok(Self { nodes, current: 0 })
    }
}

impl PrefixMatcher for TrieMatcher {
    #[inline(always)]
    fn push_bit(&mut self, bit: bool) -> Step {
        let next = self.nodes[self.current as usize].children[bit as usize];
        if next == NO_CHILD {
            return Step::Dead;
        }

        match self.nodes[next as usize].symbol {
            Some(symbol) => {
                self.current = 0;
                Step::Emit(symbol)
            }
            None => {
                self.current = next;
                Step::Pending
            }
        }
    }

    fn is_idle(&self) -> bool {
        self.current == 0
    }
}

/// Accumulates a candidate code and scans the whole table for an exact match
/// after every bit.
#[derive(Clone, Debug)]
pub struct LinearScanMatcher<'a> {
    table: &'a CodeTable,
    candidate: Code,
    max_len: usize,
}

impl<'a> LinearScanMatcher<'a> {
    pub fn new(table: &'a CodeTable) -> Self {
        Self { table, candidate: Code::new(), max_len: table.max_code_len() }
    }
}

impl PrefixMatcher for LinearScanMatcher<'_> {
    fn push_bit(&mut self, bit: bool) -> Step {
        self.candidate.push(bit);

        if let Some((symbol, _)) = self.table.iter().find(|(_, code)| **code == self.candidate) {
            self.candidate.clear();
            return Step::Emit(symbol);
        }

        // The candidate only grows, so once it is as long as the longest code
        // it can never match.
        if self.candidate.len() >= self.max_len {
            Step::Dead
        } else {
            Step::Pending
        }
    }

    fn is_idle(&self) -> bool {
        self.candidate.is_empty()
    }
}

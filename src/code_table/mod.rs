use std::{collections::BTreeMap, fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{frequency::FrequencyMap, tree::{HuffNode, HuffmanTree}, HuffError, Result, Symbol};

/// Largest code length the 1-byte length field can describe.
pub const MAX_CODE_LEN: usize = u8::MAX as usize;

/// A bit-code, most significant (first transmitted) bit first.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn child(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in self.bits.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({self})")
    }
}

/// Parses a string of `'0'` and `'1'` characters.
impl FromStr for Code {
    type Err = HuffError;

    fn from_str(s: &str) -> Result<Self> {
        s.bytes()
            .map(|b| match b {
                b'0' => Ok(false),
                b'1' => Ok(true),
                other => Err(HuffError::InvalidInput(format!("{:?} is not a bit", other as char))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Code::from_bits)
    }
}

/// Symbol to code mapping, kept symbol-ascending.
///
/// Every table is prefix-free with non-empty codes: tables derived from a
/// tree are so by construction, tables assembled from arbitrary codes are
/// checked by [`CodeTable::from_codes`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, Code>,
}

impl CodeTable {
    /// Walks the tree root-down, accumulating the bit path to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    codes.insert(*symbol, code);
                }
                HuffNode::Internal { zero, one, .. } => {
                    if let Some(one) = one {
                        stack.push((one.as_ref(), code.child(true)));
                    }
                    stack.push((zero.as_ref(), code.child(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn from_codes<I: IntoIterator<Item = (Symbol, Code)>>(codes: I) -> Result<Self> {
        let mut table = BTreeMap::new();

        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(HuffError::malformed(format!("symbol {symbol:#04x} has an empty code")));
            }
            if table.insert(symbol, code).is_some() {
                return Err(HuffError::malformed(format!("symbol {symbol:#04x} appears twice in the table")));
            }
        }

        // Sorted codes put every prefix right before the codes it prefixes.
        let mut sorted: Vec<_> = table.iter().map(|(&s, c)| (c, s)).collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            let ((shorter, a), (longer, b)) = (pair[0], pair[1]);
            if shorter.is_prefix_of(longer) {
                return Err(HuffError::malformed(format!(
                    "code {shorter} of symbol {a:#04x} is a prefix of code {longer} of symbol {b:#04x}"
                )));
            }
        }

        Ok(Self { codes: table })
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Number of body bits needed to encode a message with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyMap) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |c| c.len() as u64))
            .sum()
    }

    /// Size in bytes of the serialized form.
    pub fn serialized_len(&self) -> usize {
        self.codes.values().map(|code| 2 + code.len()).sum()
    }

    /// `{ symbol, code length, one ASCII '0'/'1' byte per bit }` per entry,
    /// symbol-ascending.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.serialized_len());

        for (&symbol, code) in self.codes.iter() {
            if code.len() > MAX_CODE_LEN {
                return Err(HuffError::CodeTooLong { symbol, len: code.len() });
            }

            bytes.push(symbol);
            bytes.push(code.len() as u8);
            bytes.extend(code.bits().iter().map(|&bit| if bit { b'1' } else { b'0' }));
        }

        trace!("serialized {} table entries into {} bytes", self.codes.len(), bytes.len());
        Ok(bytes)
    }

    /// Inverse of [`CodeTable::serialize`]. Bit bytes may be ASCII `'0'`/`'1'`
    /// or raw `0`/`1`.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut i = 0;

        while i < data.len() {
            if i + 2 > data.len() {
                return Err(HuffError::malformed(format!("table entry at offset {i} is truncated")));
            }
            let symbol = data[i];
            let len = data[i + 1] as usize;
            i += 2;

            let Some(raw_bits) = data.get(i..i + len) else {
                return Err(HuffError::malformed(format!(
                    "code of symbol {symbol:#04x} declares {len} bits but only {} bytes remain",
                    data.len() - i
                )));
            };

            let bits = raw_bits
                .iter()
                .map(|&b| match b {
                    b'0' | 0 => Ok(false),
                    b'1' | 1 => Ok(true),
                    other => Err(HuffError::malformed(format!(
                        "byte {other:#04x} in the code of symbol {symbol:#04x} is not a bit"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;

            entries.push((symbol, Code::from_bits(bits)));
            i += len;
        }

        Self::from_codes(entries)
    }
}

use std::collections::BTreeMap;

use crate::Symbol;

/// Occurrence count of every byte value present in a message.
///
/// Iteration is symbol-ascending, which is what makes tree construction
/// reproducible from run to run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyMap {
    pub fn count(message: &[u8]) -> Self {
        let mut histogram = [0u64; 256];
        for &byte in message {
            histogram[byte as usize] += 1;
        }

        histogram
            .iter()
            .enumerate()
            .map(|(symbol, &count)| (symbol as Symbol, count))
            .collect()
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

/// Zero counts are dropped; repeated symbols accumulate.
impl FromIterator<(Symbol, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            if count == 0 {
                continue;
            }
            *counts.entry(symbol).or_insert(0) += count;
        }
        Self { counts }
    }
}

#[test]
fn test_count_exact() {
    let freqs = FrequencyMap::count(b"abracadabra");

    assert_eq!(freqs.len(), 5);
    assert_eq!(freqs.get(b'a'), Some(5));
    assert_eq!(freqs.get(b'b'), Some(2));
    assert_eq!(freqs.get(b'r'), Some(2));
    assert_eq!(freqs.get(b'c'), Some(1));
    assert_eq!(freqs.get(b'd'), Some(1));
    assert_eq!(freqs.get(b'z'), None);
    assert_eq!(freqs.total(), 11);
}

#[test]
fn test_count_empty() {
    let freqs = FrequencyMap::count(&[]);

    assert!(freqs.is_empty());
    assert_eq!(freqs.total(), 0);
}

#[test]
fn test_iteration_is_symbol_ascending() {
    let freqs = FrequencyMap::count(&[0xFF, 0x00, 0x7F, 0x00]);
    let symbols: Vec<_> = freqs.iter().map(|(s, _)| s).collect();

    assert_eq!(symbols, vec![0x00, 0x7F, 0xFF]);
}

#[test]
fn test_from_pairs_drops_zero_counts() {
    let freqs: FrequencyMap = vec![(1, 0), (2, 3), (2, 4)].into_iter().collect();

    assert_eq!(freqs.len(), 1);
    assert_eq!(freqs.get(2), Some(7));
}

//! Symbol frequency analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Occurrence count per distinct symbol, ordered by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "S: Symbol")]
pub struct FrequencyTable<S: Symbol> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count every symbol of `symbols`. Empty input yields an empty table.
    pub fn from_symbols(symbols: &[S]) -> Self {
        let mut counts = BTreeMap::new();
        for &s in symbols {
            *counts.entry(s).or_insert(0u64) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Shannon entropy in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for &f in self.counts.values() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}

impl<S: Symbol> FromIterator<(S, u64)> for FrequencyTable<S> {
    /// Build a table from explicit counts. Zero counts are dropped; repeated
    /// symbols accumulate.
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (s, c) in iter.into_iter().filter(|&(_, c)| c > 0) {
            *counts.entry(s).or_insert(0u64) += c;
        }
        Self { counts }
    }
}

//! Code table generation from a Huffman tree

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};
use crate::symbol::Symbol;

/// Root-to-leaf path of one symbol: `false` is a left step, `true` a right step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code(bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(CodecError::SerializationError(format!(
                    "invalid bit character {:?} in code",
                    other
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Code)
    }
}

/// Mapping from symbol to its prefix-free code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "S: Symbol")]
pub struct CodeTable<S: Symbol> {
    codes: BTreeMap<S, Code>,
}

impl<S: Symbol> Default for CodeTable<S> {
    fn default() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }
}

impl<S: Symbol> CodeTable<S> {
    /// Walk `tree` depth-first and record the path to every leaf.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Result<Self> {
        let mut table = Self::default();
        let root = tree.root();
        if root.is_leaf() {
            let symbol = root
                .symbol()
                .ok_or_else(|| CodecError::MalformedTree("root leaf has no symbol".into()))?;
            table.codes.insert(symbol, Code(vec![false]));
            return Ok(table);
        }
        let mut path = Vec::new();
        collect_codes(root, &mut path, &mut table.codes)?;
        Ok(table)
    }

    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.codes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &Code)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Sum of `frequency * code length` over the symbols of `frequencies`.
    ///
    /// Symbols absent from the table contribute nothing.
    pub fn weighted_length(&self, frequencies: &FrequencyTable<S>) -> u64 {
        frequencies
            .iter()
            .filter_map(|(s, count)| self.codes.get(&s).map(|c| count * c.len() as u64))
            .sum()
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        // a prefix sorts directly before its extensions
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
}

impl<S: Symbol> FromIterator<(S, Code)> for CodeTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<S: Symbol> fmt::Display for CodeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Dictionary:")?;
        for (symbol, code) in self.iter() {
            writeln!(f, "{}: {}", symbol.label(), code)?;
        }
        Ok(())
    }
}

fn collect_codes<S: Symbol>(
    node: &HuffmanNode<S>,
    path: &mut Vec<bool>,
    codes: &mut BTreeMap<S, Code>,
) -> Result<()> {
    match (node.symbol(), node.left(), node.right()) {
        (Some(symbol), None, None) => {
            if codes.insert(symbol, Code(path.clone())).is_some() {
                return Err(CodecError::MalformedTree(format!(
                    "symbol {} appears in more than one leaf",
                    symbol.label()
                )));
            }
            Ok(())
        }
        (None, Some(left), Some(right)) => {
            path.push(false);
            collect_codes(left, path, codes)?;
            path.pop();
            path.push(true);
            collect_codes(right, path, codes)?;
            path.pop();
            Ok(())
        }
        (None, Some(_), None) | (None, None, Some(_)) => Err(CodecError::MalformedTree(format!(
            "node at path '{}' has exactly one child",
            Code(path.clone())
        ))),
        _ => Err(CodecError::MalformedTree(format!(
            "node at path '{}' is neither a leaf nor a full internal node",
            Code(path.clone())
        ))),
    }
}

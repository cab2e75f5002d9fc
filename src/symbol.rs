//! Input alphabets understood by the codec.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An atomic unit of the input alphabet.
///
/// Implemented for raw bytes and for Unicode scalar values. Ordering is by
/// value and decides leaf insertion order in the tree builder.
pub trait Symbol: Copy + Ord + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Render the symbol for dictionary listings and error messages.
    fn label(&self) -> String;
}

impl Symbol for u8 {
    fn label(&self) -> String {
        if self.is_ascii_graphic() || *self == b' ' {
            format!("'{}'", *self as char)
        } else {
            format!("0x{:02x}", self)
        }
    }
}

impl Symbol for char {
    fn label(&self) -> String {
        format!("'{}'", self.escape_debug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolUnit {
    Byte,
    Char,
}

impl std::str::FromStr for SymbolUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "byte" | "bytes" => Ok(SymbolUnit::Byte),
            "char" | "chars" | "text" => Ok(SymbolUnit::Char),
            other => Err(format!("unknown symbol unit '{}', expected byte or char", other)),
        }
    }
}

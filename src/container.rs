//! Persisted form of an encoded input: its code table plus the packed stream.
//!
//! Packages are bincode-encoded. The decoding tree is rebuilt from the code
//! table on load, so frequencies are never stored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitstream::EncodedStream;
use crate::code_table::CodeTable;
use crate::decoder;
use crate::error::Result;
use crate::symbol::{Symbol, SymbolUnit};
use crate::tree::HuffmanTree;

/// A code table and the stream it encoded, for one symbol type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "S: Symbol")]
pub struct Packed<S: Symbol> {
    pub table: CodeTable<S>,
    pub stream: EncodedStream,
}

impl<S: Symbol> Packed<S> {
    pub fn new(table: CodeTable<S>, stream: EncodedStream) -> Self {
        Self { table, stream }
    }

    /// Rebuild the tree from the stored table and decode the stream.
    pub fn decode(&self) -> Result<Vec<S>> {
        if self.stream.is_empty() && self.stream.symbol_count().unwrap_or(0) == 0 {
            return Ok(Vec::new());
        }
        let tree = HuffmanTree::from_code_table(&self.table)?;
        decoder::decode(&self.stream, &tree)
    }
}

/// A stored encoding, tagged by the symbol unit its input was split into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Package {
    Bytes(Packed<u8>),
    Text(Packed<char>),
}

impl Package {
    pub fn unit(&self) -> SymbolUnit {
        match self {
            Package::Bytes(_) => SymbolUnit::Byte,
            Package::Text(_) => SymbolUnit::Char,
        }
    }

    pub fn stream(&self) -> &EncodedStream {
        match self {
            Package::Bytes(p) => &p.stream,
            Package::Text(p) => &p.stream,
        }
    }

    /// Human-readable "symbol: code" listing of the table.
    pub fn dictionary(&self) -> String {
        match self {
            Package::Bytes(p) => p.table.to_string(),
            Package::Text(p) => p.table.to_string(),
        }
    }

    /// Decode back to raw bytes; text packages are re-encoded as UTF-8.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Package::Bytes(p) => p.decode(),
            Package::Text(p) => Ok(p.decode()?.into_iter().collect::<String>().into_bytes()),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let package: Package = bincode::deserialize(data)?;
        package.stream().validate()?;
        Ok(package)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote package");
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read package");
        Self::from_bytes(&bytes)
    }
}

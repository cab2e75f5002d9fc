//! huffman-codec: deterministic Huffman coding over bytes or characters.
//!
//! The pipeline is strictly ordered:
//! - frequency analysis of the input symbols
//! - tree construction with a fixed tie-break rule
//! - code table derivation from the tree
//! - bit-packed encoding, and tree-walking decoding
//!
//! [`encode`] hands the tree back to the caller, who threads it into
//! [`decode`]. For persistence, a [`container::Package`] stores the code table
//! and the stream and rebuilds the tree when loaded.

pub mod baseline;
pub mod bitstream;
pub mod code_table;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod report;
pub mod symbol;
pub mod tree;

use tracing::{debug, warn};

pub use crate::bitstream::EncodedStream;
pub use crate::code_table::{Code, CodeTable};
pub use crate::config::CodecConfig;
pub use crate::container::{Package, Packed};
pub use crate::error::{CodecError, Result};
pub use crate::frequency::FrequencyTable;
pub use crate::report::CompressionReport;
pub use crate::symbol::{Symbol, SymbolUnit};
pub use crate::tree::{HuffmanNode, HuffmanTree};

/// Output of [`encode`]: the stream plus the tree needed to decode it.
///
/// `tree` is `None` only for empty input, whose stream is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<S: Symbol> {
    pub stream: EncodedStream,
    pub tree: Option<HuffmanTree<S>>,
}

impl<S: Symbol> Encoded<S> {
    pub fn code_table(&self) -> Result<CodeTable<S>> {
        match &self.tree {
            Some(tree) => CodeTable::from_tree(tree),
            None => Ok(CodeTable::default()),
        }
    }

    pub fn decode(&self) -> Result<Vec<S>> {
        match &self.tree {
            Some(tree) => decode(&self.stream, tree),
            None if self.stream.is_empty() => Ok(Vec::new()),
            None => Err(CodecError::EmptyAlphabet),
        }
    }

    /// Drop the tree in favour of its code table, for storage.
    pub fn into_packed(self) -> Result<Packed<S>> {
        let table = self.code_table()?;
        Ok(Packed::new(table, self.stream))
    }
}

/// Count, build, derive codes and encode `symbols` in one pass.
pub fn encode<S: Symbol>(symbols: &[S]) -> Result<Encoded<S>> {
    encode_with_frequencies(symbols, &FrequencyTable::from_symbols(symbols))
}

/// Like [`encode`], reusing a frequency table already counted over `symbols`.
///
/// A symbol missing from `frequencies` fails with `UnknownSymbol`.
pub fn encode_with_frequencies<S: Symbol>(
    symbols: &[S],
    frequencies: &FrequencyTable<S>,
) -> Result<Encoded<S>> {
    if frequencies.is_empty() {
        return Ok(Encoded {
            stream: EncodedStream::default(),
            tree: None,
        });
    }
    let tree = HuffmanTree::build(frequencies)?;
    let table = CodeTable::from_tree(&tree)?;
    let stream = encoder::encode_with_table(symbols, &table)?;
    Ok(Encoded {
        stream,
        tree: Some(tree),
    })
}

/// Invert [`encode`] using the tree it returned.
pub fn decode<S: Symbol>(stream: &EncodedStream, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    decoder::decode(stream, tree)
}

/// Compressed output container
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompressedOutput {
    pub package: Package,
    pub original_size: usize,
    /// Packed stream bytes, excluding the code table.
    pub compressed_size: usize,
    pub ratio: f64,
    pub metadata: CompressionMetadata,
}

/// Statistics gathered while compressing
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompressionMetadata {
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    pub bit_len: u64,
    pub entropy_bits: f64,
}

/// Configured entry point over raw input bytes.
#[derive(Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Create a codec, rejecting an invalid configuration with `ConfigError`.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration the codec was created with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `data`, split into symbols according to the configured unit.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedOutput> {
        if data.len() > self.config.max_input_size {
            warn!(
                size = data.len(),
                limit = self.config.max_input_size,
                "input rejected"
            );
            return Err(CodecError::InputTooLarge {
                size: data.len(),
                limit: self.config.max_input_size,
            });
        }

        let (package, metadata) = match self.config.symbol_unit {
            SymbolUnit::Byte => {
                let (packed, metadata) = pack(data)?;
                (Package::Bytes(packed), metadata)
            }
            SymbolUnit::Char => {
                let chars: Vec<char> = std::str::from_utf8(data)?.chars().collect();
                let (packed, metadata) = pack(&chars)?;
                (Package::Text(packed), metadata)
            }
        };

        let compressed_size = package.stream().byte_len();
        let ratio = if data.is_empty() {
            1.0
        } else {
            compressed_size as f64 / data.len() as f64
        };
        debug!(
            unit = ?self.config.symbol_unit,
            original = data.len(),
            compressed = compressed_size,
            "compressed input"
        );

        Ok(CompressedOutput {
            package,
            original_size: data.len(),
            compressed_size,
            ratio,
            metadata,
        })
    }

    pub fn decompress(&self, output: &CompressedOutput) -> Result<Vec<u8>> {
        let data = output.package.decode_bytes()?;
        if data.len() != output.original_size {
            return Err(CodecError::SizeMismatch {
                expected: output.original_size,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    /// Compress `data` and measure the LZ4 and zlib baselines over the same bytes.
    pub fn report(&self, data: &[u8]) -> Result<CompressionReport> {
        let output = self.compress(data)?;
        Ok(CompressionReport {
            unit: output.package.unit(),
            original_size: output.original_size,
            symbol_count: output.metadata.symbol_count,
            distinct_symbols: output.metadata.distinct_symbols,
            huffman_bits: output.metadata.bit_len,
            huffman_bytes: output.compressed_size,
            entropy_bits: output.metadata.entropy_bits,
            lz4_size: Some(baseline::lz4_size(data, self.config.lz4_acceleration)?),
            zlib_size: Some(baseline::zlib_size(data, self.config.zlib_level)?),
        })
    }
}

fn pack<S: Symbol>(symbols: &[S]) -> Result<(Packed<S>, CompressionMetadata)> {
    let frequencies = FrequencyTable::from_symbols(symbols);
    let packed = encode_with_frequencies(symbols, &frequencies)?.into_packed()?;
    let metadata = CompressionMetadata {
        symbol_count: frequencies.total(),
        distinct_symbols: frequencies.len(),
        bit_len: packed.stream.bit_len(),
        entropy_bits: frequencies.entropy(),
    };
    Ok((packed, metadata))
}

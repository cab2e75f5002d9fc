//! Size comparison between the Huffman stream and baseline compressors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub unit: SymbolUnit,
    pub original_size: usize,
    pub symbol_count: u64,
    pub distinct_symbols: usize,
    pub huffman_bits: u64,
    /// Packed stream bytes; the size a caller would compare against.
    pub huffman_bytes: usize,
    /// Shannon entropy of the input in bits per symbol.
    pub entropy_bits: f64,
    pub lz4_size: Option<usize>,
    pub zlib_size: Option<usize>,
}

impl CompressionReport {
    /// Mean code length in bits per symbol.
    pub fn average_code_length(&self) -> f64 {
        if self.symbol_count == 0 {
            return 0.0;
        }
        self.huffman_bits as f64 / self.symbol_count as f64
    }

    pub fn huffman_ratio(&self) -> f64 {
        ratio(self.huffman_bytes, self.original_size)
    }
}

fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        1.0
    } else {
        compressed as f64 / original as f64
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            SymbolUnit::Byte => "bytes",
            SymbolUnit::Char => "chars",
        };
        writeln!(f, "Original size:           {} bytes", self.original_size)?;
        writeln!(
            f,
            "Symbols:                 {} {} ({} distinct)",
            self.symbol_count, unit, self.distinct_symbols
        )?;
        writeln!(
            f,
            "Huffman compressed size: {} bytes ({} bits, ratio {:.3})",
            self.huffman_bytes,
            self.huffman_bits,
            self.huffman_ratio()
        )?;
        writeln!(
            f,
            "Average code length:     {:.3} bits/symbol (entropy {:.3})",
            self.average_code_length(),
            self.entropy_bits
        )?;
        if let Some(size) = self.lz4_size {
            writeln!(
                f,
                "LZ4 compressed size:     {} bytes (ratio {:.3})",
                size,
                ratio(size, self.original_size)
            )?;
        }
        if let Some(size) = self.zlib_size {
            writeln!(
                f,
                "zlib compressed size:    {} bytes (ratio {:.3})",
                size,
                ratio(size, self.original_size)
            )?;
        }
        Ok(())
    }
}

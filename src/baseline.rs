//! General-purpose compressors used as size baselines.
//!
//! Only output sizes are reported; these never take part in encoding.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lz4::block::CompressionMode;

use crate::error::{CodecError, Result};

/// Size of the LZ4 block encoding of `data`, without a size prefix.
pub fn lz4_size(data: &[u8], acceleration: i32) -> Result<usize> {
    let mode = if acceleration > 1 {
        CompressionMode::FAST(acceleration)
    } else {
        CompressionMode::DEFAULT
    };
    let compressed = lz4::block::compress(data, Some(mode), false)
        .map_err(|e| CodecError::Baseline(format!("lz4: {}", e)))?;
    Ok(compressed.len())
}

/// Size of the zlib stream of `data` at `level`.
pub fn zlib_size(data: &[u8], level: u32) -> Result<usize> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| CodecError::Baseline(format!("zlib: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| CodecError::Baseline(format!("zlib: {}", e)))?;
    Ok(compressed.len())
}

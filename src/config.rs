//! Configuration for huffman-codec

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::symbol::SymbolUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Alphabet the input is split into before counting.
    pub symbol_unit: SymbolUnit,
    pub max_input_size: usize,
    /// Acceleration factor handed to the LZ4 fast mode when reporting.
    pub lz4_acceleration: i32,
    /// zlib level (0-9) used when reporting.
    pub zlib_level: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            symbol_unit: SymbolUnit::Byte,
            max_input_size: 100 * 1024 * 1024, // 100 MB
            lz4_acceleration: 1,
            zlib_level: 6,
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CodecError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_input_size == 0 {
            return Err(CodecError::ConfigError("max_input_size must be positive".into()));
        }
        if self.lz4_acceleration < 1 {
            return Err(CodecError::ConfigError(format!(
                "lz4_acceleration must be at least 1, got {}",
                self.lz4_acceleration
            )));
        }
        if self.zlib_level > 9 {
            return Err(CodecError::ConfigError(format!(
                "zlib_level must be within 0..=9, got {}",
                self.zlib_level
            )));
        }
        Ok(())
    }
}

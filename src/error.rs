//! Error types for huffman-codec

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot build a huffman tree from an empty alphabet")]
    EmptyAlphabet,

    #[error("malformed huffman tree: {0}")]
    MalformedTree(String),

    #[error("symbol {0} has no entry in the code table")]
    UnknownSymbol(String),

    #[error("stream ended mid-code after {bits} bits")]
    TruncatedStream { bits: u64 },

    #[error("corrupt stream at bit {position}: no child to follow")]
    CorruptStream { position: u64 },

    #[error("packed stream holds {bytes} bytes but declares {bits} bits")]
    InvalidStreamLength { bytes: usize, bits: u64 },

    #[error("decompression size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("input of {size} bytes exceeds the configured limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    #[error("text input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("baseline compressor error: {0}")]
    Baseline(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<bincode::Error> for CodecError {
    fn from(e: bincode::Error) -> Self {
        CodecError::SerializationError(e.to_string())
    }
}

//! Bitstream to symbol sequence

use tracing::debug;

use crate::bitstream::EncodedStream;
use crate::error::{CodecError, Result};
use crate::symbol::Symbol;
use crate::tree::HuffmanTree;

/// Walk `tree` bit by bit, emitting a symbol at every leaf.
///
/// The stream must end exactly on a symbol boundary. Missing children fail
/// with `CorruptStream`; a partial trailing code, or fewer symbols than the
/// stream records, fails with `TruncatedStream`.
pub fn decode<S: Symbol>(stream: &EncodedStream, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    stream.validate()?;
    if stream.is_empty() {
        check_symbol_count(stream, 0)?;
        return Ok(Vec::new());
    }

    let root = tree.root();
    if tree.is_degenerate() {
        let symbol = root
            .symbol()
            .ok_or_else(|| CodecError::MalformedTree("root leaf has no symbol".into()))?;
        let output = stream
            .bits()
            .enumerate()
            .map(|(position, bit)| {
                if bit {
                    Err(CodecError::CorruptStream {
                        position: position as u64,
                    })
                } else {
                    Ok(symbol)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        check_symbol_count(stream, output.len())?;
        return Ok(output);
    }

    let mut output = Vec::new();
    let mut current = root;
    let mut at_root = true;
    for (position, bit) in stream.bits().enumerate() {
        current = current.child(bit).ok_or(CodecError::CorruptStream {
            position: position as u64,
        })?;
        at_root = false;
        if current.is_leaf() {
            let symbol = current.symbol().ok_or(CodecError::CorruptStream {
                position: position as u64,
            })?;
            output.push(symbol);
            current = root;
            at_root = true;
        }
    }

    if !at_root {
        return Err(CodecError::TruncatedStream {
            bits: stream.bit_len(),
        });
    }
    check_symbol_count(stream, output.len())?;

    debug!(
        bits = stream.bit_len(),
        symbols = output.len(),
        "decoded stream"
    );
    Ok(output)
}

fn check_symbol_count(stream: &EncodedStream, decoded: usize) -> Result<()> {
    match stream.symbol_count() {
        Some(expected) if (decoded as u64) < expected => Err(CodecError::TruncatedStream {
            bits: stream.bit_len(),
        }),
        Some(expected) if (decoded as u64) > expected => Err(CodecError::CorruptStream {
            position: stream.bit_len(),
        }),
        _ => Ok(()),
    }
}

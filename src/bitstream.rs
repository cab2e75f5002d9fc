//! Bit-packed encoded streams
//!
//! Bits are packed MSB-first. The bit length is stored alongside the bytes so
//! the zero padding of the last byte is never read as code bits. Streams
//! produced by the encoder also record how many symbols they hold, which lets
//! the decoder detect a stream cut exactly on a code boundary.

use std::fmt;
use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};

use crate::code_table::Code;
use crate::error::{CodecError, Result};

/// Packed code bits with their exact length and, when known, the number of
/// symbols they encode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedStream {
    bytes: Vec<u8>,
    bit_len: u64,
    symbols: Option<u64>,
}

impl EncodedStream {
    /// Pack a sequence of codes, in order.
    pub fn from_codes<'a, I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Code>,
    {
        let mut bytes = Vec::new();
        let mut bit_len = 0u64;
        let mut symbols = 0u64;
        {
            let mut w = BitWriter::endian(&mut bytes, BigEndian);
            for code in codes {
                for &bit in code.bits() {
                    w.write_bit(bit)?;
                }
                bit_len += code.len() as u64;
                symbols += 1;
            }
            w.byte_align()?;
        }
        Ok(Self {
            bytes,
            bit_len,
            symbols: Some(symbols),
        })
    }

    /// Reassemble a stream from stored parts.
    pub fn from_parts(bytes: Vec<u8>, bit_len: u64) -> Result<Self> {
        let stream = Self {
            bytes,
            bit_len,
            symbols: None,
        };
        stream.validate()?;
        Ok(stream)
    }

    /// Parse a textual `0`/`1` rendering. The symbol count is left unknown.
    pub fn from_bit_str(s: &str) -> Result<Self> {
        let code: Code = s.parse()?;
        let mut stream = Self::from_codes(std::iter::once(&code))?;
        stream.symbols = None;
        Ok(stream)
    }

    /// Record the number of symbols the stream is expected to decode to.
    pub fn with_symbol_count(mut self, symbols: u64) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Byte length must be exactly `ceil(bit_len / 8)`.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.len() as u64 != self.bit_len.div_ceil(8) {
            return Err(CodecError::InvalidStreamLength {
                bytes: self.bytes.len(),
                bits: self.bit_len,
            });
        }
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Symbols encoded into the stream, when known.
    pub fn symbol_count(&self) -> Option<u64> {
        self.symbols
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Zero bits appended to fill the last byte.
    pub fn padding_bits(&self) -> u8 {
        ((8 - self.bit_len % 8) % 8) as u8
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Keep only the first `bit_len` bits. Longer lengths are ignored.
    ///
    /// The recorded symbol count is kept, so the result models a stream
    /// damaged in transit.
    pub fn truncate(&mut self, bit_len: u64) {
        if bit_len >= self.bit_len {
            return;
        }
        self.bit_len = bit_len;
        self.bytes.truncate(bit_len.div_ceil(8) as usize);
        let tail = (bit_len % 8) as u32;
        if tail != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }
    }

    /// Iterate the stream bits in order, excluding padding.
    pub fn bits(&self) -> Bits<'_> {
        Bits {
            reader: BitReader::endian(Cursor::new(self.bytes.as_slice()), BigEndian),
            remaining: self.bit_len,
        }
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.validate().is_err() {
            return write!(
                f,
                "<invalid stream: {} bytes for {} bits>",
                self.bytes.len(),
                self.bit_len
            );
        }
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Iterator over the bits of an [`EncodedStream`].
///
/// Only meaningful on a stream that passes [`EncodedStream::validate`]; on a
/// stream with fewer bytes than its bit length claims, iteration stops at the
/// last stored bit. [`crate::decoder::decode`] validates before iterating.
pub struct Bits<'a> {
    reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    remaining: u64,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        let bit = self.reader.read_bit().ok()?;
        self.remaining -= 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (0, Some(n))
    }
}

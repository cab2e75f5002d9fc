//! Symbol sequence to bitstream

use tracing::{debug, warn};

use crate::bitstream::EncodedStream;
use crate::code_table::CodeTable;
use crate::error::{CodecError, Result};
use crate::symbol::Symbol;

/// Concatenate the code of every symbol, in input order.
///
/// Fails with `UnknownSymbol` if `table` was built for a different input.
pub fn encode_with_table<S: Symbol>(symbols: &[S], table: &CodeTable<S>) -> Result<EncodedStream> {
    let codes = symbols
        .iter()
        .map(|s| {
            table.get(s).ok_or_else(|| {
                warn!(symbol = %s.label(), "symbol missing from code table");
                CodecError::UnknownSymbol(s.label())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let stream = EncodedStream::from_codes(codes)?;
    debug!(
        symbols = symbols.len(),
        bits = stream.bit_len(),
        bytes = stream.byte_len(),
        "encoded stream"
    );
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_for<S: Symbol>(input: &[S]) -> CodeTable<S> {
        let tree = HuffmanTree::build(&FrequencyTable::from_symbols(input)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_encode_aab() {
        let table = table_for(b"aab");
        let stream = encode_with_table(b"aab", &table).unwrap();
        assert_eq!(stream.to_string(), "110");
    }

    #[test]
    fn test_bit_count_is_sum_of_code_lengths() {
        let input = b"hello world hello world hello";
        let table = table_for(input);
        let stream = encode_with_table(input, &table).unwrap();
        let expected: u64 = input.iter().map(|s| table.get(s).unwrap().len() as u64).sum();
        assert_eq!(stream.bit_len(), expected);
        assert_eq!(stream.byte_len() as u64, expected.div_ceil(8));
    }

    #[test]
    fn test_unknown_symbol() {
        let table = table_for(&['a', 'b']);
        let result = encode_with_table(&['a', 'c'], &table);
        assert!(matches!(result, Err(CodecError::UnknownSymbol(s)) if s == "'c'"));
    }

    #[test]
    fn test_empty_input_with_any_table() {
        let table = table_for(b"xyz");
        let stream = encode_with_table::<u8>(&[], &table).unwrap();
        assert!(stream.is_empty());
    }
}

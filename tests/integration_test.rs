//! Integration tests for huffman-codec

use huffman_codec::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn table_for<S: Symbol>(input: &[S]) -> (FrequencyTable<S>, CodeTable<S>) {
    let frequencies = FrequencyTable::from_symbols(input);
    let tree = HuffmanTree::build(&frequencies).unwrap();
    let table = CodeTable::from_tree(&tree).unwrap();
    (frequencies, table)
}

/// Cheapest weighted path length over every possible merge order.
fn brute_force_optimum(weights: &[u64]) -> u64 {
    if weights.len() <= 1 {
        return 0;
    }
    let mut best = u64::MAX;
    for i in 0..weights.len() {
        for j in (i + 1)..weights.len() {
            let merged = weights[i] + weights[j];
            let mut rest: Vec<u64> = weights
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, &w)| w)
                .collect();
            rest.push(merged);
            best = best.min(merged + brute_force_optimum(&rest));
        }
    }
    best
}

#[test]
fn test_random_byte_roundtrips() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = rng.gen_range(1..512);
        let alphabet = rng.gen_range(1..=256u16);
        let data: Vec<u8> = (0..len).map(|_| (rng.gen_range(0..alphabet)) as u8).collect();
        let encoded = encode(&data).unwrap();
        let tree = encoded.tree.as_ref().unwrap();
        assert_eq!(decode(&encoded.stream, tree).unwrap(), data);
    }
}

#[test]
fn test_random_text_roundtrips() {
    let mut rng = StdRng::seed_from_u64(11);
    let pool: Vec<char> = "abcdeé漢字🦀 \n\t".chars().collect();
    for _ in 0..100 {
        let len = rng.gen_range(1..256);
        let text: Vec<char> = (0..len).map(|_| pool[rng.gen_range(0..pool.len())]).collect();
        let encoded = encode(&text).unwrap();
        assert_eq!(encoded.decode().unwrap(), text);
    }
}

#[test]
fn test_all_bytes_roundtrip() {
    let data: Vec<u8> = (0..=255).cycle().take(2048).collect();
    let encoded = encode(&data).unwrap();
    // uniform over 256 symbols is exactly eight bits each
    assert_eq!(encoded.stream.bit_len(), 2048 * 8);
    assert_eq!(encoded.decode().unwrap(), data);
}

#[test]
fn test_codes_are_prefix_free() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let data: Vec<u8> = (0..300).map(|_| rng.gen_range(0..40u8)).collect();
        let (_, table) = table_for(&data);
        let codes: Vec<&Code> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
        assert!(table.is_prefix_free());
    }
}

#[test]
fn test_weighted_length_is_optimal() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..40 {
        let distinct = rng.gen_range(2..=6u8);
        let data: Vec<u8> = (0..rng.gen_range(10..80))
            .map(|_| rng.gen_range(0..distinct))
            .collect();
        let (frequencies, table) = table_for(&data);
        if frequencies.len() < 2 {
            continue;
        }
        let weights: Vec<u64> = frequencies.iter().map(|(_, c)| c).collect();
        assert_eq!(table.weighted_length(&frequencies), brute_force_optimum(&weights));
    }
}

#[test]
fn test_entropy_bound() {
    let text = "it was the best of times, it was the worst of times".repeat(10);
    let (frequencies, table) = table_for(text.as_bytes());
    let average = table.weighted_length(&frequencies) as f64 / frequencies.total() as f64;
    let entropy = frequencies.entropy();
    assert!(average >= entropy - 1e-9);
    assert!(average < entropy + 1.0);
}

#[test]
fn test_single_symbol_alphabet() {
    let encoded = encode(b"aaaa").unwrap();
    assert_eq!(encoded.stream.to_string(), "0000");
    assert!(encoded.tree.as_ref().unwrap().is_degenerate());
    assert_eq!(encoded.decode().unwrap(), b"aaaa");

    let restored = Package::from_bytes(
        &Package::Bytes(encoded.into_packed().unwrap())
            .to_bytes()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(restored.decode_bytes().unwrap(), b"aaaa");
}

#[test]
fn test_empty_input() {
    let encoded = encode::<u8>(b"").unwrap();
    assert!(encoded.stream.is_empty());

    let (_, tree_source) = table_for(b"anything");
    let tree = HuffmanTree::from_code_table(&tree_source).unwrap();
    assert!(decode(&EncodedStream::default(), &tree).unwrap().is_empty());

    let empty = FrequencyTable::<u8>::from_symbols(&[]);
    assert!(matches!(HuffmanTree::build(&empty), Err(CodecError::EmptyAlphabet)));
}

#[test]
fn test_determinism() {
    let text: Vec<char> = "she sells sea shells by the sea shore".chars().collect();
    let first = encode(&text).unwrap();
    let second = encode(&text).unwrap();
    assert_eq!(first.tree, second.tree);
    assert_eq!(first.code_table().unwrap(), second.code_table().unwrap());
    assert_eq!(first.stream, second.stream);
}

#[test]
fn test_truncation_detected() {
    let inputs: [&[u8]; 4] = [b"a", b"aab", b"abracadabra", b"hello world hello"];
    for input in inputs {
        let encoded = encode(input).unwrap();
        let tree = encoded.tree.as_ref().unwrap();
        let mut stream = encoded.stream.clone();
        stream.truncate(stream.bit_len() - 1);
        assert!(
            matches!(decode(&stream, tree), Err(CodecError::TruncatedStream { .. })),
            "dropping the last bit of {:?} must be detected",
            String::from_utf8_lossy(input)
        );
    }

    let mut packed = encode(&['x']).unwrap().into_packed().unwrap();
    packed.stream.truncate(0);
    assert!(matches!(packed.decode(), Err(CodecError::TruncatedStream { .. })));
}

#[test]
fn test_aab_scenario() {
    let frequencies = FrequencyTable::from_symbols(b"aab");
    assert_eq!(frequencies.get(&b'a'), Some(2));
    assert_eq!(frequencies.get(&b'b'), Some(1));

    let tree = HuffmanTree::build(&frequencies).unwrap();
    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 1);

    let table = CodeTable::from_tree(&tree).unwrap();
    let stream = encoder::encode_with_table(b"aab", &table).unwrap();
    assert_eq!(stream.to_string(), "110");
    assert_eq!(decode(&EncodedStream::from_bit_str("110").unwrap(), &tree).unwrap(), b"aab");
}

#[test]
fn test_rebuilt_tree_decodes_identically() {
    let data = b"the quick brown fox jumps over the lazy dog".repeat(5);
    let encoded = encode(&data).unwrap();
    let rebuilt = HuffmanTree::from_code_table(&encoded.code_table().unwrap()).unwrap();
    assert_eq!(decode(&encoded.stream, &rebuilt).unwrap(), data);
}

#[test]
fn test_codec_file_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.huff");
    let codec = HuffmanCodec::new(CodecConfig {
        symbol_unit: SymbolUnit::Char,
        ..CodecConfig::default()
    })
    .unwrap();
    let text = "Grüße aus Köln! ".repeat(30);
    let compressed = codec.compress(text.as_bytes()).unwrap();
    assert!(compressed.compressed_size < text.len());
    compressed.package.write_to(&path).unwrap();

    let loaded = Package::read_from(&path).unwrap();
    assert_eq!(loaded.decode_bytes().unwrap(), text.as_bytes());
}

#[test]
fn test_compare_report() {
    let codec = HuffmanCodec::default();
    let data = vec![0xABu8; 10_000];
    let report = codec.report(&data).unwrap();
    assert_eq!(report.huffman_bits, 10_000);
    assert_eq!(report.huffman_bytes, 1_250);
    assert!(report.lz4_size.unwrap() < data.len());
    assert!(report.zlib_size.unwrap() < data.len());
    assert!(report.to_string().contains("Huffman compressed size: 1250 bytes"));
}

#[test]
fn test_config_from_json() {
    let config = CodecConfig::from_json_str(r#"{ "symbol_unit": "char", "zlib_level": 9 }"#).unwrap();
    let codec = HuffmanCodec::new(config).unwrap();
    let result = codec.compress("config test data".as_bytes()).unwrap();
    assert_eq!(result.package.unit(), SymbolUnit::Char);

    let bad = CodecConfig {
        zlib_level: 12,
        ..CodecConfig::default()
    };
    assert!(matches!(HuffmanCodec::new(bad), Err(CodecError::ConfigError(_))));
}

#[test]
fn test_concurrent_decode_shares_tree() {
    let data = b"shared trees are read-only during decode".repeat(8);
    let encoded = encode(&data).unwrap();
    let tree = encoded.tree.as_ref().unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| decode(&encoded.stream, tree).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), data);
        }
    });
}

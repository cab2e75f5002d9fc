use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffman_codec::{decode, encode, CodeTable, FrequencyTable, HuffmanTree};

fn generate_text(size: usize) -> Vec<u8> {
    let sample = b"It is a truth universally acknowledged, that a single man in possession \
        of a good fortune, must be in want of a wife. ";
    sample.iter().copied().cycle().take(size).collect()
}

fn generate_skewed(size: usize) -> Vec<u8> {
    // roughly geometric: half 0, a quarter 1, ...
    (0..size)
        .map(|i| (i as u32).wrapping_mul(2654435761).trailing_zeros().min(15) as u8)
        .collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");
    for &size in &[1024usize, 65536] {
        let data = generate_text(size);
        let frequencies = FrequencyTable::from_symbols(&data);
        group.bench_with_input(BenchmarkId::new("text", size), &frequencies, |b, f| {
            b.iter(|| {
                let tree = HuffmanTree::build(f).unwrap();
                black_box(CodeTable::from_tree(&tree).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for &size in &[1024usize, 65536, 1 << 20] {
        for (name, data) in [("text", generate_text(size)), ("skewed", generate_skewed(size))] {
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| black_box(encode(data).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &size in &[1024usize, 65536, 1 << 20] {
        let data = generate_text(size);
        let encoded = encode(&data).unwrap();
        let tree = encoded.tree.clone().unwrap();
        group.bench_with_input(BenchmarkId::new("text", size), &encoded.stream, |b, stream| {
            b.iter(|| black_box(decode(stream, &tree).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(compression_benches, bench_tree_build, bench_encode, bench_decode);
criterion_main!(compression_benches);

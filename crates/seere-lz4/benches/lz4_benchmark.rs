//! Benchmarks for the LZ4 and LZ4-HC block primitives.
//!
//! Run with: `cargo bench -p seere-lz4`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seere_lz4::block::{compress_block, decompress_block, max_compressed_size};
use seere_lz4::hc::compress_hc;

/// Generate test data with varying compressibility.
fn generate_test_data(size: usize, compressibility: f64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(size);

    if compressibility > 0.9 {
        let pattern = b"ABCDEFGHIJKLMNOP";
        while data.len() < size {
            data.extend_from_slice(pattern);
        }
        data.truncate(size);
    } else if compressibility > 0.5 {
        let phrases: &[&[u8]] = &[
            b"The quick brown fox jumps over the lazy dog. ",
            b"Pack my box with five dozen liquor jugs! ",
            b"How vexingly quick daft zebras jump!! ",
        ];
        while data.len() < size {
            if rng.gen_bool(compressibility) {
                data.extend_from_slice(phrases[rng.gen_range(0..phrases.len())]);
            } else {
                data.push(rng.r#gen::<u8>());
            }
        }
        data.truncate(size);
    } else {
        data.resize(size, 0);
        rng.fill(&mut data[..]);
    }

    data
}

fn bench_fast_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz4_fast_compress");

    for size in [4 * 1024, 64 * 1024, 256 * 1024, 1024 * 1024] {
        let data = generate_test_data(size, 0.7);
        let mut output = vec![0u8; max_compressed_size(size)];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}KB", size / 1024)),
            &data,
            |b, data| b.iter(|| compress_block(black_box(data), black_box(&mut output)).unwrap()),
        );
    }

    group.finish();
}

fn bench_fast_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz4_fast_decompress");

    for size in [4 * 1024, 64 * 1024, 256 * 1024, 1024 * 1024] {
        let data = generate_test_data(size, 0.7);
        let mut compressed = vec![0u8; max_compressed_size(size)];
        let compressed_len = compress_block(&data, &mut compressed).unwrap();
        compressed.truncate(compressed_len);

        let mut decompressed = vec![0u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}KB", size / 1024)),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    decompress_block(black_box(compressed), black_box(&mut decompressed)).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_hc_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz4_hc_compress");

    let size = 64 * 1024;
    let data = generate_test_data(size, 0.7);

    for level in [9, 13, 17] {
        let mut output = vec![0u8; max_compressed_size(size)];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("level_{level}")),
            &data,
            |b, data| {
                b.iter(|| compress_hc(black_box(data), black_box(&mut output), level).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_vs_lz4_flex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz4_vs_lz4flex");

    let size = 64 * 1024;
    let data = generate_test_data(size, 0.7);

    let mut our_output = vec![0u8; max_compressed_size(size)];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::new("seere", "compress"), &data, |b, data| {
        b.iter(|| compress_block(black_box(data), black_box(&mut our_output)).unwrap())
    });

    group.bench_with_input(BenchmarkId::new("lz4_flex", "compress"), &data, |b, data| {
        b.iter(|| lz4_flex::compress(black_box(data)))
    });

    let compressed = lz4_flex::compress(&data);
    let mut decompressed = vec![0u8; size];

    group.bench_with_input(
        BenchmarkId::new("seere", "decompress"),
        &compressed,
        |b, compressed| {
            b.iter(|| decompress_block(black_box(compressed), black_box(&mut decompressed)).unwrap())
        },
    );

    group.bench_with_input(
        BenchmarkId::new("lz4_flex", "decompress"),
        &compressed,
        |b, compressed| b.iter(|| lz4_flex::decompress(black_box(compressed), size).unwrap()),
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_fast_compress,
    bench_fast_decompress,
    bench_hc_levels,
    bench_vs_lz4_flex,
);

criterion_main!(benches);

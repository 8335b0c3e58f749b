//! Criterion benchmarks for DataPixels critical paths
//!
//! Benchmarks the operations run on every edit:
//! - Encode: grid literal validation and packing
//! - Generate: packed pixels to the raw literal
//! - Format: re-rendering with alignment and description

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datapixels::code::{CodeFactory, FormatOptions};
use datapixels::grid::encode_literal;
use datapixels::packed::PackedImage;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a square grid literal with varying channel widths
fn make_grid_literal(size: usize) -> String {
    let rows: Vec<String> = (0..size)
        .map(|y| {
            let cells: Vec<String> = (0..size)
                .map(|x| format!("\"{}, {}, {}\"", (x * 37) % 256, (y * 11) % 256, (x + y) % 256))
                .collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(",\n"))
}

fn make_image(size: u32) -> PackedImage {
    let data = (0..size * size * 4).map(|i| (i * 7 % 256) as u8).collect();
    PackedImage::new(data, size, size).unwrap()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in [8usize, 32, 100] {
        let literal = make_grid_literal(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &literal, |b, literal| {
            b.iter(|| encode_literal(black_box(literal)).unwrap())
        });
    }
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [8u32, 32, 100] {
        let image = make_image(size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| CodeFactory::generate("pixelData", black_box(image)))
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    let factory = CodeFactory::generate("pixelData", &make_image(100));
    for (label, align, describe) in
        [("plain", false, false), ("aligned", true, false), ("aligned_described", true, true)]
    {
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut factory = factory.clone();
                factory.apply(black_box(&FormatOptions { align, describe, indentation: 4 })).unwrap();
                factory
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_generate, bench_format);
criterion_main!(benches);

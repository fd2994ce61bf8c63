//! Throughput benchmarks for the three adaptation entry points
//!
//! Run with: cargo bench --bench adaptation_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;
use pixel_adapt_core::{
    adapt_pixel_distribution, apply_histogram, fourier_domain_adaptation, Image, TransformKind,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_image(seed: u64, size: usize) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    Image::from_u8(Array3::from_shape_simple_fn((size, size, 3), || rng.gen()))
}

/// Transformer kinds at a fixed image size
fn bench_pixel_distribution(c: &mut Criterion) {
    let image = random_image(1, 128);
    let reference = random_image(2, 128);
    let mut group = c.benchmark_group("pixel_distribution");

    for kind in [TransformKind::Pca, TransformKind::Standard, TransformKind::MinMax] {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                black_box(adapt_pixel_distribution(&image, &reference, kind, 0.5).unwrap());
            });
        });
    }
    group.finish();
}

/// FFT cost across image sizes
fn bench_fourier(c: &mut Criterion) {
    let mut group = c.benchmark_group("fourier_domain_adaptation");

    for size in [64, 128, 256] {
        let image = random_image(3, size);
        let target = random_image(4, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(fourier_domain_adaptation(&image, &target, 0.1).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let image = random_image(5, 256);
    let reference = random_image(6, 192);

    c.bench_function("apply_histogram_with_resize", |b| {
        b.iter(|| {
            black_box(apply_histogram(&image, &reference, 0.5).unwrap());
        });
    });
}

criterion_group!(benches, bench_pixel_distribution, bench_fourier, bench_histogram);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dense_matrix::test_support::{random_invertible, random_matrix};
use std::time::Duration;

fn run_factorization_bench(c: &mut Criterion) {
    let matrix = random_invertible(64, 1);
    c.bench_function("64x64 LU factorization", |b| b.iter(|| black_box(&matrix).factorize()));
}

fn run_inverse_bench(c: &mut Criterion) {
    let matrix = random_invertible(64, 2);
    c.bench_function("64x64 inverse", |b| b.iter(|| black_box(&matrix).factorize().and_then(|lu| lu.inverse())));
}

fn run_multiply_bench(c: &mut Criterion) {
    let left = random_matrix(64, 128, 3);
    let right = random_matrix(128, 64, 4);
    c.bench_function("64x128 * 128x64 multiplication", |b| b.iter(|| black_box(&left) * black_box(&right)));
}

criterion_group!(
    name = dense_matrix_bench;
    config = Criterion::default().significance_level(0.1).sample_size(10).measurement_time(Duration::from_secs(2));
    targets = run_factorization_bench, run_inverse_bench, run_multiply_bench
);

criterion_main!(dense_matrix_bench);

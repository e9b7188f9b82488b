//! Criterion benchmarks for `dcat-math`.
//!
//! Focus on the closed forms evaluated once per data point by a collapsed sampler.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dcat_math::dirichlet::{symmetric_log_predictive, symmetric_log_sequence_marginal};

fn bench_dirichlet_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("dirichlet");

    for k in [2usize, 8, 64, 512] {
        let counts: Vec<u64> = (0..k as u64).map(|i| (i * 7) % 13).collect();

        group.bench_with_input(
            BenchmarkId::new("log_predictive", k),
            &counts,
            |b, counts| {
                b.iter(|| black_box(symmetric_log_predictive(black_box(1.0), counts, k / 2)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("log_sequence_marginal", k),
            &counts,
            |b, counts| {
                b.iter(|| black_box(symmetric_log_sequence_marginal(black_box(0.5), counts)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_dirichlet_kernels);
criterion_main!(benches);

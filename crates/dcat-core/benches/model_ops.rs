//! Criterion benchmarks for the model's per-datum operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dcat_core::DirichletCategorical;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn populated(k: usize) -> DirichletCategorical {
    let counts: Vec<u64> = (0..k as u64).map(|i| (i * 5) % 11).collect();
    DirichletCategorical::from_counts(1.0, counts).expect("valid counts")
}

fn bench_model_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("dirichlet_categorical");

    for k in [2usize, 16, 256] {
        let model = populated(k);

        group.bench_with_input(BenchmarkId::new("move_datum", k), &k, |b, &k| {
            let mut m = model.duplicate();
            b.iter(|| {
                m.incorporate(black_box(k - 1));
                m.unincorporate(black_box(k - 1));
            });
        });

        group.bench_with_input(BenchmarkId::new("logp", k), &model, |b, m| {
            b.iter(|| black_box(m.logp(black_box(k / 2))));
        });

        group.bench_with_input(BenchmarkId::new("logp_score", k), &model, |b, m| {
            b.iter(|| black_box(m.logp_score()));
        });

        group.bench_with_input(BenchmarkId::new("sample", k), &model, |b, m| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(m.sample(&mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_model_ops);
criterion_main!(benches);

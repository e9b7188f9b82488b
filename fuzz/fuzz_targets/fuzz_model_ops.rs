//! Fuzz target for sequences of checked model operations.
//!
//! Arbitrary construction parameters and op sequences through the `try_*`
//! operations must never panic. After every op the predictive distribution
//! sums to 1 and `logp_score` is finite.

#![no_main]

use arbitrary::Arbitrary;
use dcat_core::DirichletCategorical;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Arbitrary)]
enum Op {
    Incorporate(f64),
    Unincorporate(i64),
    Logp(u32),
    Sample { seed: u64, draws: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    k: u8,
    alpha: f64,
    ops: Vec<Op>,
}

fn check_invariants(model: &DirichletCategorical) {
    let total: f64 = (0..model.k()).map(|i| model.logp(i).exp()).sum();
    assert!((total - 1.0).abs() < 1e-6, "predictive sums to {total}");

    let score = model.logp_score();
    assert!(score.is_finite(), "logp_score = {score}");
}

fuzz_target!(|input: Input| {
    let Ok(mut model) = DirichletCategorical::try_with_alpha(input.k as usize, input.alpha) else {
        return;
    };
    check_invariants(&model);

    for op in input.ops {
        match op {
            Op::Incorporate(x) => {
                let _ = model.try_incorporate(x);
            }
            Op::Unincorporate(x) => {
                let _ = model.try_unincorporate(x);
            }
            Op::Logp(x) => {
                if let Ok(logp) = model.try_logp(x) {
                    assert!(logp <= 0.0 && logp.is_finite(), "logp = {logp}");
                }
            }
            Op::Sample { seed, draws } => {
                let before = model.counts().to_vec();
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..draws {
                    assert!(model.sample(&mut rng) < model.k());
                }
                assert_eq!(model.counts(), &before[..]);
            }
        }
        check_invariants(&model);
    }
});

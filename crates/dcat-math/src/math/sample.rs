//! Weighted categorical draws.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Draw an index with probability proportional to `weights[i]`.
///
/// Weights must be finite and non-negative with a positive total; returns
/// None otherwise (including for an empty slice).
pub fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let dist = WeightedIndex::new(weights).ok()?;
    Some(dist.sample(rng))
}

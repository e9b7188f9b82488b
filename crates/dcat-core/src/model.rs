//! Collapsed Dirichlet-categorical model.
//!
//! A symmetric `Dirichlet(α, .., α)` prior over `k` category probabilities,
//! with the probabilities integrated out. Only the per-category counts of
//! incorporated observations are kept; every query is a closed form over
//! those counts:
//!
//! - predictive: `P(x = i | data) = (α + n_i) / (N + α·k)`
//! - sequence marginal: `lgamma(α·k) - lgamma(α·k + N) + Σ_i lgamma(n_i + α) - k·lgamma(α)`
//!
//! `N` is summed from the counts on every query and never stored.
//!
//! The model is not `Clone`; [`DirichletCategorical::duplicate`] makes an
//! explicit copy.
//!
//! Mutators take `&mut self`, so sharing one instance across threads needs an
//! external lock around all operations.

use dcat_math::dirichlet::{
    symmetric_log_predictive, symmetric_log_sequence_marginal, symmetric_predictive_probs,
    valid_symmetric_prior,
};
use dcat_math::sample_index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::category::CategoricalDatum;
use crate::error::ModelError;

/// Concentration used when none is given.
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Sufficient statistics for one categorical variable under a symmetric Dirichlet prior.
#[derive(Debug, PartialEq)]
pub struct DirichletCategorical {
    alpha: f64,
    counts: Vec<u64>,
}

/// Serializable snapshot of a model's sufficient statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffStats {
    pub alpha: f64,
    pub counts: Vec<u64>,
}

#[track_caller]
fn fault(err: ModelError) -> ! {
    tracing::error!(code = err.code(), error = %err, "dirichlet-categorical contract violation");
    panic!("{err}")
}

impl DirichletCategorical {
    /// Create a model with `k` categories and `alpha = 1`.
    ///
    /// # Panics
    /// If `k == 0`.
    #[track_caller]
    pub fn new(k: usize) -> Self {
        Self::with_alpha(k, DEFAULT_ALPHA)
    }

    /// Create a model with `k` categories and concentration `alpha`.
    ///
    /// # Panics
    /// If `k == 0` or `alpha` is rejected by [`from_counts`](Self::from_counts).
    #[track_caller]
    pub fn with_alpha(k: usize, alpha: f64) -> Self {
        Self::try_with_alpha(k, alpha).unwrap_or_else(|err| fault(err))
    }

    /// Checked form of [`new`](Self::new).
    pub fn try_new(k: usize) -> Result<Self, ModelError> {
        Self::try_with_alpha(k, DEFAULT_ALPHA)
    }

    /// Checked form of [`with_alpha`](Self::with_alpha).
    pub fn try_with_alpha(k: usize, alpha: f64) -> Result<Self, ModelError> {
        Self::from_counts(alpha, vec![0; k])
    }

    /// Build a model from existing counts (one entry per category).
    ///
    /// `alpha` must be positive and finite, and `alpha·k` must not exceed
    /// [`MAX_TOTAL_CONCENTRATION`](dcat_math::dirichlet::MAX_TOTAL_CONCENTRATION).
    pub fn from_counts(alpha: f64, counts: Vec<u64>) -> Result<Self, ModelError> {
        if counts.is_empty() {
            return Err(ModelError::NoCategories);
        }
        if !valid_symmetric_prior(alpha, counts.len()) {
            return Err(ModelError::InvalidAlpha { alpha });
        }
        tracing::debug!(k = counts.len(), alpha, "created dirichlet-categorical model");
        Ok(Self { alpha, counts })
    }

    /// Restore a model from a snapshot, re-checking its invariants.
    pub fn from_snapshot(stats: SuffStats) -> Result<Self, ModelError> {
        Self::from_counts(stats.alpha, stats.counts)
    }

    /// Copy the sufficient statistics into a snapshot.
    pub fn snapshot(&self) -> SuffStats {
        SuffStats {
            alpha: self.alpha,
            counts: self.counts.clone(),
        }
    }

    /// Explicit deep copy. The copy evolves independently of `self`.
    pub fn duplicate(&self) -> Self {
        Self {
            alpha: self.alpha,
            counts: self.counts.clone(),
        }
    }

    /// Number of categories.
    pub fn k(&self) -> usize {
        self.counts.len()
    }

    /// Prior concentration per category.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Per-category counts of incorporated observations.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of incorporated observations.
    pub fn n(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn index<X: CategoricalDatum>(&self, x: X) -> Result<usize, ModelError> {
        let k = self.k();
        match x.category_index() {
            Some(i) if i < k => Ok(i),
            _ => {
                let err = ModelError::OutOfRange {
                    value: x.to_string(),
                    k,
                };
                tracing::debug!(code = err.code(), error = %err, "rejected category");
                Err(err)
            }
        }
    }

    /// Record one observation of category `x`.
    ///
    /// # Panics
    /// If `x` is not a category in `[0, k)`.
    #[track_caller]
    pub fn incorporate<X: CategoricalDatum>(&mut self, x: X) {
        if let Err(err) = self.try_incorporate(x) {
            fault(err);
        }
    }

    /// Checked form of [`incorporate`](Self::incorporate). Leaves the counts untouched on error.
    pub fn try_incorporate<X: CategoricalDatum>(&mut self, x: X) -> Result<(), ModelError> {
        let i = self.index(x)?;
        self.counts[i] += 1;
        Ok(())
    }

    /// Remove one previously incorporated observation of category `x`.
    ///
    /// # Panics
    /// If `x` is out of range, or its count is already zero.
    #[track_caller]
    pub fn unincorporate<X: CategoricalDatum>(&mut self, x: X) {
        if let Err(err) = self.try_unincorporate(x) {
            fault(err);
        }
    }

    /// Checked form of [`unincorporate`](Self::unincorporate). Leaves the counts untouched on error.
    pub fn try_unincorporate<X: CategoricalDatum>(&mut self, x: X) -> Result<(), ModelError> {
        let i = self.index(x)?;
        match self.counts[i].checked_sub(1) {
            Some(count) => {
                self.counts[i] = count;
                Ok(())
            }
            None => {
                let err = ModelError::NegativeCount { category: i };
                tracing::debug!(code = err.code(), error = %err, "rejected unincorporate");
                Err(err)
            }
        }
    }

    /// Posterior-predictive log-probability of the next observation being `x`.
    ///
    /// `log(α + n_x) - log(N + α·k)`; always `<= 0`.
    ///
    /// # Panics
    /// If `x` is not a category in `[0, k)`.
    #[track_caller]
    pub fn logp<X: CategoricalDatum>(&self, x: X) -> f64 {
        self.try_logp(x).unwrap_or_else(|err| fault(err))
    }

    /// Checked form of [`logp`](Self::logp).
    pub fn try_logp<X: CategoricalDatum>(&self, x: X) -> Result<f64, ModelError> {
        let i = self.index(x)?;
        Ok(symmetric_log_predictive(self.alpha, &self.counts, i))
    }

    /// Predictive probability of every category, in index order. Sums to 1.
    pub fn predictive_probs(&self) -> Vec<f64> {
        symmetric_predictive_probs(self.alpha, &self.counts)
    }

    /// Log marginal likelihood of all incorporated observations, with the
    /// category probabilities integrated out. Zero when nothing is incorporated.
    pub fn logp_score(&self) -> f64 {
        symmetric_log_sequence_marginal(self.alpha, &self.counts)
    }

    /// Draw a category from the posterior predictive.
    ///
    /// Category `i` is drawn with weight `n_i + α`. The counts are not
    /// changed; incorporate the draw separately if it should count.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let weights: Vec<f64> = self
            .counts
            .iter()
            .map(|&c| c as f64 + self.alpha)
            .collect();
        match sample_index(&weights, rng) {
            Some(i) => i,
            None => unreachable!("posterior weights are positive and finite"),
        }
    }
}

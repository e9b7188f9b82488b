//! Dirichlet-categorical conjugate closed forms.
//!
//! The model uses:
//! - Prior: `p = (p_1..p_K) ~ Dirichlet(α_1..α_K)`
//! - Likelihood: each observation `x_j | p ~ Categorical(p)`
//! - Posterior: `p | n ~ Dirichlet(α_i + n_i)` with `n_i` the count of category `i`
//!
//! Because `p` is integrated out, everything below depends on the data only
//! through the counts. The marginal here is for an *ordered sequence* of
//! observations, so there is no multinomial coefficient: it is the quantity a
//! collapsed sampler compares across partitions.

use super::stable::log_gamma;

/// Parameters for a Dirichlet distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DirichletParams {
    /// Concentration parameters (all must be > 0)
    pub alpha: Vec<f64>,
}

impl DirichletParams {
    /// Create new Dirichlet parameters with validation.
    ///
    /// Returns None if the vector is empty or any entry is non-positive or not finite.
    pub fn new(alpha: Vec<f64>) -> Option<Self> {
        if alpha.is_empty() || !alpha.iter().all(|&a| valid_concentration(a)) {
            return None;
        }
        Some(Self { alpha })
    }

    /// Create a symmetric Dirichlet with all α_i = value.
    pub fn symmetric(k: usize, value: f64) -> Option<Self> {
        if k == 0 || !valid_concentration(value) {
            return None;
        }
        Some(Self {
            alpha: vec![value; k],
        })
    }

    /// Uniform prior, all α_i = 1.
    pub fn uniform(k: usize) -> Option<Self> {
        Self::symmetric(k, 1.0)
    }

    /// Jeffreys prior, all α_i = 0.5.
    pub fn jeffreys(k: usize) -> Option<Self> {
        Self::symmetric(k, 0.5)
    }

    /// Number of categories K.
    pub fn k(&self) -> usize {
        self.alpha.len()
    }

    /// α_0 = Σ_i α_i.
    pub fn concentration(&self) -> f64 {
        self.alpha.iter().sum()
    }

    /// E[p_i] = α_i / α_0.
    pub fn mean(&self) -> Vec<f64> {
        let sum = self.concentration();
        self.alpha.iter().map(|a| a / sum).collect()
    }
}

/// A concentration parameter must be strictly positive and finite.
pub fn valid_concentration(alpha: f64) -> bool {
    alpha.is_finite() && alpha > 0.0
}

/// Largest total concentration `α·K` the symmetric forms accept.
///
/// Below this bound `α·K + N` and `lgamma(α·K + N)` stay finite for every
/// `u64` count total.
pub const MAX_TOTAL_CONCENTRATION: f64 = 1e300;

/// Whether a symmetric prior of `k` categories at `alpha` is usable: `k >= 1`,
/// `alpha` a valid concentration, and `alpha·k` at most
/// [`MAX_TOTAL_CONCENTRATION`].
pub fn valid_symmetric_prior(alpha: f64, k: usize) -> bool {
    k > 0 && valid_concentration(alpha) && alpha * k as f64 <= MAX_TOTAL_CONCENTRATION
}

/// Posterior parameters after observing `counts`: α'_i = α_i + n_i.
///
/// Returns None when `counts` does not have one entry per category.
pub fn posterior_params(prior: &DirichletParams, counts: &[u64]) -> Option<DirichletParams> {
    if counts.len() != prior.k() {
        return None;
    }
    let alpha = prior
        .alpha
        .iter()
        .zip(counts)
        .map(|(&a, &n)| a + n as f64)
        .collect();
    DirichletParams::new(alpha)
}

/// Predictive probabilities for the next observation: α'_i / Σ_j α'_j.
pub fn predictive_probs(posterior: &DirichletParams) -> Vec<f64> {
    posterior.mean()
}

/// Log predictive probability of category `i` under `posterior`.
///
/// NaN when `i` is out of range.
pub fn log_predictive(posterior: &DirichletParams, i: usize) -> f64 {
    match posterior.alpha.get(i) {
        Some(a) => a.ln() - posterior.concentration().ln(),
        None => f64::NAN,
    }
}

/// log B(α) = Σ_i lgamma(α_i) - lgamma(Σ_i α_i).
pub fn log_multivariate_beta(alpha: &[f64]) -> f64 {
    if alpha.is_empty() || !alpha.iter().all(|&a| valid_concentration(a)) {
        return f64::NAN;
    }
    let sum: f64 = alpha.iter().sum();
    let log_sum_gamma: f64 = alpha.iter().map(|&a| log_gamma(a)).sum();
    log_sum_gamma - log_gamma(sum)
}

/// Log marginal likelihood of an ordered sequence with the given counts.
///
/// log P(x_1..x_N | α) = log B(α + n) - log B(α)
///
/// NaN when `counts` does not match the prior's dimension.
pub fn log_sequence_marginal(prior: &DirichletParams, counts: &[u64]) -> f64 {
    match posterior_params(prior, counts) {
        Some(post) => log_multivariate_beta(&post.alpha) - log_multivariate_beta(&prior.alpha),
        None => f64::NAN,
    }
}

/// Symmetric-prior predictive: log(α + n_i) - log(N + α·K).
///
/// Allocation-free form of [`log_predictive`] for a symmetric prior; `N` is
/// summed from `counts` on every call. NaN for an out-of-range `i` or when
/// [`valid_symmetric_prior`] fails.
pub fn symmetric_log_predictive(alpha: f64, counts: &[u64], i: usize) -> f64 {
    if !valid_symmetric_prior(alpha, counts.len()) {
        return f64::NAN;
    }
    let Some(&n_i) = counts.get(i) else {
        return f64::NAN;
    };
    let n: u64 = counts.iter().sum();
    let k = counts.len() as f64;
    (alpha + n_i as f64).ln() - (n as f64 + alpha * k).ln()
}

/// Symmetric-prior predictive probabilities `(α + n_i) / (N + α·K)`, in
/// index order. Empty when [`valid_symmetric_prior`] fails.
pub fn symmetric_predictive_probs(alpha: f64, counts: &[u64]) -> Vec<f64> {
    if !valid_symmetric_prior(alpha, counts.len()) {
        return Vec::new();
    }
    let n: u64 = counts.iter().sum();
    let total = n as f64 + alpha * counts.len() as f64;
    counts
        .iter()
        .map(|&c| (c as f64 + alpha) / total)
        .collect()
}

/// Symmetric-prior sequence marginal:
///
/// lgamma(α·K) - lgamma(α·K + N) + Σ_i lgamma(n_i + α) - K·lgamma(α)
///
/// Categories are summed in index order so results are reproducible bit for
/// bit. NaN when [`valid_symmetric_prior`] fails.
pub fn symmetric_log_sequence_marginal(alpha: f64, counts: &[u64]) -> f64 {
    if !valid_symmetric_prior(alpha, counts.len()) {
        return f64::NAN;
    }
    let k = counts.len() as f64;
    let a = alpha * k;
    let n: u64 = counts.iter().sum();
    let lg: f64 = counts
        .iter()
        .fold(0.0, |acc, &c| acc + log_gamma(c as f64 + alpha));
    log_gamma(a) - log_gamma(a + n as f64) + lg - k * log_gamma(alpha)
}

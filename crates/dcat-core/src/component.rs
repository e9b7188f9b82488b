//! Interface between a collapsed component and the engine that owns it.
//!
//! An outer sampler (Gibbs sweep, mixture engine) moves data points between
//! components and compares scores; it only needs the operations below, so it
//! can be written once over any conjugate component kind.

use rand::Rng;

use crate::model::DirichletCategorical;

/// A conjugate model kept in collapsed (sufficient-statistics) form.
pub trait ConjugateModel {
    /// Type of a single observation.
    type Value;

    /// Add one observation to the sufficient statistics.
    fn incorporate(&mut self, x: Self::Value);

    /// Remove one previously incorporated observation.
    fn unincorporate(&mut self, x: Self::Value);

    /// Posterior-predictive log-probability of `x`.
    fn logp(&self, x: Self::Value) -> f64;

    /// Log marginal likelihood of everything incorporated.
    fn logp_score(&self) -> f64;

    /// Draw from the posterior predictive without updating.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Value;
}

impl ConjugateModel for DirichletCategorical {
    type Value = usize;

    fn incorporate(&mut self, x: usize) {
        DirichletCategorical::incorporate(self, x);
    }

    fn unincorporate(&mut self, x: usize) {
        DirichletCategorical::unincorporate(self, x);
    }

    fn logp(&self, x: usize) -> f64 {
        DirichletCategorical::logp(self, x)
    }

    fn logp_score(&self) -> f64 {
        DirichletCategorical::logp_score(self)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        DirichletCategorical::sample(self, rng)
    }
}

/// Sum of `logp_score` over independent components, in iteration order.
///
/// This is the collapsed-likelihood term of a partition hypothesis.
pub fn total_logp_score<'a, M, I>(components: I) -> f64
where
    M: ConjugateModel + 'a,
    I: IntoIterator<Item = &'a M>,
{
    components.into_iter().map(ConjugateModel::logp_score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Moves `x` from one component to another, as a Gibbs step would.
    fn reassign<M: ConjugateModel>(from: &mut M, to: &mut M, x: M::Value)
    where
        M::Value: Copy,
    {
        from.unincorporate(x);
        to.incorporate(x);
    }

    #[test]
    fn generic_engine_moves_data_between_components() {
        let mut a = DirichletCategorical::new(3);
        let mut b = DirichletCategorical::new(3);
        ConjugateModel::incorporate(&mut a, 2);
        ConjugateModel::incorporate(&mut a, 1);

        reassign(&mut a, &mut b, 2);

        assert_eq!(a.counts(), &[0, 1, 0]);
        assert_eq!(b.counts(), &[0, 0, 1]);
    }

    #[test]
    fn total_score_is_sum_of_parts() {
        let a = DirichletCategorical::from_counts(1.0, vec![3, 1]).unwrap();
        let b = DirichletCategorical::from_counts(1.0, vec![0, 2]).unwrap();
        let total = total_logp_score([&a, &b]);
        assert!((total - (a.logp_score() + b.logp_score())).abs() < 1e-12);
        assert_eq!(total_logp_score(std::iter::empty::<&DirichletCategorical>()), 0.0);
    }

    #[test]
    fn trait_sample_matches_inherent() {
        let m = DirichletCategorical::from_counts(0.5, vec![4, 0, 9]).unwrap();
        let mut r1 = StdRng::seed_from_u64(1);
        let mut r2 = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let via_trait = ConjugateModel::sample(&m, &mut r1);
            assert_eq!(via_trait, m.sample(&mut r2));
        }
    }

    #[test]
    fn splitting_data_changes_partition_score() {
        // Identical observations score higher together than apart.
        let together = DirichletCategorical::from_counts(1.0, vec![4, 0]).unwrap();
        let apart = [
            DirichletCategorical::from_counts(1.0, vec![2, 0]).unwrap(),
            DirichletCategorical::from_counts(1.0, vec![2, 0]).unwrap(),
        ];
        assert!(together.logp_score() > total_logp_score(apart.iter()));
    }
}

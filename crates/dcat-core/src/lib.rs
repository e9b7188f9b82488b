//! Collapsed Dirichlet-categorical model.
//!
//! [`DirichletCategorical`] keeps the per-category counts of a categorical
//! variable under a symmetric Dirichlet prior and answers the closed-form
//! queries an inference engine needs once per data point:
//!
//! ```
//! use dcat_core::DirichletCategorical;
//! use rand::SeedableRng;
//!
//! let mut model = DirichletCategorical::new(2);
//! model.incorporate(0usize);
//! model.incorporate(0usize);
//! model.incorporate(0usize);
//! model.incorporate(1usize);
//!
//! assert!((model.logp(0usize) - (4.0f64 / 6.0).ln()).abs() < 1e-12);
//! assert!(model.logp_score() < 0.0);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! assert!(model.sample(&mut rng) < 2);
//! ```

pub mod category;
pub mod component;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod model;
pub mod observations;
pub mod output;

pub use category::CategoricalDatum;
pub use component::{total_logp_score, ConjugateModel};
pub use error::{Error, ModelError, Result};
pub use model::{DirichletCategorical, SuffStats, DEFAULT_ALPHA};

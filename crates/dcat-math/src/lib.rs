//! dcat math utilities.

pub mod math;

pub use math::dirichlet;
pub use math::sample::sample_index;
pub use math::stable::*;

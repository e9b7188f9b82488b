//! Core math modules.

pub mod dirichlet;
pub mod sample;
pub mod stable;

//! dcat configuration loading and validation.
//!
//! This crate provides:
//! - A typed Rust struct for prior.json / prior.toml
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation with stable error codes

pub mod prior;
pub mod resolve;
pub mod validate;

pub use prior::PriorConfig;
pub use resolve::{load_prior, resolve_prior, ConfigSource, ResolvedPrior};
pub use validate::{require_categories, validate_prior, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

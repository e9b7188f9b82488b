//! Configuration validation errors and semantic validation.

use dcat_math::dirichlet::{valid_symmetric_prior, MAX_TOTAL_CONCENTRATION};
use thiserror::Error;

use crate::prior::PriorConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a prior configuration semantically.
///
/// `categories` may be absent (the caller supplies it later); when present
/// it must be at least 1.
pub fn validate_prior(prior: &PriorConfig) -> ValidationResult<()> {
    if prior.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: prior.schema_version.clone(),
        });
    }

    if !prior.alpha.is_finite() || prior.alpha <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "alpha".to_string(),
            message: format!("Must be positive and finite, got {}", prior.alpha),
        });
    }

    if prior.categories == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "categories".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if let Some(k) = prior.categories {
        if !valid_symmetric_prior(prior.alpha, k) {
            return Err(ValidationError::InvalidValue {
                field: "alpha".to_string(),
                message: format!(
                    "alpha * categories must be at most {:e}, got {} * {}",
                    MAX_TOTAL_CONCENTRATION, prior.alpha, k
                ),
            });
        }
    }

    Ok(())
}

/// Validate a prior and require the category count to be known.
pub fn require_categories(prior: &PriorConfig) -> ValidationResult<usize> {
    validate_prior(prior)?;
    prior
        .categories
        .ok_or_else(|| ValidationError::MissingField("categories".to_string()))
}

//! Error types for dcat.
//!
//! [`ModelError`] covers caller-contract violations on a single model
//! instance. The plain model operations treat them as faults and panic; the
//! `try_*` operations hand them back as values.
//!
//! [`Error`] is the unified type used at the command-line boundary, with
//! stable codes for machine parsing:
//! ```json
//! { "code": 30, "message": "category 5 out of range [0, 3)" }
//! ```

use dcat_config::ValidationError;
use serde::Serialize;
use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Result type alias for dcat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations on a Dirichlet-categorical model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The value does not name a category in `[0, k)`.
    #[error("category {value} out of range [0, {k})")]
    OutOfRange { value: String, k: usize },

    /// `unincorporate` on a category whose count is already zero.
    #[error("cannot unincorporate category {category}: count is already zero")]
    NegativeCount { category: usize },

    #[error("number of categories must be at least 1")]
    NoCategories,

    #[error("alpha must be positive and finite, with alpha * k at most 1e300, got {alpha}")]
    InvalidAlpha { alpha: f64 },
}

impl ModelError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ModelError::OutOfRange { .. } => 30,
            ModelError::NegativeCount { .. } => 31,
            ModelError::NoCategories => 32,
            ModelError::InvalidAlpha { .. } => 33,
        }
    }
}

/// Unified error type for the dcat tool.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ValidationError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("invalid observation {token:?} at position {position}")]
    Observation { token: String, position: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable numeric code.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(e) => e.code(),
            Error::Model(e) => e.code(),
            Error::Observation { .. } => 40,
            Error::Io(_) => 50,
            Error::Json(_) => 51,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Config(_) => ExitCode::ConfigError,
            Error::Model(ModelError::NoCategories | ModelError::InvalidAlpha { .. }) => {
                ExitCode::ArgsError
            }
            Error::Model(_) | Error::Observation { .. } => ExitCode::DataError,
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
        }
    }

    /// Structured form for JSON output.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Serializable error body written to stdout in JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_messages() {
        let err = ModelError::OutOfRange {
            value: "5".to_string(),
            k: 3,
        };
        assert_eq!(err.to_string(), "category 5 out of range [0, 3)");
        assert_eq!(err.code(), 30);

        let err = ModelError::NegativeCount { category: 1 };
        assert!(err.to_string().contains("already zero"));
        assert_eq!(err.code(), 31);
    }

    #[test]
    fn exit_code_mapping() {
        let data: Error = ModelError::NegativeCount { category: 0 }.into();
        assert_eq!(data.exit_code(), ExitCode::DataError);

        let args: Error = ModelError::NoCategories.into();
        assert_eq!(args.exit_code(), ExitCode::ArgsError);

        let config: Error = ValidationError::MissingField("categories".to_string()).into();
        assert_eq!(config.exit_code(), ExitCode::ConfigError);
        assert_eq!(config.code(), 64);

        let obs = Error::Observation {
            token: "x".to_string(),
            position: 2,
        };
        assert_eq!(obs.exit_code(), ExitCode::DataError);
        assert_eq!(obs.to_report().code, 40);
    }
}

//! Dirichlet prior configuration.
//!
//! JSON form:
//! ```json
//! { "schema_version": "1.0.0", "categories": 4, "alpha": 0.5 }
//! ```
//! The same keys are accepted from a `.toml` file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

fn default_alpha() -> f64 {
    1.0
}

/// Symmetric Dirichlet prior for one categorical variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Number of categories. May be left out and supplied on the command line.
    #[serde(default)]
    pub categories: Option<usize>,

    /// Concentration applied to every category.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for PriorConfig {
    fn default() -> Self {
        PriorConfig {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            categories: None,
            alpha: default_alpha(),
        }
    }
}

impl PriorConfig {
    /// Load a prior from a file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Parse a prior from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Parse a prior from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ValidationError> {
        toml::from_str(text).map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, categories: Option<usize>, alpha: Option<f64>) -> Self {
        if categories.is_some() {
            self.categories = categories;
        }
        if let Some(alpha) = alpha {
            self.alpha = alpha;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_json() {
        let prior = PriorConfig::from_json_str(r#"{"schema_version": "1.0.0"}"#).unwrap();
        assert_eq!(prior.schema_version, "1.0.0");
        assert_eq!(prior.categories, None);
        assert_eq!(prior.alpha, 1.0);
    }

    #[test]
    fn test_parse_full_json() {
        let json = r#"{
            "schema_version": "1.0.0",
            "description": "process states R/S/D/Z/T",
            "categories": 5,
            "alpha": 0.5
        }"#;
        let prior = PriorConfig::from_json_str(json).unwrap();
        assert_eq!(prior.categories, Some(5));
        assert_eq!(prior.alpha, 0.5);
        assert_eq!(prior.description.as_deref(), Some("process states R/S/D/Z/T"));
    }

    #[test]
    fn test_parse_toml() {
        let text = "schema_version = \"1.0.0\"\ncategories = 3\nalpha = 2.0\n";
        let prior = PriorConfig::from_toml_str(text).unwrap();
        assert_eq!(prior.categories, Some(3));
        assert_eq!(prior.alpha, 2.0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PriorConfig::from_json_str("{not json"),
            Err(ValidationError::ParseError(_))
        ));
        assert!(matches!(
            PriorConfig::from_toml_str("categories = "),
            Err(ValidationError::ParseError(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let prior = PriorConfig::default().with_overrides(Some(4), None);
        assert_eq!(prior.categories, Some(4));
        assert_eq!(prior.alpha, 1.0);

        let prior = prior.with_overrides(None, Some(0.25));
        assert_eq!(prior.categories, Some(4));
        assert_eq!(prior.alpha, 0.25);
    }
}

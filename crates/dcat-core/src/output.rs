//! Command payloads and their rendering.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::DirichletCategorical;

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON (default for machine consumption)
    #[default]
    Json,

    /// Human-readable text
    Human,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Human => write!(f, "human"),
        }
    }
}

/// Result of `dcat score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub categories: usize,
    pub alpha: f64,
    pub n: u64,
    pub counts: Vec<u64>,
    /// Log marginal likelihood of the observations.
    pub logp_score: f64,
    /// Posterior-predictive log-probability per category.
    pub logp: Vec<f64>,
    pub prior_source: String,
}

impl ScoreReport {
    pub fn from_model(model: &DirichletCategorical, prior_source: String) -> Self {
        ScoreReport {
            categories: model.k(),
            alpha: model.alpha(),
            n: model.n(),
            counts: model.counts().to_vec(),
            logp_score: model.logp_score(),
            logp: (0..model.k()).map(|i| model.logp(i)).collect(),
            prior_source,
        }
    }

    pub fn render_human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "categories={} alpha={} n={} (prior: {})",
            self.categories, self.alpha, self.n, self.prior_source
        );
        let _ = writeln!(out, "logp_score: {:.6}", self.logp_score);
        for (i, (count, logp)) in self.counts.iter().zip(&self.logp).enumerate() {
            let _ = writeln!(
                out,
                "  [{}] count={:<6} p={:.6} logp={:.6}",
                i,
                count,
                logp.exp(),
                logp
            );
        }
        out
    }
}

/// Result of `dcat sample`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleReport {
    pub categories: usize,
    pub alpha: f64,
    pub n: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    pub draws: Vec<usize>,
}

impl SampleReport {
    pub fn render_human(&self) -> String {
        let draws: Vec<String> = self.draws.iter().map(|d| d.to_string()).collect();
        format!("{}\n", draws.join(" "))
    }
}

/// Result of `dcat check-prior`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorReport {
    pub source: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub categories: Option<usize>,
    pub alpha: f64,
}

impl PriorReport {
    pub fn render_human(&self) -> String {
        let categories = self
            .categories
            .map(|k| k.to_string())
            .unwrap_or_else(|| "unset".to_string());
        format!(
            "prior ok: source={} path={} categories={} alpha={}\n",
            self.source,
            self.path.as_deref().unwrap_or("-"),
            categories,
            self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_report_reflects_model() {
        let model = DirichletCategorical::from_counts(1.0, vec![3, 1]).unwrap();
        let report = ScoreReport::from_model(&model, "builtin default".to_string());
        assert_eq!(report.categories, 2);
        assert_eq!(report.n, 4);
        assert_eq!(report.counts, vec![3, 1]);
        assert!((report.logp[0] - (4.0f64 / 6.0).ln()).abs() < 1e-12);
        assert!((report.logp_score - (1.0f64 / 20.0).ln()).abs() < 1e-10);

        let text = report.render_human();
        assert!(text.contains("categories=2"));
        assert!(text.contains("[1] count=1"));
    }

    #[test]
    fn score_report_json_field_names() {
        let model = DirichletCategorical::new(3);
        let report = ScoreReport::from_model(&model, "CLI argument".to_string());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["categories"], 3);
        assert!(value["logp_score"].as_f64().unwrap().abs() < 1e-10);
        assert_eq!(value["logp"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn sample_report_human_is_space_separated() {
        let report = SampleReport {
            categories: 3,
            alpha: 1.0,
            n: 0,
            seed: Some(1),
            draws: vec![0, 2, 1],
        };
        assert_eq!(report.render_human(), "0 2 1\n");
    }

    #[test]
    fn output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Human.to_string(), "human");
    }
}

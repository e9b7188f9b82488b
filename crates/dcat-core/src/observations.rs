//! Parsing observation streams for the CLI.
//!
//! Observations are numbers separated by whitespace and/or commas. Each token
//! is parsed as a real so that `2` and `2.0` are both accepted; whether it
//! names a category is decided by the model.

use crate::error::{Error, Result};
use crate::model::DirichletCategorical;

/// Parse every token of `text` as a number.
pub fn parse_observations(text: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| Error::Observation {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

/// Incorporate every observation into `model`, stopping at the first bad one.
///
/// On error the observations before the bad one stay incorporated.
pub fn incorporate_all(model: &mut DirichletCategorical, observations: &[f64]) -> Result<()> {
    for &x in observations {
        model.try_incorporate(x)?;
    }
    tracing::debug!(
        observations = observations.len(),
        n = model.n(),
        "incorporated observations"
    );
    Ok(())
}

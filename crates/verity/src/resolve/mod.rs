//! Resolution engines: pick the winning value(s) of every data item.
//!
//! All engines implement [`Resolver`]. The iterative engines
//! ([`TruthFinder`], [`TwoEstimates`], [`ThreeEstimates`]) alternate between
//! value confidence and source trustworthiness until the trust vector stops
//! moving; [`Majority`] and [`Optimal`] are single-pass baselines.

mod common;
mod estimates;
mod majority;
mod optimal;
mod truth_finder;

use serde::{Deserialize, Serialize};

use crate::dataset::{ClaimSet, Value};
use crate::error::{Result, VerityError};

pub use common::{cosine_error, dict_norm};
pub use estimates::{ThreeEstimates, TwoEstimates};
pub use majority::Majority;
pub use optimal::Optimal;
pub use truth_finder::TruthFinder;

/// Per-call options shared by every engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Iteration cap for the fixed-point engines.
    pub max_iter: usize,
    /// Number of ranked values returned per item.
    pub top_k: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_iter: 100,
            top_k: 1,
        }
    }
}

impl RunOptions {
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(VerityError::Config("max_iter must be at least 1".to_string()));
        }
        if self.top_k == 0 {
            return Err(VerityError::Config("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Which values a source's trust update counts as "not claimed by it".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplementScope {
    /// Every observed value the source does not claim.
    #[default]
    Unclaimed,
    /// Every value some other source claims, including values the source
    /// shares with others.
    ClaimedByOthers,
}

/// Outcome of a fixed-point loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the tolerance was met before the cap.
    pub converged: bool,
    /// Cosine distance between the last two trust vectors.
    #[serde(deserialize_with = "nan_from_null")]
    pub error: f64,
}

// JSON has no NaN: serde_json writes it as null.
fn nan_from_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One labelled row of a resolved-value table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
    /// Row label, e.g. `TruthFinder_1` or `Majority`.
    pub label: String,
    /// One value per entry of [`Resolution::items`]. `0` means unresolved.
    pub values: Vec<Value>,
}

/// Resolved-value table produced by one `run` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    engine: String,
    items: Vec<usize>,
    rows: Vec<ResolvedRow>,
    convergence: Option<Convergence>,
}

impl Resolution {
    pub fn new(engine: impl Into<String>, items: Vec<usize>, rows: Vec<ResolvedRow>) -> Self {
        Self {
            engine: engine.into(),
            items,
            rows,
            convergence: None,
        }
    }

    pub(crate) fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = Some(convergence);
        self
    }

    /// Name of the engine that produced the table.
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Item id of each column.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn rows(&self) -> &[ResolvedRow] {
        &self.rows
    }

    /// Loop outcome for the iterative engines.
    pub fn convergence(&self) -> Option<Convergence> {
        self.convergence
    }

    /// Best value resolved for `item`.
    pub fn value_for(&self, item: usize) -> Option<Value> {
        let column = self.items.iter().position(|&i| i == item)?;
        self.rows.first().and_then(|row| row.values.get(column).copied())
    }

    /// Append another table's rows. Both tables must cover the same items.
    pub fn stack(mut self, other: Resolution) -> Result<Self> {
        if self.items != other.items {
            return Err(VerityError::ShapeMismatch {
                expected: format!("{} items", self.items.len()),
                found: format!("{} items", other.items.len()),
            });
        }
        self.engine = format!("{}+{}", self.engine, other.engine);
        self.rows.extend(other.rows);
        self.convergence = None;
        Ok(self)
    }
}

/// A truth-discovery engine.
pub trait Resolver {
    /// Engine name used in row labels and reports.
    fn name(&self) -> &str;

    /// Name and parameters, usable verbatim as JSON provenance.
    fn describe(&self) -> serde_json::Value;

    /// Resolve every item that has at least one claim.
    fn run(&self, claims: &ClaimSet, options: &RunOptions) -> Result<Resolution>;
}

/// Reject parameters that must be a probability-like weight.
pub(crate) fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(VerityError::Config(format!("{name} must be in [0, 1], got {value}")))
    }
}

/// Reject non-positive tolerances.
pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance > 0.0 && tolerance.is_finite() {
        Ok(())
    } else {
        Err(VerityError::Config(format!(
            "tolerance must be positive, got {tolerance}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(engine: &str, values: Vec<Value>) -> Resolution {
        Resolution::new(
            engine,
            vec![0, 1],
            vec![ResolvedRow {
                label: engine.to_string(),
                values,
            }],
        )
    }

    #[test]
    fn test_run_options_validation() {
        assert!(RunOptions::default().validate().is_ok());
        assert!(RunOptions::default().with_top_k(0).validate().is_err());
        assert!(RunOptions::default().with_max_iter(0).validate().is_err());
    }

    #[test]
    fn test_value_for() {
        let res = table("Majority", vec![5, 6]);
        assert_eq!(res.value_for(1), Some(6));
        assert_eq!(res.value_for(3), None);
    }

    #[test]
    fn test_stack_requires_same_items() {
        let stacked = table("A", vec![1, 2]).stack(table("B", vec![3, 4])).unwrap();
        assert_eq!(stacked.rows().len(), 2);
        assert_eq!(stacked.engine(), "A+B");

        let other = Resolution::new("C", vec![0], vec![]);
        assert!(matches!(
            table("A", vec![1, 2]).stack(other),
            Err(VerityError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_convergence_nan_survives_json() {
        let convergence = Convergence {
            iterations: 3,
            converged: false,
            error: f64::NAN,
        };
        let json = serde_json::to_string(&convergence).unwrap();
        assert!(json.contains("null"));
        let back: Convergence = serde_json::from_str(&json).unwrap();
        assert_eq!(back.iterations, 3);
        assert!(back.error.is_nan());
    }
}

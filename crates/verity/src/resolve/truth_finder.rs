//! TruthFinder: log-odds confidence with logistic dampening.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::dataset::ClaimSet;
use crate::error::Result;

use super::common::{iterate, select_top_k};
use super::{Resolution, Resolver, RunOptions, check_tolerance, check_unit};

/// TruthFinder parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthFinder {
    /// Initial trustworthiness of every source.
    pub base_trust: f64,
    /// Cosine-distance threshold for convergence.
    pub tolerance: f64,
    /// Logistic dampening applied to the summed log-distrust.
    pub dampening_factor: f64,
}

impl TruthFinder {
    pub const NAME: &'static str = "TruthFinder";

    pub fn new(base_trust: f64) -> Self {
        Self {
            base_trust,
            tolerance: 0.001,
            dampening_factor: 0.1,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_dampening_factor(mut self, dampening_factor: f64) -> Self {
        self.dampening_factor = dampening_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("base_trust", self.base_trust)?;
        check_tolerance(self.tolerance)
    }

    /// Confidence of every value from the current trust snapshot.
    fn confidence(&self, claims: &ClaimSet, trust: &[f64]) -> Vec<f64> {
        let mut confidence = vec![0.0; claims.n_values()];
        for group in claims.items() {
            for &value in group.values() {
                let log_distrust: f64 = group
                    .claims()
                    .iter()
                    .filter(|c| c.value == value)
                    .map(|c| (1.0 - trust[c.source]).ln())
                    .sum();
                confidence[value] = 1.0 / (1.0 + (self.dampening_factor * log_distrust).exp());
            }
        }
        confidence
    }

    /// Mean confidence of the distinct values each source claims.
    fn trust(&self, claims: &ClaimSet, confidence: &[f64]) -> Vec<f64> {
        claims
            .sources()
            .iter()
            .map(|source| {
                let values = source.values();
                values.iter().map(|&v| confidence[v]).sum::<f64>() / values.len() as f64
            })
            .collect()
    }
}

impl Resolver for TruthFinder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> serde_json::Value {
        json!({
            "name": Self::NAME,
            "base_trust": self.base_trust,
            "tolerance": self.tolerance,
            "dampening_factor": self.dampening_factor,
        })
    }

    fn run(&self, claims: &ClaimSet, options: &RunOptions) -> Result<Resolution> {
        self.validate()?;
        options.validate()?;

        let (confidence, convergence) = iterate(
            Self::NAME,
            claims,
            self.base_trust,
            self.tolerance,
            options.max_iter,
            |trust| {
                let confidence = self.confidence(claims, trust);
                let trust = self.trust(claims, &confidence);
                (confidence, trust)
            },
        );

        Ok(select_top_k(
            Self::NAME,
            claims,
            &confidence,
            options.top_k,
            convergence,
        ))
    }
}

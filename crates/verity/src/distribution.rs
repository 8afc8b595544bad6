//! Distribution providers feeding the claim generator.
//!
//! Every provider maps a count `n` to `n` samples in `[0, 1]`. The laws are
//! truncated to the unit interval so the generator can use the samples as
//! coverage rates, accuracy rates, distinctness fractions and spread weights
//! without further clipping.

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use statrs::function::erf::{erfc, erfc_inv};

use crate::error::{Result, VerityError};

/// Upper bound of the Pareto support before it is shifted onto `[0, 1]`.
const PARETO_CUTOFF: f64 = 2.0;

/// A source of `[0, 1]` samples with a provenance description.
pub trait DistributionProvider {
    /// Draw `n` samples in `[0, 1]`.
    fn sample(&self, n: usize, rng: &mut Rng) -> Vec<f64>;

    /// Name and parameters, usable verbatim as JSON provenance.
    fn describe(&self) -> Value;
}

/// The supported sampling laws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum Distribution {
    /// Always returns `value`.
    Constant { value: f64 },
    /// Uniform on `[low, high]`.
    Uniform { low: f64, high: f64 },
    /// Exponential with rate `lmbda`, truncated to `[0, 1]`.
    TruncExponential { lmbda: f64, flipped: bool },
    /// Normal with `mean` and `stdv`, truncated to `[0, 1]`.
    TruncNormal { mean: f64, stdv: f64 },
    /// Pareto with shape `alpha` on `[1, 2]`, shifted onto `[0, 1]`.
    TruncPareto { alpha: f64, flipped: bool },
}

impl Distribution {
    /// Constant law. `value` must lie in `[0, 1]`.
    pub fn constant(value: f64) -> Result<Self> {
        let dist = Distribution::Constant { value };
        dist.validate()?;
        Ok(dist)
    }

    /// Uniform law on `[low, high]` with `0 <= low <= high <= 1`.
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        let dist = Distribution::Uniform { low, high };
        dist.validate()?;
        Ok(dist)
    }

    /// Truncated exponential with rate `lmbda > 0`.
    pub fn trunc_exponential(lmbda: f64) -> Result<Self> {
        let dist = Distribution::TruncExponential {
            lmbda,
            flipped: false,
        };
        dist.validate()?;
        Ok(dist)
    }

    /// Truncated normal with `stdv > 0`.
    pub fn trunc_normal(mean: f64, stdv: f64) -> Result<Self> {
        let dist = Distribution::TruncNormal { mean, stdv };
        dist.validate()?;
        Ok(dist)
    }

    /// Truncated Pareto. Defaults the shape to `log10(5) / log10(4)`.
    pub fn trunc_pareto(alpha: Option<f64>) -> Result<Self> {
        let dist = Distribution::TruncPareto {
            alpha: alpha.unwrap_or_else(default_pareto_alpha),
            flipped: false,
        };
        dist.validate()?;
        Ok(dist)
    }

    /// Reflect the law around `0.5` (`x -> 1 - x`).
    ///
    /// Only the exponential and Pareto laws carry a reflection flag; the other
    /// laws are returned unchanged.
    pub fn flipped(self) -> Self {
        match self {
            Distribution::TruncExponential { lmbda, .. } => Distribution::TruncExponential {
                lmbda,
                flipped: true,
            },
            Distribution::TruncPareto { alpha, .. } => Distribution::TruncPareto {
                alpha,
                flipped: true,
            },
            other => other,
        }
    }

    /// Check the parameters against the law's domain.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Distribution::Constant { value } => {
                if !(0.0..=1.0).contains(&value) {
                    return Err(VerityError::Config(format!(
                        "Constant value must be in [0, 1], got {value}"
                    )));
                }
            }
            Distribution::Uniform { low, high } => {
                if !(low >= 0.0 && high <= 1.0 && low <= high) {
                    return Err(VerityError::Config(format!(
                        "Uniform bounds must satisfy 0 <= low <= high <= 1, got [{low}, {high}]"
                    )));
                }
            }
            Distribution::TruncExponential { lmbda, .. } => {
                if !(lmbda.is_finite() && lmbda > 0.0) {
                    return Err(VerityError::Config(format!(
                        "TruncExponential rate must be positive, got {lmbda}"
                    )));
                }
            }
            Distribution::TruncNormal { mean, stdv } => {
                if !(mean.is_finite() && stdv.is_finite() && stdv > 0.0) {
                    return Err(VerityError::Config(format!(
                        "TruncNormal needs a finite mean and positive stdv, got ({mean}, {stdv})"
                    )));
                }
            }
            Distribution::TruncPareto { alpha, .. } => {
                if !(alpha.is_finite() && alpha > 0.0) {
                    return Err(VerityError::Config(format!(
                        "TruncPareto shape must be positive, got {alpha}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Short display label, e.g. `TruncExponential(0.5, flipped)`.
    pub fn label(&self) -> String {
        match self {
            Distribution::Constant { value } => format!("Constant({value})"),
            Distribution::Uniform { low, high } => format!("Uniform({low}, {high})"),
            Distribution::TruncExponential { lmbda, flipped } => {
                format!("TruncExponential({lmbda}{})", flip_suffix(*flipped))
            }
            Distribution::TruncNormal { mean, stdv } => format!("TruncNormal({mean}, {stdv})"),
            Distribution::TruncPareto { alpha, flipped } => {
                format!("TruncPareto({alpha:.4}{})", flip_suffix(*flipped))
            }
        }
    }

    /// The seven laws swept by the benchmark experiments.
    pub fn presets() -> Vec<Distribution> {
        let alpha = default_pareto_alpha();
        vec![
            Distribution::TruncPareto {
                alpha,
                flipped: false,
            },
            Distribution::TruncExponential {
                lmbda: 1.0,
                flipped: false,
            },
            Distribution::TruncExponential {
                lmbda: 0.5,
                flipped: false,
            },
            Distribution::Uniform {
                low: 0.0,
                high: 1.0,
            },
            Distribution::TruncPareto {
                alpha,
                flipped: true,
            },
            Distribution::TruncExponential {
                lmbda: 1.0,
                flipped: true,
            },
            Distribution::TruncExponential {
                lmbda: 0.5,
                flipped: true,
            },
        ]
    }

    /// Five sharper laws, from strongly low-skewed to strongly high-skewed.
    pub fn extended_presets() -> Vec<Distribution> {
        vec![
            Distribution::TruncPareto {
                alpha: 8.8,
                flipped: true,
            },
            Distribution::TruncExponential {
                lmbda: 4.0,
                flipped: true,
            },
            Distribution::Uniform {
                low: 0.0,
                high: 1.0,
            },
            Distribution::TruncExponential {
                lmbda: 4.0,
                flipped: false,
            },
            Distribution::TruncPareto {
                alpha: 8.8,
                flipped: false,
            },
        ]
    }

    /// Extreme laws that replace one axis of an extended sweep.
    pub fn extension_presets() -> Vec<Distribution> {
        vec![
            Distribution::TruncPareto {
                alpha: 25.3,
                flipped: true,
            },
            Distribution::TruncExponential {
                lmbda: 15.0,
                flipped: true,
            },
            Distribution::TruncExponential {
                lmbda: 15.0,
                flipped: false,
            },
            Distribution::TruncPareto {
                alpha: 25.3,
                flipped: false,
            },
        ]
    }

    /// Map a uniform draw `u` in `[0, 1)` through the inverse CDF.
    fn quantile(&self, u: f64) -> f64 {
        match *self {
            Distribution::Constant { value } => value,
            Distribution::Uniform { low, high } => low + u * (high - low),
            Distribution::TruncExponential { lmbda, flipped } => {
                // Standard exponential truncated at `lmbda`, scaled by `1/lmbda`.
                let x = -(1.0 - u * (1.0 - (-lmbda).exp())).ln() / lmbda;
                reflect(x.clamp(0.0, 1.0), flipped)
            }
            Distribution::TruncNormal { mean, stdv } => {
                let lo = std_normal_cdf((0.0 - mean) / stdv);
                let hi = std_normal_cdf((1.0 - mean) / stdv);
                let p = lo + u * (hi - lo);
                (mean + stdv * std_normal_quantile(p)).clamp(0.0, 1.0)
            }
            Distribution::TruncPareto { alpha, flipped } => {
                let tail = 1.0 - PARETO_CUTOFF.powf(-alpha);
                let x = (1.0 - u * tail).powf(-1.0 / alpha) - 1.0;
                reflect(x.clamp(0.0, 1.0), flipped)
            }
        }
    }
}

impl DistributionProvider for Distribution {
    fn sample(&self, n: usize, rng: &mut Rng) -> Vec<f64> {
        (0..n).map(|_| self.quantile(rng.f64())).collect()
    }

    fn describe(&self) -> Value {
        match *self {
            Distribution::Constant { value } => json!({"name": "Constant", "value": value}),
            Distribution::Uniform { low, high } => {
                json!({"name": "Uniform", "low": low, "high": high})
            }
            Distribution::TruncExponential { lmbda, flipped } => {
                json!({"name": "TruncExponential", "lmbda": lmbda, "flipped": flipped})
            }
            Distribution::TruncNormal { mean, stdv } => {
                json!({"name": "TruncNormal", "mean": mean, "stdv": stdv})
            }
            Distribution::TruncPareto { alpha, flipped } => {
                json!({"name": "TruncPareto", "alpha": alpha, "flipped": flipped})
            }
        }
    }
}

/// Shape used when a Pareto law is requested without one.
pub fn default_pareto_alpha() -> f64 {
    5f64.log10() / 4f64.log10()
}

fn reflect(x: f64, flipped: bool) -> f64 {
    if flipped { 1.0 - x } else { x }
}

fn flip_suffix(flipped: bool) -> &'static str {
    if flipped { ", flipped" } else { "" }
}

fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

fn std_normal_quantile(p: f64) -> f64 {
    -std::f64::consts::SQRT_2 * erfc_inv(2.0 * p)
}

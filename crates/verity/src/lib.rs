//! Verity: synthetic benchmarks for truth-discovery algorithms.
//!
//! Verity generates claim sets in which many sources make conflicting claims
//! about the same data items, with a known ground truth, and runs
//! truth-discovery engines over them to see how often each recovers the truth.
//!
//! # Core Principles
//!
//! - **Controlled noise**: Coverage, accuracy, distinctness and spread of
//!   false values are each drawn from a configurable distribution
//! - **Reproducible**: Every dataset carries the seed that produced it
//! - **Comparable**: All engines share one interface and one scorer
//!
//! # Example
//!
//! ```no_run
//! use verity::{
//!     Dataset, DatasetConfig, Distribution, Resolver, RunOptions, TruthFinder, score,
//! };
//!
//! let uniform = Distribution::uniform(0.0, 1.0).unwrap();
//! let dataset = Dataset::generate(
//!     DatasetConfig::new(100, 100, 10).with_seed(7),
//!     &uniform,
//!     &uniform,
//!     &uniform,
//!     &uniform,
//! )
//! .unwrap();
//!
//! let resolution = TruthFinder::new(0.5)
//!     .run(&dataset.claims(), &RunOptions::default())
//!     .unwrap();
//! let s = score(&resolution, dataset.truth()).unwrap();
//! println!("Accuracy: {:.3}", s.accuracy);
//! ```

pub mod dataset;
pub mod distribution;
pub mod error;
pub mod experiment;
pub mod resolve;
pub mod score;

pub use dataset::{Claim, ClaimSet, Dataset, DatasetConfig, GroundTruth, Value};
pub use distribution::{Distribution, DistributionProvider};
pub use error::{Result, VerityError};
pub use experiment::{
    DistributionSet, EngineResult, Experiment, ExperimentRecord, Sweep, SweepAxis, SweepRecord,
};
pub use resolve::{
    ComplementScope, Convergence, Majority, Optimal, Resolution, ResolvedRow, Resolver,
    RunOptions, ThreeEstimates, TruthFinder, TwoEstimates,
};
pub use score::{Score, score};

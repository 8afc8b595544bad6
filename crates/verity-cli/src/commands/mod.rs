//! CLI command implementations.

pub mod generate;
pub mod resolve;
pub mod run;
pub mod sweep;

use verity::{
    DatasetConfig, Majority, Resolver, RunOptions, ThreeEstimates, TruthFinder, TwoEstimates,
};

use crate::cli::{EngineChoice, EngineParams, SizeArgs};

/// Build one iterative or voting engine from the shared parameters.
///
/// The optimal engine needs the ground truth and is built by the caller.
pub fn build_engine(choice: &EngineChoice, params: &EngineParams) -> Option<Box<dyn Resolver>> {
    let engine: Box<dyn Resolver> = match choice {
        EngineChoice::TruthFinder => {
            let mut tf = TruthFinder::new(params.base_trust);
            if let Some(tolerance) = params.tolerance {
                tf = tf.with_tolerance(tolerance);
            }
            Box::new(tf)
        }
        EngineChoice::TwoEstimates => {
            let mut two = TwoEstimates::new(params.base_trust).with_complement(params.complement.0);
            if let Some(tolerance) = params.tolerance {
                two = two.with_tolerance(tolerance);
            }
            Box::new(two)
        }
        EngineChoice::ThreeEstimates => {
            let mut three =
                ThreeEstimates::new(params.base_trust).with_complement(params.complement.0);
            if let Some(tolerance) = params.tolerance {
                three = three.with_tolerance(tolerance);
            }
            Box::new(three)
        }
        EngineChoice::Majority => Box::new(Majority),
        EngineChoice::Optimal => return None,
    };
    Some(engine)
}

/// Every engine that runs without the ground truth.
pub fn all_engines(params: &EngineParams) -> Vec<Box<dyn Resolver>> {
    [
        EngineChoice::Majority,
        EngineChoice::TruthFinder,
        EngineChoice::TwoEstimates,
        EngineChoice::ThreeEstimates,
    ]
    .iter()
    .filter_map(|choice| build_engine(choice, params))
    .collect()
}

pub fn run_options(params: &EngineParams) -> RunOptions {
    RunOptions::default()
        .with_max_iter(params.max_iter)
        .with_top_k(params.top_k)
}

pub fn dataset_config(size: &SizeArgs) -> DatasetConfig {
    let config = DatasetConfig::new(size.sources, size.items, size.distinct);
    match size.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

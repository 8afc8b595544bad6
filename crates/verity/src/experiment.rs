//! Benchmark experiments: generate, resolve, score and record.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, DatasetConfig};
use crate::distribution::{Distribution, DistributionProvider};
use crate::error::{Result, VerityError};
use crate::resolve::{Convergence, Optimal, Resolver, RunOptions};
use crate::score::{Score, score};

/// The four laws driving one generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSet {
    pub coverage: Distribution,
    pub truth: Distribution,
    pub distinct: Distribution,
    pub spread: Distribution,
}

impl DistributionSet {
    pub fn validate(&self) -> Result<()> {
        self.coverage.validate()?;
        self.truth.validate()?;
        self.distinct.validate()?;
        self.spread.validate()
    }
}

/// Timing and score of one engine on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    /// Wall-clock seconds spent in `run`.
    pub time: f64,
    pub scores: Score,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub convergence: Option<Convergence>,
}

/// Outcome of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub coverage_dist: serde_json::Value,
    pub truth_dist: serde_json::Value,
    pub distinct_dist: serde_json::Value,
    pub spread_dist: serde_json::Value,
    /// Score of the oracle: the ceiling for every engine.
    pub optimal: Score,
    pub n_claims: usize,
    pub iteration_index: usize,
    pub seed: u64,
    /// Per-engine results keyed by engine name, in run order.
    pub results: IndexMap<String, EngineResult>,
}

/// Runs every engine on freshly generated datasets.
pub struct Experiment<'a> {
    resolvers: &'a [Box<dyn Resolver>],
    options: RunOptions,
}

impl<'a> Experiment<'a> {
    pub fn new(resolvers: &'a [Box<dyn Resolver>]) -> Self {
        Self {
            resolvers,
            options: RunOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate one dataset and score every engine on it.
    pub fn run(
        &self,
        config: &DatasetConfig,
        distributions: &DistributionSet,
        iteration_index: usize,
    ) -> Result<ExperimentRecord> {
        distributions.validate()?;
        self.options.validate()?;

        let dataset = Dataset::generate(
            config.clone(),
            &distributions.coverage,
            &distributions.truth,
            &distributions.distinct,
            &distributions.spread,
        )?;
        let claims = dataset.claims();

        let optimal = Optimal::new(dataset.truth().clone()).run(&claims, &self.options)?;
        let optimal = score(&optimal, dataset.truth())?;

        let mut results = IndexMap::new();
        for resolver in self.resolvers {
            let start = Instant::now();
            let resolution = resolver.run(&claims, &self.options)?;
            let time = start.elapsed().as_secs_f64();
            let scores = score(&resolution, dataset.truth())?;
            tracing::debug!(
                engine = resolver.name(),
                time,
                accuracy = scores.accuracy,
                "engine scored"
            );
            results.insert(
                resolver.name().to_string(),
                EngineResult {
                    time,
                    scores,
                    convergence: resolution.convergence(),
                },
            );
        }

        tracing::info!(
            iteration_index,
            n_claims = claims.len(),
            optimal = optimal.accuracy,
            "experiment finished"
        );

        Ok(ExperimentRecord {
            coverage_dist: distributions.coverage.describe(),
            truth_dist: distributions.truth.describe(),
            distinct_dist: distributions.distinct.describe(),
            spread_dist: distributions.spread.describe(),
            optimal,
            n_claims: claims.len(),
            iteration_index,
            seed: dataset.seed(),
            results,
        })
    }
}

/// Results of a sweep over distribution combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub n_sources: usize,
    pub n_dataitems: usize,
    pub n_distinct: usize,
    pub algorithms_info: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub experiments: Vec<ExperimentRecord>,
}

impl SweepRecord {
    /// Save as pretty-printed JSON, replacing any previous save.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VerityError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            VerityError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            VerityError::Persistence(format!("Failed to serialize sweep record: {}", e))
        })?;

        Ok(())
    }

    /// Load a sweep record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            VerityError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let record: SweepRecord = serde_json::from_reader(reader).map_err(|e| {
            VerityError::Persistence(format!(
                "Failed to parse sweep record '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(record)
    }
}

/// One law axis of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepAxis {
    Coverage,
    Truth,
    Distinct,
    Spread,
}

impl SweepAxis {
    pub const ALL: [SweepAxis; 4] = [
        SweepAxis::Coverage,
        SweepAxis::Truth,
        SweepAxis::Distinct,
        SweepAxis::Spread,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepAxis::Coverage => "coverage",
            SweepAxis::Truth => "truth",
            SweepAxis::Distinct => "distinct",
            SweepAxis::Spread => "spread",
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cartesian sweep over coverage × truth × distinct × spread laws.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub config: DatasetConfig,
    pub coverage: Vec<Distribution>,
    pub truth: Vec<Distribution>,
    pub distinct: Vec<Distribution>,
    pub spread: Vec<Distribution>,
    /// Combinations before this index are skipped.
    pub start_index: usize,
    /// Stop once this many combinations have been visited (None = all).
    pub stop_index: Option<usize>,
    /// Save every `save_interval` experiments.
    pub save_interval: usize,
    pub options: RunOptions,
    /// Index of the single spread law kept by [`Sweep::pin_spread`].
    pub part: Option<usize>,
    /// Axis swapped for the extension laws by [`Sweep::with_extension`].
    pub extension: Option<SweepAxis>,
}

impl Sweep {
    /// Sweep every preset law on every axis.
    pub fn presets(config: DatasetConfig) -> Self {
        Self::over(config, Distribution::presets())
    }

    /// Sweep the five extended laws on every axis.
    pub fn extended(config: DatasetConfig) -> Self {
        Self::over(config, Distribution::extended_presets())
    }

    fn over(config: DatasetConfig, laws: Vec<Distribution>) -> Self {
        Self {
            config,
            coverage: laws.clone(),
            truth: laws.clone(),
            distinct: laws.clone(),
            spread: laws,
            start_index: 0,
            stop_index: None,
            save_interval: 20,
            options: RunOptions::default(),
            part: None,
            extension: None,
        }
    }

    /// Keep only the `index`-th spread law, so the sweep can be split into
    /// parts run side by side.
    pub fn pin_spread(mut self, index: usize) -> Result<Self> {
        let law = self.spread.get(index).cloned().ok_or_else(|| {
            VerityError::Config(format!(
                "spread index {index} out of range, expected less than {}",
                self.spread.len()
            ))
        })?;
        self.spread = vec![law];
        self.part = Some(index);
        Ok(self)
    }

    /// Replace the laws of `axis` with [`Distribution::extension_presets`].
    pub fn with_extension(mut self, axis: SweepAxis) -> Self {
        let laws = Distribution::extension_presets();
        match axis {
            SweepAxis::Coverage => self.coverage = laws,
            SweepAxis::Truth => self.truth = laws,
            SweepAxis::Distinct => self.distinct = laws,
            SweepAxis::Spread => self.spread = laws,
        }
        self.extension = Some(axis);
        self
    }

    /// File stem for this sweep's record: `base`, then `-part<N>`,
    /// `-ext<axis>`, `_<start>` and `-<last index>` when they apply.
    pub fn output_stem(&self, base: &str) -> String {
        let mut stem = base.to_string();
        if let Some(part) = self.part {
            stem.push_str(&format!("-part{part}"));
        }
        if let Some(axis) = self.extension {
            stem.push_str(&format!("-ext{axis}"));
        }
        if self.start_index != 0 {
            stem.push_str(&format!("_{}", self.start_index));
        }
        if let Some(stop) = self.stop_index {
            stem.push_str(&format!("-{}", stop.saturating_sub(1)));
        }
        stem
    }

    /// Every combination, spread varying fastest.
    pub fn combinations(&self) -> Vec<DistributionSet> {
        let mut combos = Vec::with_capacity(
            self.coverage.len() * self.truth.len() * self.distinct.len() * self.spread.len(),
        );
        for coverage in &self.coverage {
            for truth in &self.truth {
                for distinct in &self.distinct {
                    for spread in &self.spread {
                        combos.push(DistributionSet {
                            coverage: coverage.clone(),
                            truth: truth.clone(),
                            distinct: distinct.clone(),
                            spread: spread.clone(),
                        });
                    }
                }
            }
        }
        combos
    }

    /// Run the sweep, saving to `output` periodically and at the end.
    ///
    /// Refuses to start if `output` already exists. `on_progress` receives the
    /// combination index and the total after each visited combination.
    pub fn run(
        &self,
        resolvers: &[Box<dyn Resolver>],
        output: Option<&Path>,
        mut on_progress: impl FnMut(usize, usize),
    ) -> Result<SweepRecord> {
        self.config.validate()?;
        if self.save_interval == 0 {
            return Err(VerityError::Config(
                "save_interval must be at least 1".to_string(),
            ));
        }
        if let Some(path) = output {
            if path.exists() {
                return Err(VerityError::AlreadyExists(path.to_path_buf()));
            }
        }

        let mut record = SweepRecord {
            n_sources: self.config.n_sources,
            n_dataitems: self.config.n_dataitems,
            n_distinct: self.config.n_distinct,
            algorithms_info: resolvers.iter().map(|r| r.describe()).collect(),
            created_at: Utc::now(),
            experiments: Vec::new(),
        };

        let experiment = Experiment::new(resolvers).with_options(self.options);
        let combos = self.combinations();
        let total = combos.len();

        for (index, distributions) in combos.iter().enumerate() {
            if self.stop_index.is_some_and(|stop| index >= stop) {
                break;
            }
            if index < self.start_index {
                on_progress(index, total);
                continue;
            }

            let config = DatasetConfig {
                seed: self.config.seed.map(|s| s.wrapping_add(index as u64)),
                ..self.config.clone()
            };
            record
                .experiments
                .push(experiment.run(&config, distributions, index)?);

            if let Some(path) = output {
                if index % self.save_interval == 0 {
                    record.save(path)?;
                }
            }
            on_progress(index, total);
        }

        if let Some(path) = output {
            record.save(path)?;
        }
        Ok(record)
    }
}

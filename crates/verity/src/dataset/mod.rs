//! Synthetic claim-set generation.
//!
//! A [`Dataset`] is produced in four phases over a dense [`ClaimMatrix`]:
//!
//! 1. Source rows: each source draws a coverage and an accuracy rate and gets
//!    a shuffled row of no-claim / true / false cells.
//! 2. Distinctness: false cells of an item are split across several false
//!    values with frequencies drawn from the spread distribution.
//! 3. Encoding: each item's categories go through their own seeded
//!    [`ColumnEncoding`].
//! 4. The truth row is detached and the sparse [`ClaimSet`] extracted.

mod claims;
mod encoding;
mod matrix;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::distribution::DistributionProvider;
use crate::error::{Result, VerityError};

pub use claims::{Claim, ClaimSet, ItemClaims, SlotClaim, SourceClaims};
pub use encoding::{ColumnEncoding, ENCODED_MAX, ENCODED_MIN};
pub use matrix::{ClaimMatrix, DistinctSplit, MASK_FALSE, MASK_NA, MASK_TRUE};

/// An encoded claim value. `0` means "no claim".
pub type Value = u64;

/// Largest `n_distinct` a dataset may ask for.
pub const MAX_DISTINCT: usize = 1_000_000;

/// Generator sizes and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub n_sources: usize,
    pub n_dataitems: usize,
    /// Upper bound on the number of distinct values per item.
    pub n_distinct: usize,
    /// Seed for every random draw (None = fresh seed).
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            n_sources: 1000,
            n_dataitems: 1000,
            n_distinct: 20,
            seed: None,
        }
    }
}

impl DatasetConfig {
    pub fn new(n_sources: usize, n_dataitems: usize, n_distinct: usize) -> Self {
        Self {
            n_sources,
            n_dataitems,
            n_distinct,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject zero sizes and more distinct values than the encoding can hold.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("n_sources", self.n_sources),
            ("n_dataitems", self.n_dataitems),
            ("n_distinct", self.n_distinct),
        ] {
            if value == 0 {
                return Err(VerityError::Config(format!("{name} must be at least 1")));
            }
        }
        if self.n_distinct > MAX_DISTINCT {
            return Err(VerityError::Config(format!(
                "n_distinct must be at most {MAX_DISTINCT}, got {}",
                self.n_distinct
            )));
        }
        Ok(())
    }
}

/// The true value of every data item, indexed by item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruth {
    values: Vec<Value>,
}

#[derive(Serialize, Deserialize)]
struct TruthRecord {
    item: usize,
    value: Value,
}

impl GroundTruth {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of data items.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True value of `item`.
    pub fn get(&self, item: usize) -> Option<Value> {
        self.values.get(item).copied()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Write an `item,value` CSV file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for (item, &value) in self.values.iter().enumerate() {
            writer.serialize(TruthRecord { item, value })?;
        }
        writer.flush().map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Read an `item,value` CSV file. Item ids must be `0..n` without gaps.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VerityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let mut records: Vec<TruthRecord> = reader
            .deserialize()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        records.sort_by_key(|r| r.item);
        for (expected, record) in records.iter().enumerate() {
            if record.item != expected {
                return Err(VerityError::ShapeMismatch {
                    expected: format!("item {expected}"),
                    found: format!("item {}", record.item),
                });
            }
        }
        Ok(Self::new(records.into_iter().map(|r| r.value).collect()))
    }
}

impl From<Vec<Value>> for GroundTruth {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// A generated benchmark instance.
#[derive(Debug, Clone)]
pub struct Dataset {
    config: DatasetConfig,
    seed: u64,
    matrix: ClaimMatrix,
    truth: GroundTruth,
    splits: Vec<DistinctSplit>,
    encodings: Vec<ColumnEncoding>,
}

impl Dataset {
    /// Generate a dataset from the four distribution providers.
    pub fn generate(
        config: DatasetConfig,
        coverage: &dyn DistributionProvider,
        truth: &dyn DistributionProvider,
        distinct: &dyn DistributionProvider,
        spread: &dyn DistributionProvider,
    ) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = Rng::with_seed(seed);
        let start = Instant::now();

        let mut matrix = ClaimMatrix::with_truth_row(config.n_sources, config.n_dataitems);
        matrix.fill_sources(coverage, truth, &mut rng);
        tracing::debug!(elapsed = ?start.elapsed(), "source rows filled");

        let splits = matrix.expand_distinct(config.n_distinct, distinct, spread, &mut rng);
        tracing::debug!(elapsed = ?start.elapsed(), split_items = splits.len(), "distinct values expanded");

        // A single false category still needs a code when n_distinct is 1.
        let max_category = config.n_distinct.max(MASK_FALSE as usize);
        let encodings: Vec<ColumnEncoding> = (0..config.n_dataitems)
            .map(|_| ColumnEncoding::new(max_category, rng.u64(..)))
            .collect();
        matrix.encode(&encodings);

        let (matrix, truth_row) = matrix.split_truth();
        tracing::debug!(
            elapsed = ?start.elapsed(),
            n_sources = config.n_sources,
            n_dataitems = config.n_dataitems,
            "dataset generated"
        );

        Ok(Self {
            config,
            seed,
            matrix,
            truth: GroundTruth::new(truth_row),
            splits,
            encodings,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Seed actually used, for reproducing this dataset.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Encoded source × item matrix (truth row removed).
    pub fn matrix(&self) -> &ClaimMatrix {
        &self.matrix
    }

    pub fn truth(&self) -> &GroundTruth {
        &self.truth
    }

    /// Per-item split of false claims, for items with more than one false value.
    pub fn splits(&self) -> &[DistinctSplit] {
        &self.splits
    }

    /// Encoding used for each item's column.
    pub fn encodings(&self) -> &[ColumnEncoding] {
        &self.encodings
    }

    /// Extract the sparse claim relation.
    pub fn claims(&self) -> ClaimSet {
        self.matrix.extract_claims()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;

    fn uniform() -> Distribution {
        Distribution::uniform(0.0, 1.0).unwrap()
    }

    fn generate(seed: u64) -> Dataset {
        Dataset::generate(
            DatasetConfig::new(30, 20, 6).with_seed(seed),
            &uniform(),
            &uniform(),
            &uniform(),
            &uniform(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_sizes() {
        let result = Dataset::generate(
            DatasetConfig::new(0, 10, 5),
            &uniform(),
            &uniform(),
            &uniform(),
            &uniform(),
        );
        assert!(matches!(result, Err(VerityError::Config(_))));
    }

    #[test]
    fn test_rejects_too_many_distinct_values() {
        assert!(DatasetConfig::new(3, 3, MAX_DISTINCT).validate().is_ok());
        let result = Dataset::generate(
            DatasetConfig::new(3, 3, 90_000_000),
            &uniform(),
            &uniform(),
            &uniform(),
            &uniform(),
        );
        assert!(matches!(result, Err(VerityError::Config(_))));
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = generate(17);
        let b = generate(17);
        assert_eq!(a.matrix(), b.matrix());
        assert_eq!(a.truth(), b.truth());
        assert_eq!(a.seed(), 17);
    }

    #[test]
    fn test_truth_is_encoded_true_category() {
        let ds = generate(5);
        assert_eq!(ds.truth().len(), 20);
        for (item, &value) in ds.truth().as_slice().iter().enumerate() {
            assert_eq!(ds.encodings()[item].decode(value), Some(MASK_TRUE));
        }
    }

    #[test]
    fn test_claims_are_consistent_with_matrix() {
        let ds = generate(8);
        let claims = ds.claims();
        let non_zero = (0..30)
            .flat_map(|s| ds.matrix().row(s).to_vec())
            .filter(|&v| v != 0)
            .count();
        assert_eq!(claims.len(), non_zero);
        assert!(claims.iter().all(|c| c.value != 0));
    }

    #[test]
    fn test_single_distinct_still_encodes_false_values() {
        let ds = Dataset::generate(
            DatasetConfig::new(10, 10, 1).with_seed(3),
            &Distribution::constant(1.0).unwrap(),
            &Distribution::constant(0.0).unwrap(),
            &uniform(),
            &uniform(),
        )
        .unwrap();
        for claim in &ds.claims() {
            assert!((ENCODED_MIN..ENCODED_MAX).contains(&claim.value));
        }
    }

    #[test]
    fn test_truth_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truth.csv");
        let truth = GroundTruth::new(vec![10, 20, 30]);
        truth.write_csv(&path).unwrap();
        assert_eq!(GroundTruth::read_csv(&path).unwrap(), truth);
    }
}

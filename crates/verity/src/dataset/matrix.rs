//! Dense source × item claim matrix and the generation phases that fill it.

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::distribution::DistributionProvider;

use super::Value;
use super::claims::{Claim, ClaimSet};
use super::encoding::ColumnEncoding;

/// Cell category: the source makes no claim.
pub const MASK_NA: Value = 0;
/// Cell category: the source claims the true value.
pub const MASK_TRUE: Value = 1;
/// Cell category: the source claims a false value (base of the variant tags).
pub const MASK_FALSE: Value = 2;

/// How one item's false claims were split across distinct false values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinctSplit {
    pub item: usize,
    /// False-claim cells in the item's column.
    pub false_count: usize,
    /// Occurrences assigned to each false-value variant.
    pub buckets: Vec<usize>,
}

/// Row-major grid of `rows × n_dataitems` cells.
///
/// While the truth row is attached it is the last row (index `n_sources`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimMatrix {
    n_sources: usize,
    n_dataitems: usize,
    has_truth: bool,
    cells: Vec<Value>,
}

impl ClaimMatrix {
    /// Empty matrix for `n_sources` sources plus a truth row of `MASK_TRUE`.
    pub fn with_truth_row(n_sources: usize, n_dataitems: usize) -> Self {
        let mut cells = vec![MASK_NA; (n_sources + 1) * n_dataitems];
        let truth_start = n_sources * n_dataitems;
        cells[truth_start..].fill(MASK_TRUE);
        Self {
            n_sources,
            n_dataitems,
            has_truth: true,
            cells,
        }
    }

    /// Build a matrix from explicit source rows (no truth row).
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        let n_sources = rows.len();
        let n_dataitems = rows.first().map(Vec::len).unwrap_or(0);
        let cells: Vec<Value> = rows
            .into_iter()
            .flat_map(|mut row| {
                row.resize(n_dataitems, MASK_NA);
                row
            })
            .collect();
        Self {
            n_sources,
            n_dataitems,
            has_truth: false,
            cells,
        }
    }

    pub fn n_sources(&self) -> usize {
        self.n_sources
    }

    pub fn n_dataitems(&self) -> usize {
        self.n_dataitems
    }

    fn n_rows(&self) -> usize {
        self.n_sources + usize::from(self.has_truth)
    }

    /// Cell at `(row, item)`.
    pub fn get(&self, row: usize, item: usize) -> Value {
        self.cells[row * self.n_dataitems + item]
    }

    fn get_mut(&mut self, row: usize, item: usize) -> &mut Value {
        &mut self.cells[row * self.n_dataitems + item]
    }

    /// One source's row.
    pub fn row(&self, row: usize) -> &[Value] {
        let start = row * self.n_dataitems;
        &self.cells[start..start + self.n_dataitems]
    }

    /// The cells of one item's column, source rows first.
    pub fn column(&self, item: usize) -> impl Iterator<Item = Value> + '_ {
        (0..self.n_rows()).map(move |row| self.get(row, item))
    }

    /// Fill every source row from coverage and accuracy draws.
    ///
    /// Each source draws one coverage rate and one accuracy rate, builds a row
    /// with the implied counts of no-claim, true and false cells, and permutes
    /// it uniformly at random.
    pub fn fill_sources(
        &mut self,
        coverage: &dyn DistributionProvider,
        truth: &dyn DistributionProvider,
        rng: &mut Rng,
    ) {
        let n = self.n_dataitems;
        for source in 0..self.n_sources {
            let c = coverage.sample(1, rng).first().copied().unwrap_or(0.0);
            let t = truth.sample(1, rng).first().copied().unwrap_or(0.0);

            let zero_count = ((n as f64 * (1.0 - c)).floor() as usize).min(n);
            let value_count = n - zero_count;
            let false_count = ((value_count as f64 * (1.0 - t)).floor() as usize).min(value_count);
            let true_count = value_count - false_count;

            let mut row = Vec::with_capacity(n);
            row.extend(std::iter::repeat_n(MASK_NA, zero_count));
            row.extend(std::iter::repeat_n(MASK_TRUE, true_count));
            row.extend(std::iter::repeat_n(MASK_FALSE, false_count));
            rng.shuffle(&mut row);

            let start = source * n;
            self.cells[start..start + n].copy_from_slice(&row);
        }
    }

    /// Split each item's false claims across several distinct false values.
    ///
    /// Items whose scaled distinct target floors to one or less keep a single
    /// false category and produce no split.
    pub fn expand_distinct(
        &mut self,
        n_distinct: usize,
        distinct: &dyn DistributionProvider,
        spread: &dyn DistributionProvider,
        rng: &mut Rng,
    ) -> Vec<DistinctSplit> {
        let targets = distinct.sample(self.n_dataitems, rng);
        let mut splits = Vec::new();

        for (item, fraction) in targets.into_iter().enumerate() {
            // Clamped so every tag stays inside the column encoding.
            let distinct_d = (fraction * n_distinct as f64).floor().min(n_distinct as f64);
            if distinct_d.is_nan() || distinct_d <= 1.0 {
                continue;
            }
            let n_buckets = distinct_d as usize - 1;

            let false_rows: Vec<usize> = (0..self.n_sources)
                .filter(|&row| self.get(row, item) == MASK_FALSE)
                .collect();

            let weights = spread.sample(n_buckets, rng);
            let buckets = multinomial(false_rows.len(), &probabilities(&weights), rng);

            let mut tags: Vec<Value> = buckets
                .iter()
                .enumerate()
                .flat_map(|(bucket, &count)| std::iter::repeat_n(bucket as Value, count))
                .collect();
            rng.shuffle(&mut tags);

            for (&row, tag) in false_rows.iter().zip(tags) {
                *self.get_mut(row, item) += tag;
            }

            splits.push(DistinctSplit {
                item,
                false_count: false_rows.len(),
                buckets,
            });
        }

        splits
    }

    /// Replace every cell of each column with its column encoding.
    pub fn encode(&mut self, encodings: &[ColumnEncoding]) {
        for (item, encoding) in encodings.iter().enumerate().take(self.n_dataitems) {
            for row in 0..self.n_rows() {
                let cell = self.get_mut(row, item);
                if let Some(code) = encoding.encode(*cell) {
                    *cell = code;
                }
            }
        }
    }

    /// Detach the truth row, returning it alongside the source-only matrix.
    pub fn split_truth(mut self) -> (Self, Vec<Value>) {
        if !self.has_truth {
            return (self, Vec::new());
        }
        let truth = self.cells.split_off(self.n_sources * self.n_dataitems);
        self.has_truth = false;
        (self, truth)
    }

    /// Extract the sparse claim relation, item-major then source-minor.
    ///
    /// No-claim cells are dropped; the truth row is never extracted.
    pub fn extract_claims(&self) -> ClaimSet {
        let mut claims = Vec::new();
        for item in 0..self.n_dataitems {
            for source in 0..self.n_sources {
                let value = self.get(source, item);
                if value != MASK_NA {
                    claims.push(Claim {
                        source,
                        item,
                        value,
                    });
                }
            }
        }
        ClaimSet::from_valid_claims(claims)
    }
}

/// Normalise weights to probabilities, falling back to uniform weights when
/// they do not sum to a positive finite number.
fn probabilities(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / weights.len() as f64; weights.len()]
    }
}

/// Assign `trials` occurrences to buckets with the given probabilities.
fn multinomial(trials: usize, probs: &[f64], rng: &mut Rng) -> Vec<usize> {
    let mut counts = vec![0; probs.len()];
    if probs.is_empty() {
        return counts;
    }
    let last = probs.len() - 1;
    for _ in 0..trials {
        let u = rng.f64();
        let mut acc = 0.0;
        let mut chosen = last;
        for (bucket, p) in probs.iter().enumerate() {
            acc += p;
            if u < acc {
                chosen = bucket;
                break;
            }
        }
        counts[chosen] += 1;
    }
    counts
}

//! Per-item category encoding.
//!
//! Each data item gets its own seeded bijection from mask categories to opaque
//! values, so a value only identifies a claim within its own column.

use fastrand::Rng;
use indexmap::IndexSet;

use super::Value;

/// Smallest encoded value (inclusive).
pub const ENCODED_MIN: Value = 10_000_000;
/// Largest encoded value (exclusive).
pub const ENCODED_MAX: Value = 100_000_000;

/// Seeded bijection from categories `0..len` to encoded values.
///
/// Category `0` (no claim) always maps to `0`. Every other category maps to a
/// distinct value in `[ENCODED_MIN, ENCODED_MAX)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEncoding {
    seed: u64,
    codes: Vec<Value>,
}

impl ColumnEncoding {
    /// Build an encoding for categories `0..=max_category`.
    ///
    /// `max_category` must stay well below `ENCODED_MAX - ENCODED_MIN`;
    /// [`DatasetConfig::validate`](super::DatasetConfig::validate) caps it.
    pub fn new(max_category: usize, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let mut codes: IndexSet<Value> = IndexSet::with_capacity(max_category + 1);
        codes.insert(0);
        while codes.len() <= max_category {
            codes.insert(rng.u64(ENCODED_MIN..ENCODED_MAX));
        }
        Self {
            seed,
            codes: codes.into_iter().collect(),
        }
    }

    /// Seed this encoding was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of categories covered.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Encoded value for `category`, or `None` if it is out of range.
    pub fn encode(&self, category: Value) -> Option<Value> {
        usize::try_from(category)
            .ok()
            .and_then(|idx| self.codes.get(idx))
            .copied()
    }

    /// Category for an encoded value, if it belongs to this column.
    pub fn decode(&self, value: Value) -> Option<Value> {
        self.codes
            .iter()
            .position(|&code| code == value)
            .map(|idx| idx as Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_maps_to_zero() {
        for seed in 0..20 {
            let enc = ColumnEncoding::new(5, seed);
            assert_eq!(enc.encode(0), Some(0));
        }
    }

    #[test]
    fn test_codes_are_distinct_and_in_range() {
        let enc = ColumnEncoding::new(50, 42);
        assert_eq!(enc.len(), 51);
        let mut seen = std::collections::HashSet::new();
        for category in 1..=50 {
            let code = enc.encode(category).unwrap();
            assert!((ENCODED_MIN..ENCODED_MAX).contains(&code));
            assert!(seen.insert(code));
        }
    }

    #[test]
    fn test_wide_column_encodes_every_category() {
        let enc = ColumnEncoding::new(200_000, 5);
        assert_eq!(enc.len(), 200_001);
        let distinct: std::collections::HashSet<Value> =
            (0..=200_000).filter_map(|c| enc.encode(c)).collect();
        assert_eq!(distinct.len(), 200_001);
    }

    #[test]
    fn test_same_seed_same_encoding() {
        assert_eq!(ColumnEncoding::new(10, 9), ColumnEncoding::new(10, 9));
        assert_ne!(ColumnEncoding::new(10, 9), ColumnEncoding::new(10, 10));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let enc = ColumnEncoding::new(4, 1);
        for category in 0..=4 {
            let code = enc.encode(category).unwrap();
            assert_eq!(enc.decode(code), Some(category));
        }
        assert_eq!(enc.encode(5), None);
        assert_eq!(enc.decode(1), None);
    }
}

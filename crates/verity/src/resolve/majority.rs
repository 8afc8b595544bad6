//! Majority vote baseline.

use indexmap::IndexMap;
use serde_json::json;

use crate::dataset::{ClaimSet, ItemClaims, Value};
use crate::error::Result;

use super::{Resolution, ResolvedRow, Resolver, RunOptions};

/// Picks the most frequently claimed value of each item.
///
/// Ties go to the smallest encoded value. Single pass, no trust model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Majority;

impl Majority {
    pub const NAME: &'static str = "Majority";

    fn mode(claims: &ClaimSet, group: &ItemClaims) -> Value {
        let mut counts: IndexMap<Value, usize> = IndexMap::new();
        for claim in group.claims() {
            *counts.entry(claims.value(claim.value)).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then(vb.cmp(va)))
            .map(|(value, _)| value)
            .unwrap_or(0)
    }
}

impl Resolver for Majority {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> serde_json::Value {
        json!({"name": Self::NAME})
    }

    fn run(&self, claims: &ClaimSet, _options: &RunOptions) -> Result<Resolution> {
        let items = claims.items().iter().map(|g| g.item()).collect();
        let values = claims
            .items()
            .iter()
            .map(|group| Self::mode(claims, group))
            .collect();
        Ok(Resolution::new(
            Self::NAME,
            items,
            vec![ResolvedRow {
                label: Self::NAME.to_string(),
                values,
            }],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Claim;

    fn claims(triples: &[(usize, usize, Value)]) -> ClaimSet {
        ClaimSet::from_claims(triples.iter().map(|&(source, item, value)| Claim {
            source,
            item,
            value,
        }))
        .unwrap()
    }

    #[test]
    fn test_two_votes_beat_one() {
        let set = claims(&[(0, 0, 500), (1, 0, 500), (2, 0, 300)]);
        let res = Majority.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.rows()[0].label, "Majority");
        assert_eq!(res.value_for(0), Some(500));
    }

    #[test]
    fn test_tie_goes_to_smallest_value() {
        let set = claims(&[(0, 0, 900), (1, 0, 300), (2, 0, 900), (3, 0, 300)]);
        let res = Majority.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.value_for(0), Some(300));
    }

    #[test]
    fn test_items_without_claims_are_skipped() {
        // Item 1 has no claims at all.
        let set = claims(&[(0, 0, 5), (0, 2, 7)]);
        let res = Majority.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.items(), &[0, 2]);
        assert_eq!(res.value_for(1), None);
    }

    #[test]
    fn test_empty_claim_set() {
        let set = ClaimSet::from_claims(Vec::new()).unwrap();
        let res = Majority.run(&set, &RunOptions::default()).unwrap();
        assert!(res.items().is_empty());
        assert!(res.rows()[0].values.is_empty());
    }
}

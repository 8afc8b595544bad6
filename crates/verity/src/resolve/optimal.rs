//! Oracle baseline: the best any resolver could do on the given claims.

use serde_json::json;

use crate::dataset::{ClaimSet, GroundTruth};
use crate::error::Result;

use super::{Resolution, ResolvedRow, Resolver, RunOptions};

/// Returns the true value wherever some source claims it, `0` elsewhere.
#[derive(Debug, Clone)]
pub struct Optimal {
    truth: GroundTruth,
}

impl Optimal {
    pub const NAME: &'static str = "Optimal";

    pub fn new(truth: GroundTruth) -> Self {
        Self { truth }
    }
}

impl Resolver for Optimal {
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
            .map(|group| {
                let Some(truth) = self.truth.get(group.item()) else {
                    return 0;
                };
                let attainable = group.values().iter().any(|&v| claims.value(v) == truth);
                if attainable { truth } else { 0 }
            })
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
    use crate::dataset::{Claim, Value};

    fn claims(triples: &[(usize, usize, Value)]) -> ClaimSet {
        ClaimSet::from_claims(triples.iter().map(|&(source, item, value)| Claim {
            source,
            item,
            value,
        }))
        .unwrap()
    }

    #[test]
    fn test_returns_claimed_truth() {
        let set = claims(&[(0, 0, 500), (1, 0, 500), (2, 0, 300)]);
        let optimal = Optimal::new(GroundTruth::new(vec![500]));
        let res = optimal.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.value_for(0), Some(500));
    }

    #[test]
    fn test_unattainable_truth_is_zero() {
        let set = claims(&[(0, 0, 300), (1, 1, 42)]);
        let optimal = Optimal::new(GroundTruth::new(vec![500, 42]));
        let res = optimal.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.rows()[0].values, vec![0, 42]);
    }

    #[test]
    fn test_item_outside_truth_is_zero() {
        let set = claims(&[(0, 3, 300)]);
        let optimal = Optimal::new(GroundTruth::new(vec![1]));
        let res = optimal.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.value_for(3), Some(0));
    }
}

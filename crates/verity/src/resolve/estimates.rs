//! TwoEstimates and ThreeEstimates.
//!
//! Both engines score a value by how much its supporters are trusted and how
//! much the sources backing rival values are trusted, then score a source by
//! how well its values and the values it stays away from agree with that.
//! ThreeEstimates adds a per-value error factor that scales every vote.
//!
//! Every phase is a pure function from the previous snapshots to a new one.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::dataset::ClaimSet;
use crate::error::{Result, VerityError};

use super::common::{dict_norm, iterate, select_top_k};
use super::{ComplementScope, Resolution, Resolver, RunOptions, check_tolerance, check_unit};

/// Sum of `term` over the complement of each source's claimed values.
///
/// Each term is added directly, in the order the complement lists its
/// values: slot order for `Unclaimed`, earliest rival claim for
/// `ClaimedByOthers`. Subtracting from a grand total loses every small term
/// once one term dwarfs the rest.
fn complement_sums(
    claims: &ClaimSet,
    scope: ComplementScope,
    term: impl Fn(usize) -> f64,
) -> Vec<f64> {
    let mut own = vec![false; claims.n_values()];
    claims
        .sources()
        .iter()
        .enumerate()
        .map(|(slot, source)| match scope {
            ComplementScope::Unclaimed => {
                for &v in source.values() {
                    own[v] = true;
                }
                let sum: f64 = (0..claims.n_values()).filter(|&v| !own[v]).map(&term).sum();
                for &v in source.values() {
                    own[v] = false;
                }
                sum
            }
            ComplementScope::ClaimedByOthers => claims
                .values_claimed_by_others(slot)
                .into_iter()
                .map(&term)
                .sum::<f64>(),
        })
        .collect()
}

/// TwoEstimates parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoEstimates {
    pub base_trust: f64,
    pub tolerance: f64,
    /// Weight of the shifted score against its rounded value in normalisation.
    pub lmbda: f64,
    pub complement: ComplementScope,
}

impl TwoEstimates {
    pub const NAME: &'static str = "TwoEstimates";

    pub fn new(base_trust: f64) -> Self {
        Self {
            base_trust,
            tolerance: 0.001,
            lmbda: 0.5,
            complement: ComplementScope::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_lambda(mut self, lmbda: f64) -> Self {
        self.lmbda = lmbda;
        self
    }

    pub fn with_complement(mut self, complement: ComplementScope) -> Self {
        self.complement = complement;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("base_trust", self.base_trust)?;
        check_unit("lmbda", self.lmbda)?;
        check_tolerance(self.tolerance)
    }

    fn confidence(&self, claims: &ClaimSet, trust: &[f64]) -> Vec<f64> {
        let mut confidence = vec![0.0; claims.n_values()];
        for group in claims.items() {
            let n_claims = group.claims().len() as f64;
            for &value in group.values() {
                let mut pos = 0.0;
                let mut neg = 0.0;
                for claim in group.claims() {
                    if claim.value == value {
                        pos += 1.0 - trust[claim.source];
                    } else {
                        neg += trust[claim.source];
                    }
                }
                confidence[value] = (pos + neg) / n_claims;
            }
        }
        dict_norm(&confidence, self.lmbda)
    }

    fn trust(&self, claims: &ClaimSet, confidence: &[f64]) -> Vec<f64> {
        let negs = complement_sums(claims, self.complement, |v| confidence[v]);
        let trust: Vec<f64> = claims
            .sources()
            .iter()
            .zip(negs)
            .map(|(source, neg)| {
                let values = source.values();
                let pos: f64 = values.iter().map(|&v| 1.0 - confidence[v]).sum();
                (pos + neg) / values.len() as f64
            })
            .collect();
        dict_norm(&trust, self.lmbda)
    }
}

impl Resolver for TwoEstimates {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> serde_json::Value {
        json!({
            "name": Self::NAME,
            "base_trust": self.base_trust,
            "tolerance": self.tolerance,
            "lmbda": self.lmbda,
            "complement": self.complement,
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

/// ThreeEstimates parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeEstimates {
    pub base_trust: f64,
    pub tolerance: f64,
    pub lmbda: f64,
    /// Initial error factor of every value.
    pub base_error_factor: f64,
    pub complement: ComplementScope,
}

impl ThreeEstimates {
    pub const NAME: &'static str = "ThreeEstimates";

    pub fn new(base_trust: f64) -> Self {
        Self {
            base_trust,
            tolerance: 0.001,
            lmbda: 0.5,
            base_error_factor: 0.1,
            complement: ComplementScope::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_lambda(mut self, lmbda: f64) -> Self {
        self.lmbda = lmbda;
        self
    }

    pub fn with_base_error_factor(mut self, base_error_factor: f64) -> Self {
        self.base_error_factor = base_error_factor;
        self
    }

    pub fn with_complement(mut self, complement: ComplementScope) -> Self {
        self.complement = complement;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("base_trust", self.base_trust)?;
        check_unit("lmbda", self.lmbda)?;
        if !self.base_error_factor.is_finite() {
            return Err(VerityError::Config(format!(
                "base_error_factor must be finite, got {}",
                self.base_error_factor
            )));
        }
        check_tolerance(self.tolerance)
    }

    fn confidence(&self, claims: &ClaimSet, trust: &[f64], error_factor: &[f64]) -> Vec<f64> {
        let mut confidence = vec![0.0; claims.n_values()];
        for group in claims.items() {
            let n_claims = group.claims().len() as f64;
            for &value in group.values() {
                let errf = error_factor[value];
                let mut pos = 0.0;
                let mut neg = 0.0;
                for claim in group.claims() {
                    let weighted = trust[claim.source] * errf;
                    if claim.value == value {
                        pos += 1.0 - weighted;
                    } else {
                        neg += weighted;
                    }
                }
                confidence[value] = (pos + neg) / n_claims;
            }
        }
        dict_norm(&confidence, self.lmbda)
    }

    fn error_factor(&self, claims: &ClaimSet, trust: &[f64], confidence: &[f64]) -> Vec<f64> {
        let mut error_factor = vec![0.0; claims.n_values()];
        for group in claims.items() {
            let norm = group
                .claims()
                .iter()
                .filter(|c| trust[c.source] != 0.0)
                .count() as f64;
            for &value in group.values() {
                let conf = confidence[value];
                let mut pos = 0.0;
                let mut neg = 0.0;
                for claim in group.claims() {
                    let t = trust[claim.source];
                    if t == 0.0 {
                        continue;
                    }
                    if claim.value == value {
                        pos += (1.0 - conf) / t;
                    } else {
                        neg += conf / t;
                    }
                }
                error_factor[value] = (pos + neg) / norm;
            }
        }
        dict_norm(&error_factor, self.lmbda)
    }

    fn trust(&self, claims: &ClaimSet, confidence: &[f64], error_factor: &[f64]) -> Vec<f64> {
        let negs = complement_sums(claims, self.complement, |v| {
            let errf = error_factor[v];
            if errf != 0.0 { confidence[v] / errf } else { 0.0 }
        });
        let trust: Vec<f64> = claims
            .sources()
            .iter()
            .zip(negs)
            .map(|(source, neg)| {
                let mut pos = 0.0;
                let mut counted = 0usize;
                for &v in source.values() {
                    let errf = error_factor[v];
                    if errf != 0.0 {
                        pos += (1.0 - confidence[v]) / errf;
                        counted += 1;
                    }
                }
                (pos + neg * source.n_items() as f64) / counted as f64
            })
            .collect();
        dict_norm(&trust, self.lmbda)
    }
}

impl Resolver for ThreeEstimates {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> serde_json::Value {
        json!({
            "name": Self::NAME,
            "base_trust": self.base_trust,
            "tolerance": self.tolerance,
            "lmbda": self.lmbda,
            "base_error_factor": self.base_error_factor,
            "complement": self.complement,
        })
    }

    fn run(&self, claims: &ClaimSet, options: &RunOptions) -> Result<Resolution> {
        self.validate()?;
        options.validate()?;

        let mut error_factor = vec![self.base_error_factor; claims.n_values()];
        let (confidence, convergence) = iterate(
            Self::NAME,
            claims,
            self.base_trust,
            self.tolerance,
            options.max_iter,
            |trust| {
                let confidence = self.confidence(claims, trust, &error_factor);
                error_factor = self.error_factor(claims, trust, &confidence);
                let trust = self.trust(claims, &confidence, &error_factor);
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

    /// Three sources, one item: A, A, B.
    fn scenario() -> ClaimSet {
        claims(&[(0, 0, 100), (1, 0, 100), (2, 0, 200)])
    }

    #[test]
    fn test_two_estimates_first_confidence_step() {
        let set = scenario();
        let two = TwoEstimates::new(0.5);
        let confidence = two.confidence(&set, &[0.5, 0.5, 0.5]);
        // Raw: both values get (1.0 + 0.5) / 3 = 0.5; equal scores keep x1 = v
        // and round(0.5) = 0, so 0.5 * 0.5 + 0.5 * 0 = 0.25.
        assert_eq!(confidence, vec![0.25, 0.25]);
    }

    #[test]
    fn test_complement_scopes_differ() {
        // Source 0 claims 1 and 3; source 1 claims 1 and 2.
        let set = claims(&[(0, 0, 1), (1, 0, 1), (0, 1, 3), (1, 1, 2)]);
        let confidence = vec![0.1, 0.2, 0.4];
        // Slots: 1 -> 0, 3 -> 1, 2 -> 2.
        let unclaimed = complement_sums(&set, ComplementScope::Unclaimed, |v| confidence[v]);
        let others = complement_sums(&set, ComplementScope::ClaimedByOthers, |v| confidence[v]);
        assert!((unclaimed[0] - 0.4).abs() < 1e-12);
        assert!((unclaimed[1] - 0.2).abs() < 1e-12);
        // Value 1 is shared, so it stays in the "claimed by others" set.
        assert!((others[0] - 0.5).abs() < 1e-12);
        assert!((others[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_complement_keeps_small_terms_next_to_a_huge_one() {
        // Source 0 claims only slot 0; its complement is slots 1 and 2.
        let set = claims(&[(0, 0, 1), (1, 0, 2), (2, 1, 3)]);
        let terms = [1e17, 0.75, 0.75];
        for scope in [ComplementScope::Unclaimed, ComplementScope::ClaimedByOthers] {
            let sums = complement_sums(&set, scope, |v| terms[v]);
            assert_eq!(sums[0], 1.5, "{:?}", scope);
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_two_estimates_trust_step() {
        let set = claims(&[(0, 0, 1), (1, 0, 1), (0, 1, 3), (1, 1, 2)]);
        let confidence = [0.1, 0.2, 0.4];

        // Raw: source 0 = (0.9 + 0.8 + 0.4) / 2, source 1 = (0.9 + 0.6 + 0.2) / 2.
        let two = TwoEstimates::new(0.5);
        let shift = 0.85 / 0.2;
        assert_close(
            &two.trust(&set, &confidence),
            &[0.5 * (1.05 - shift) + 0.5, 0.5 * (0.85 - shift) + 0.5],
        );

        // The shared value 1 joins both complements.
        let two = two.with_complement(ComplementScope::ClaimedByOthers);
        let shift = 0.9 / 0.2;
        assert_close(
            &two.trust(&set, &confidence),
            &[0.5 * (1.1 - shift) + 0.5, 0.5 * (0.9 - shift) + 0.5],
        );
    }

    #[test]
    fn test_three_estimates_trust_step() {
        // Slots: 1 -> 0, 3 -> 1, 2 -> 2, 5 -> 3. Source 0 covers three items.
        let set = claims(&[(0, 0, 1), (1, 0, 1), (0, 1, 3), (1, 1, 2), (0, 2, 5)]);
        let confidence = [0.1, 0.2, 0.4, 0.5];
        let error_factor = [0.5, 0.0, 0.25, 1.0];

        // Source 0: pos = 0.9 / 0.5 + 0.5 / 1.0 over two counted values.
        // Unclaimed neg = 0.4 / 0.25 times 3 items -> (2.3 + 4.8) / 2 = 3.55.
        // Source 1: pos = 0.9 / 0.5 + 0.6 / 0.25, neg = 0.5 times 2 -> 2.6.
        let three = ThreeEstimates::new(0.5);
        let shift = 2.6 / 0.95;
        assert_close(
            &three.trust(&set, &confidence, &error_factor),
            &[0.5 * (3.55 - shift) + 0.5 * 4.0, 0.5 * (2.6 - shift) + 0.5 * 3.0],
        );

        // Claimed by others: source 0 neg = (0.2 + 1.6) * 3, source 1 neg = 0.7 * 2.
        let three = three.with_complement(ComplementScope::ClaimedByOthers);
        let shift = 2.8 / 1.05;
        assert_close(
            &three.trust(&set, &confidence, &error_factor),
            &[0.5 * (3.85 - shift) + 0.5 * 4.0, 0.5 * (2.8 - shift) + 0.5 * 3.0],
        );
    }

    /// Row-by-row fixed point over raw claims, kept literal so the slotted
    /// engines can be checked against it.
    mod reference {
        use indexmap::{IndexMap, IndexSet};

        use crate::dataset::{Claim, Value};
        use crate::resolve::{ComplementScope, dict_norm};

        fn normalise<K>(map: &mut IndexMap<K, f64>, lambda: f64) {
            let raw: Vec<f64> = map.values().copied().collect();
            for (slot, score) in map.values_mut().zip(dict_norm(&raw, lambda)) {
                *slot = score;
            }
        }

        fn unique<T: std::hash::Hash + Eq>(it: impl Iterator<Item = T>) -> IndexSet<T> {
            it.collect()
        }

        pub struct Step {
            pub trust: IndexMap<usize, f64>,
            pub error_factor: IndexMap<Value, f64>,
            pub confidence: IndexMap<Value, f64>,
        }

        impl Step {
            pub fn start(rows: &[Claim], base_trust: f64, base_error_factor: f64) -> Self {
                Self {
                    trust: rows.iter().map(|c| (c.source, base_trust)).collect(),
                    error_factor: rows.iter().map(|c| (c.value, base_error_factor)).collect(),
                    confidence: IndexMap::new(),
                }
            }

            /// One ThreeEstimates round, or a TwoEstimates round when
            /// `three` is false.
            pub fn advance(&mut self, rows: &[Claim], scope: ComplementScope, three: bool) {
                let lambda = 0.5;
                let errf = |e: &IndexMap<Value, f64>, v: Value| if three { e[&v] } else { 1.0 };

                for item in unique(rows.iter().map(|c| c.item)) {
                    let pairs: Vec<&Claim> = rows.iter().filter(|c| c.item == item).collect();
                    for v in unique(pairs.iter().map(|c| c.value)) {
                        let e = errf(&self.error_factor, v);
                        let mut pos = 0.0;
                        let mut neg = 0.0;
                        for c in &pairs {
                            let t = if three { self.trust[&c.source] * e } else { self.trust[&c.source] };
                            if c.value == v {
                                pos += 1.0 - t;
                            } else {
                                neg += t;
                            }
                        }
                        self.confidence.insert(v, (pos + neg) / pairs.len() as f64);
                    }
                }
                normalise(&mut self.confidence, lambda);

                if three {
                    for item in unique(rows.iter().map(|c| c.item)) {
                        let pairs: Vec<&Claim> = rows.iter().filter(|c| c.item == item).collect();
                        let norm = pairs.iter().filter(|c| self.trust[&c.source] != 0.0).count();
                        for v in unique(pairs.iter().map(|c| c.value)) {
                            let conf = self.confidence[&v];
                            let mut pos = 0.0;
                            let mut neg = 0.0;
                            for c in &pairs {
                                let t = self.trust[&c.source];
                                if t == 0.0 {
                                    continue;
                                }
                                if c.value == v {
                                    pos += (1.0 - conf) / t;
                                } else {
                                    neg += conf / t;
                                }
                            }
                            self.error_factor.insert(v, (pos + neg) / norm as f64);
                        }
                    }
                    normalise(&mut self.error_factor, lambda);
                }

                let all_values = unique(rows.iter().map(|c| c.value));
                let sources: Vec<usize> = self.trust.keys().copied().collect();
                for s in sources {
                    let own = unique(rows.iter().filter(|c| c.source == s).map(|c| c.value));
                    let complement: Vec<Value> = match scope {
                        ComplementScope::Unclaimed => {
                            all_values.iter().copied().filter(|v| !own.contains(v)).collect()
                        }
                        ComplementScope::ClaimedByOthers => {
                            unique(rows.iter().filter(|c| c.source != s).map(|c| c.value))
                                .into_iter()
                                .collect()
                        }
                    };
                    let n_items = unique(rows.iter().filter(|c| c.source == s).map(|c| c.item)).len();

                    let mut pos = 0.0;
                    let mut counted = 0usize;
                    for &v in &own {
                        let e = errf(&self.error_factor, v);
                        if e != 0.0 {
                            pos += (1.0 - self.confidence[&v]) / e;
                            counted += 1;
                        }
                    }
                    let mut neg = 0.0;
                    for &v in &complement {
                        let e = errf(&self.error_factor, v);
                        if e != 0.0 {
                            neg += self.confidence[&v] / e;
                        }
                    }
                    let raw = if three {
                        (pos + neg * n_items as f64) / counted as f64
                    } else {
                        (pos + neg) / own.len() as f64
                    };
                    self.trust.insert(s, raw);
                }
                normalise(&mut self.trust, lambda);
            }
        }
    }

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * a.abs().max(1.0)
    }

    fn reference_datasets() -> Vec<ClaimSet> {
        use crate::dataset::{Dataset, DatasetConfig};
        use crate::distribution::Distribution;

        let uniform = Distribution::uniform(0.0, 1.0).unwrap();
        [3u64, 17, 40, 2024]
            .into_iter()
            .map(|seed| {
                Dataset::generate(
                    DatasetConfig::new(12, 9, 4).with_seed(seed),
                    &uniform,
                    &uniform,
                    &uniform,
                    &uniform,
                )
                .unwrap()
                .claims()
            })
            .collect()
    }

    fn check_against_reference(set: &ClaimSet, base_trust: f64, scope: ComplementScope, three: bool) {
        let rows: Vec<Claim> = set.iter().copied().collect();
        let base_error_factor = 0.1;
        let mut expected = reference::Step::start(&rows, base_trust, base_error_factor);

        let two = TwoEstimates::new(base_trust).with_complement(scope);
        let three_engine = ThreeEstimates::new(base_trust).with_complement(scope);
        let mut trust = vec![base_trust; set.sources().len()];
        let mut error_factor = vec![base_error_factor; set.n_values()];

        for step in 0..6 {
            expected.advance(&rows, scope, three);
            let confidence = if three {
                let confidence = three_engine.confidence(set, &trust, &error_factor);
                error_factor = three_engine.error_factor(set, &trust, &confidence);
                trust = three_engine.trust(set, &confidence, &error_factor);
                confidence
            } else {
                let confidence = two.confidence(set, &trust);
                trust = two.trust(set, &confidence);
                confidence
            };

            for (slot, (&source, &want)) in expected.trust.iter().enumerate() {
                assert_eq!(set.sources()[slot].source(), source);
                assert!(
                    same(trust[slot], want),
                    "step {} source {}: {} vs {} ({:?}, base {})",
                    step, source, trust[slot], want, scope, base_trust
                );
            }
            for (&value, &want) in &expected.confidence {
                let slot = set.value_slot(value).unwrap();
                assert!(same(confidence[slot], want), "step {} value {}", step, value);
            }
        }
    }

    #[test]
    fn test_estimates_follow_row_by_row_reference() {
        for set in reference_datasets() {
            for base_trust in [0.5, 0.001, 0.8] {
                for scope in [ComplementScope::Unclaimed, ComplementScope::ClaimedByOthers] {
                    check_against_reference(&set, base_trust, scope, false);
                    check_against_reference(&set, base_trust, scope, true);
                }
            }
        }
    }

    #[test]
    fn test_two_estimates_resolves_every_item() {
        let set = claims(&[
            (0, 0, 10),
            (1, 0, 10),
            (2, 0, 11),
            (0, 1, 20),
            (1, 1, 20),
            (2, 1, 20),
        ]);
        let res = TwoEstimates::new(0.5).run(&set, &RunOptions::default()).unwrap();
        assert_eq!(res.items(), &[0, 1]);
        assert_eq!(res.value_for(1), Some(20));
        let resolved = res.value_for(0).unwrap();
        assert!(resolved == 10 || resolved == 11);
    }

    #[test]
    fn test_three_estimates_error_factor_skips_zero_trust() {
        let set = scenario();
        let three = ThreeEstimates::new(0.5);
        let errf = three.error_factor(&set, &[0.5, 0.0, 0.5], &[0.6, 0.2]);
        // norm = 2. Value 100: pos = 0.4 / 0.5, neg = 0.6 / 0.5 -> 2.0 / 2 = 1.0
        // Value 200: pos = 0.8 / 0.5, neg = 0.2 / 0.5 -> 2.0 / 2 = 1.0
        // Equal scores: 0.5 * 1.0 + 0.5 * round(1.0) = 1.0
        assert_eq!(errf, vec![1.0, 1.0]);
    }

    #[test]
    fn test_three_estimates_runs_and_labels_rows() {
        let set = claims(&[(0, 0, 10), (1, 0, 10), (2, 0, 11), (0, 1, 20), (2, 1, 21)]);
        let options = RunOptions::default().with_top_k(2);
        let res = ThreeEstimates::new(0.5).run(&set, &options).unwrap();
        let labels: Vec<&str> = res.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["ThreeEstimates_1", "ThreeEstimates_2"]);
        for (col, &item) in res.items().iter().enumerate() {
            let top = res.rows()[0].values[col];
            let second = res.rows()[1].values[col];
            assert_ne!(top, second);
            assert!(set.item_values(item).contains(&top));
        }
    }

    #[test]
    fn test_run_is_idempotent() {
        let set = claims(&[(0, 0, 10), (1, 0, 12), (2, 0, 11), (1, 1, 20), (2, 1, 21)]);
        let three = ThreeEstimates::new(0.3);
        let a = three.run(&set, &RunOptions::default()).unwrap();
        let b = three.run(&set, &RunOptions::default()).unwrap();
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn test_describe_includes_parameters() {
        let info = ThreeEstimates::new(0.001).describe();
        assert_eq!(info["name"], "ThreeEstimates");
        assert_eq!(info["base_error_factor"], 0.1);
        assert_eq!(info["complement"], "unclaimed");
        assert_eq!(TwoEstimates::new(0.2).describe()["lmbda"], 0.5);
    }
}

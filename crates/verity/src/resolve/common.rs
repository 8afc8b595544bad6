//! Pieces shared by the fixed-point engines: normalisation, convergence
//! distance, the iteration loop and top-k selection.

use crate::dataset::{ClaimSet, Value};

use super::{Convergence, Resolution, ResolvedRow};

/// Blend every score with its rounded value.
///
/// Each score `v` becomes `λ·x1 + (1 − λ)·x2` with `x2 = round(v)` (ties to
/// even) and `x1 = v − min / (max − min)`. The shift term divides `min` alone,
/// so this is not a min-max rescaling; callers depend on this exact form. When
/// all scores are equal `x1 = v`.
pub fn dict_norm(scores: &[f64], lambda: f64) -> Vec<f64> {
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    scores
        .iter()
        .map(|&v| {
            let x1 = if min == max { v } else { v - min / (max - min) };
            let x2 = v.round_ties_even();
            lambda * x1 + (1.0 - lambda) * x2
        })
        .collect()
}

/// `1 − cos(a, b)`; NaN when either vector has zero norm.
pub fn cosine_error(current: &[f64], previous: &[f64]) -> f64 {
    let norm = l2(current) * l2(previous);
    let dot: f64 = current
        .iter()
        .zip(previous)
        .map(|(a, b)| a * (b / norm))
        .sum();
    1.0 - dot
}

fn l2(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Run `step` from a uniform `base_trust` until the trust vector converges.
///
/// `step` maps the current trust snapshot (one entry per source slot) to the
/// new confidence snapshot (one entry per value slot) and the new trust
/// snapshot. Returns the last confidence snapshot and the loop outcome.
pub(crate) fn iterate<F>(
    engine: &str,
    claims: &ClaimSet,
    base_trust: f64,
    tolerance: f64,
    max_iter: usize,
    mut step: F,
) -> (Vec<f64>, Convergence)
where
    F: FnMut(&[f64]) -> (Vec<f64>, Vec<f64>),
{
    if claims.sources().is_empty() {
        return (
            vec![0.0; claims.n_values()],
            Convergence {
                iterations: 0,
                converged: true,
                error: 0.0,
            },
        );
    }

    let mut trust = vec![base_trust; claims.sources().len()];
    let mut confidence = vec![0.0; claims.n_values()];
    let mut convergence = Convergence {
        iterations: 0,
        converged: false,
        error: f64::NAN,
    };

    for i in 0..max_iter {
        let (next_confidence, next_trust) = step(&trust);
        let error = cosine_error(&next_trust, &trust);
        confidence = next_confidence;
        trust = next_trust;

        convergence.iterations = i + 1;
        convergence.error = error;
        if error < tolerance {
            convergence.converged = true;
            break;
        }
    }

    if convergence.converged {
        tracing::debug!(
            engine,
            iterations = convergence.iterations,
            error = convergence.error,
            "converged"
        );
    } else {
        tracing::warn!(
            engine,
            max_iter,
            error = convergence.error,
            "reached maximum iteration without converging"
        );
    }

    (confidence, convergence)
}

/// Index of the first maximum; a NaN wins immediately.
fn argmax(scores: impl IntoIterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for (idx, score) in scores.into_iter().enumerate() {
        if score.is_nan() {
            return idx;
        }
        if idx == 0 || score > best_score {
            best = idx;
            best_score = score;
        }
    }
    best
}

/// Build the resolved table from a confidence snapshot.
///
/// With `top_k == 1` each item gets the first of its values (in first
/// appearance order) with maximal confidence. With `top_k > 1` values are
/// ranked by descending confidence, ties by ascending value, and items with
/// fewer than `top_k` values are padded with `0`.
pub(crate) fn select_top_k(
    engine: &str,
    claims: &ClaimSet,
    confidence: &[f64],
    top_k: usize,
    convergence: Convergence,
) -> Resolution {
    let items: Vec<usize> = claims.items().iter().map(|g| g.item()).collect();
    let mut rows: Vec<ResolvedRow> = (1..=top_k)
        .map(|rank| ResolvedRow {
            label: format!("{engine}_{rank}"),
            values: Vec::with_capacity(items.len()),
        })
        .collect();

    for group in claims.items() {
        let slots = group.values();
        if top_k == 1 {
            let best = argmax(slots.iter().map(|&v| confidence[v]));
            rows[0].values.push(claims.value(slots[best]));
            continue;
        }

        let mut ranked: Vec<(Value, f64)> = slots
            .iter()
            .map(|&v| (claims.value(v), confidence[v]))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        for (rank, row) in rows.iter_mut().enumerate() {
            row.values.push(ranked.get(rank).map(|&(v, _)| v).unwrap_or(0));
        }
    }

    Resolution::new(engine, items, rows).with_convergence(convergence)
}

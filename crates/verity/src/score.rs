//! Scoring resolved values against the ground truth.

use serde::{Deserialize, Serialize};

use crate::dataset::GroundTruth;
use crate::error::{Result, VerityError};
use crate::resolve::Resolution;

/// Accuracy of a resolved-value table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// `matches / n_dataitems`.
    pub accuracy: f64,
    /// Cells equal to the true value of their item.
    pub matches: usize,
}

/// Compare every row of `resolution` with the truth of its items.
///
/// Items the table does not cover count as misses. Fails when a row is not
/// as long as the item list, when an item id is outside the truth row, or when
/// more cells match than there are items.
pub fn score(resolution: &Resolution, truth: &GroundTruth) -> Result<Score> {
    let n_items = truth.len();
    if n_items == 0 {
        return Err(VerityError::ShapeMismatch {
            expected: "at least one ground-truth item".to_string(),
            found: "0 items".to_string(),
        });
    }

    let items = resolution.items();
    let mut expected = Vec::with_capacity(items.len());
    for &item in items {
        let value = truth.get(item).ok_or_else(|| VerityError::ShapeMismatch {
            expected: format!("item id below {n_items}"),
            found: format!("item {item}"),
        })?;
        expected.push(value);
    }

    let mut matches = 0;
    for row in resolution.rows() {
        if row.values.len() != items.len() {
            return Err(VerityError::ShapeMismatch {
                expected: format!("{} values in row '{}'", items.len(), row.label),
                found: format!("{} values", row.values.len()),
            });
        }
        matches += row
            .values
            .iter()
            .zip(&expected)
            .filter(|(resolved, want)| resolved == want)
            .count();
    }

    if matches > n_items {
        return Err(VerityError::ImpossibleScore {
            matches,
            items: n_items,
        });
    }

    Ok(Score {
        accuracy: matches as f64 / n_items as f64,
        matches,
    })
}

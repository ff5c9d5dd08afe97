//! Competition ranking of scores

use std::cmp::Ordering;

/// Rank scores in descending order, returning ranks in input order.
///
/// Equal scores share the lowest rank they cover and the next distinct score
/// resumes at one plus the number of strictly higher scores, so
/// `[0.9, 0.9, 0.5]` ranks as `[1, 1, 3]`.
#[must_use]
pub fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0; scores.len()];
    let mut current_rank = 0;
    let mut previous: Option<f64> = None;

    for (position, &index) in order.iter().enumerate() {
        let score = scores[index];
        if previous != Some(score) {
            current_rank = u32::try_from(position + 1).unwrap_or(u32::MAX);
            previous = Some(score);
        }
        ranks[index] = current_rank;
    }

    ranks
}

use std::cmp::Ordering;

use crate::model::constants::RATING_SCALE;

/// Probability that the side rated `a` outscores the side rated `b`.
///
/// `E = 1 / (1 + 10^((b - a) / 400))`
pub fn expected_outcome(a: f64, b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((b - a) / RATING_SCALE))
}

/// Sum of [`expected_outcome`] of `rating` against every opponent.
pub fn expected_total(rating: f64, opponents: &[f64]) -> f64 {
    opponents.iter().map(|o| expected_outcome(rating, *o)).sum()
}

/// `R' = R + K * (W - E)`
pub fn updated_rating(rating: f64, k_factor: f64, win_total: f64, expected: f64) -> f64 {
    rating + k_factor * (win_total - expected)
}

/// Aggregate win totals for a set of scores, index-aligned with `scores`.
///
/// Entrants are ranked with competition ranking where tied scores share the
/// average of the positions they occupy (rank 1 is the best). The win total is
/// `N - rank`, which equals one point per beaten entrant plus half a point per tie.
pub fn win_totals(scores: &[f64], low_score_wins: bool) -> Vec<f64> {
    // -0.0 and 0.0 must land in the same tie group
    let scores: Vec<f64> = scores.iter().map(|s| s + 0.0).collect();
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| better_first(scores[*a], scores[*b], low_score_wins));

    let mut totals = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && scores[order[end]].total_cmp(&scores[order[start]]) == Ordering::Equal {
            end += 1;
        }

        // 1-based positions start+1..=end share their mean
        let rank = (start + 1 + end) as f64 / 2.0;
        for idx in &order[start..end] {
            totals[*idx] = n as f64 - rank;
        }

        start = end;
    }

    totals
}

fn better_first(a: f64, b: f64, low_score_wins: bool) -> Ordering {
    if low_score_wins {
        a.total_cmp(&b)
    } else {
        b.total_cmp(&a)
    }
}

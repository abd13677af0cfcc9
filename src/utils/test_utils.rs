use chrono::{Duration, NaiveDate};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    ingestion::score_sheet::{Cell, ScoreSheet},
    model::structures::{contest::Contest, event_key::EventKey}
};

/// Weekly event keys starting at 2021-01-04.
pub fn generate_event_keys(n: usize) -> Vec<EventKey> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap_or_default();

    (0..n)
        .map(|i| EventKey::from(start + Duration::weeks(i as i64)))
        .collect()
}

/// `n` weekly contests among a random subset (at least two) of `participants`.
/// Scores are whole numbers in 0..=20 so ties occur. Seeded for reproducible results.
pub fn generate_contests(n: usize, participants: &[&str], seed: u64) -> Vec<Contest> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    generate_event_keys(n)
        .into_iter()
        .map(|event_key| {
            let mut entrants = participants.to_vec();
            entrants.shuffle(&mut rng);

            let size = rng.random_range(2.min(entrants.len())..=entrants.len());
            let scores: Vec<(&str, f64)> = entrants[..size]
                .iter()
                .map(|name| (*name, rng.random_range(0..=20) as f64))
                .collect();

            Contest::from_scores(event_key, scores)
        })
        .collect()
}

/// A score sheet with `Date`, `Player` and `score_column` headers.
pub fn generate_score_sheet(score_column: &str, rows: &[(&str, &str, f64)]) -> ScoreSheet {
    let columns = vec!["Date".to_string(), "Player".to_string(), score_column.to_string()];
    let rows = rows
        .iter()
        .map(|(date, player, score)| {
            vec![
                Cell::Text(date.to_string()),
                Cell::Text(player.to_string()),
                Cell::Number(*score),
            ]
        })
        .collect();

    ScoreSheet::new(columns, rows)
}

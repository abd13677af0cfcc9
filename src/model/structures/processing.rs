use serde::Serialize;

use crate::model::structures::{contest::ValidationError, event_key::EventKey};

/// One participant's rating movement within a contest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingChange {
    pub participant: String,
    pub rating_before: f64,
    pub rating_after: f64,
    /// Aggregate pairwise result: 1 per beaten entrant, 0.5 per tie
    pub win_total: f64,
    /// Sum of expected outcomes against every other entrant
    pub expected: f64,
    pub k_factor: f64
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.rating_after - self.rating_before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContestOutcome {
    /// The event key was already in the ledger; nothing changed.
    Skipped,
    Processed(Vec<RatingChange>)
}

/// Result of processing a batch of contests
#[derive(Debug, Default)]
pub struct ProcessingSummary {
    pub processed: Vec<EventKey>,
    pub skipped: Vec<EventKey>,
    pub rejected: Vec<ValidationError>
}

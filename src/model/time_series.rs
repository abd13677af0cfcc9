use itertools::Itertools;
use serde::Serialize;

use crate::model::{
    ledger::ReplayLedger,
    rating_tracker::RatingTracker,
    structures::{event_key::EventKey, participant::Participant}
};

/// Ratings over time: one row per processed contest (ledger order), one column
/// per participant (creation order).
///
/// A cell holds the participant's rating as of that contest, carried forward from
/// the last contest they played. It is `None` before their first snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSeries {
    event_keys: Vec<EventKey>,
    participants: Vec<String>,
    /// Row-major, `cells[row][column]`
    cells: Vec<Vec<Option<f64>>>,
    inactive: Vec<String>
}

impl RatingSeries {
    /// Assembles the table from the tracker's snapshots.
    ///
    /// Snapshots tagged with a key missing from the ledger are ignored. A
    /// participant is inactive when their rating stayed flat over the trailing
    /// `window` rows; see [`is_inactive`]. Inactive participants are always listed
    /// in [`RatingSeries::inactive_participants`] and their columns are only
    /// removed when `drop_inactive` is set.
    pub fn build(tracker: &RatingTracker, ledger: &ReplayLedger, drop_inactive: bool, window: usize) -> RatingSeries {
        let event_keys: Vec<EventKey> = ledger.iter().cloned().collect();
        let mut participants = Vec::new();
        let mut columns = Vec::new();
        let mut inactive = Vec::new();

        for participant in tracker.participants() {
            let column = forward_filled(participant, ledger);

            if is_inactive(participant, &column, window) {
                inactive.push(participant.name.clone());
                if drop_inactive {
                    continue;
                }
            }

            participants.push(participant.name.clone());
            columns.push(column);
        }

        let cells = (0..event_keys.len())
            .map(|row| columns.iter().map(|column| column[row]).collect())
            .collect();

        RatingSeries {
            event_keys,
            participants,
            cells,
            inactive
        }
    }

    pub fn event_keys(&self) -> &[EventKey] {
        &self.event_keys
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn inactive_participants(&self) -> &[String] {
        &self.inactive
    }

    pub fn is_inactive(&self, name: &str) -> bool {
        self.inactive.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.event_keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.event_keys.len()
    }

    /// Rows in ledger order, each paired with its event key.
    pub fn rows(&self) -> impl Iterator<Item = (&EventKey, &[Option<f64>])> {
        self.event_keys.iter().zip(self.cells.iter().map(|row| row.as_slice()))
    }

    pub fn value(&self, event_key: &EventKey, participant: &str) -> Option<f64> {
        let row = self.event_keys.iter().position(|k| k == event_key)?;
        let column = self.participants.iter().position(|p| p == participant)?;

        self.cells[row][column]
    }

    /// Every cell of one participant's column, top to bottom.
    pub fn column(&self, participant: &str) -> Option<Vec<Option<f64>>> {
        let column = self.participants.iter().position(|p| p == participant)?;

        Some(self.cells.iter().map(|row| row[column]).collect())
    }
}

/// One value per ledger row: the latest snapshot at that key, else the value
/// carried forward from an earlier row.
fn forward_filled(participant: &Participant, ledger: &ReplayLedger) -> Vec<Option<f64>> {
    let mut at_key: Vec<Option<f64>> = vec![None; ledger.len()];
    for snapshot in &participant.history {
        if let Some(row) = ledger.position(&snapshot.event_key) {
            // History is chronological, so the contest result replaces the creation snapshot
            at_key[row] = Some(snapshot.rating);
        }
    }

    let mut last = None;
    at_key
        .into_iter()
        .map(|value| {
            if value.is_some() {
                last = value;
            }
            last
        })
        .collect()
}

/// A participant is inactive when every value they have in the trailing `window`
/// rows is the same.
///
/// Never inactive:
/// - with at most one history entry
/// - with fewer than two values inside the window (they joined inside it)
pub fn is_inactive(participant: &Participant, column: &[Option<f64>], window: usize) -> bool {
    if participant.history.len() <= 1 {
        return false;
    }

    let present: Vec<f64> = column.iter().rev().take(window).flatten().copied().collect();
    if present.len() < 2 {
        return false;
    }

    present.iter().all_equal()
}

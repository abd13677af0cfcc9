use indexmap::IndexMap;
use tracing::debug;

use crate::model::{
    constants::DEFAULT_RATING,
    structures::{
        event_key::EventKey,
        participant::{Participant, Snapshot}
    }
};

/// Authoritative store of every participant's current rating and rating history.
///
/// Participants are kept in the order they were first seen. They are created
/// lazily and never removed.
#[derive(Debug, Clone, Default)]
pub struct RatingTracker {
    participants: IndexMap<String, Participant>
}

impl RatingTracker {
    pub fn new() -> RatingTracker {
        RatingTracker {
            participants: IndexMap::new()
        }
    }

    /// Rebuilds a tracker from previously captured participants.
    pub fn from_participants(participants: impl IntoIterator<Item = Participant>) -> RatingTracker {
        RatingTracker {
            participants: participants.into_iter().map(|p| (p.name.clone(), p)).collect()
        }
    }

    /// Returns the current rating for the participant, creating them at the
    /// default rating if unknown. The creation snapshot is tagged `event_key`.
    pub fn get_or_create(&mut self, name: &str, event_key: &EventKey) -> f64 {
        self.participants
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Adding participant {} at {}", name, event_key);
                Participant::new(name, event_key)
            })
            .rating
    }

    /// Returns the current rating value for the participant.
    pub fn rating(&self, name: &str) -> Option<f64> {
        self.participants.get(name).map(|p| p.rating)
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.get(name)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn games_played(&self, name: &str) -> Option<usize> {
        self.participants.get(name).map(|p| p.games_played())
    }

    pub fn last_played(&self, name: &str) -> Option<&EventKey> {
        self.participants.get(name).and_then(|p| p.last_played())
    }

    /// Last event key each participant has a snapshot for.
    pub fn last_played_map(&self) -> IndexMap<&str, &EventKey> {
        self.participants
            .values()
            .filter_map(|p| p.last_played().map(|key| (p.name.as_str(), key)))
            .collect()
    }

    /// Applies a set of new ratings at once, recording one snapshot per
    /// participant tagged `event_key`. Unknown participants are created first.
    ///
    /// Takes `&mut self`, so no reader can observe the store between two of
    /// these assignments.
    pub fn bulk_update(&mut self, event_key: &EventKey, ratings: &IndexMap<String, f64>) {
        for (name, rating) in ratings {
            let participant = self
                .participants
                .entry(name.clone())
                .or_insert_with(|| Participant::new(name, event_key));

            participant.rating = *rating;
            participant.history.push(Snapshot {
                event_key: event_key.clone(),
                rating: *rating
            });
        }
    }

    /// Removes every snapshot tagged `event_key`. Current ratings are not
    /// touched and later snapshots are not recomputed.
    ///
    /// Returns the number of snapshots removed.
    pub fn retract(&mut self, event_key: &EventKey) -> usize {
        let mut removed = 0;
        for participant in self.participants.values_mut() {
            let before = participant.history.len();
            participant.history.retain(|s| &s.event_key != event_key);
            removed += before - participant.history.len();
        }

        removed
    }

    /// Sets every current rating to its latest surviving snapshot, or the
    /// default rating when the history is empty.
    pub fn reset_to_last_snapshot(&mut self) {
        for participant in self.participants.values_mut() {
            participant.rating = participant
                .history
                .last()
                .map(|s| s.rating)
                .unwrap_or(DEFAULT_RATING);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use indexmap::IndexMap;

    use crate::model::{
        constants::DEFAULT_RATING, rating_tracker::RatingTracker, structures::event_key::EventKey
    };

    fn ratings(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries.iter().map(|(n, r)| (n.to_string(), *r)).collect()
    }

    #[test]
    fn test_get_or_create_new_participant() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");

        let rating = tracker.get_or_create("Sam", &day1);
        let participant = tracker.participant("Sam").unwrap();

        assert_eq!(rating, DEFAULT_RATING);
        assert_eq!(participant.history.len(), 1);
        assert_eq!(participant.history[0].event_key, day1);
        assert_eq!(participant.games_played(), 0);
    }

    #[test]
    fn test_get_or_create_existing_participant() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");
        let day2 = EventKey::new("day2");

        tracker.get_or_create("Sam", &day1);
        tracker.bulk_update(&day1, &ratings(&[("Sam", 1510.0)]));

        assert_eq!(tracker.get_or_create("Sam", &day2), 1510.0);
        assert_eq!(tracker.participant("Sam").unwrap().history.len(), 2);
    }

    #[test]
    fn test_bulk_update_records_snapshots() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");

        tracker.get_or_create("Sam", &day1);
        tracker.get_or_create("Jo", &day1);
        tracker.bulk_update(&day1, &ratings(&[("Sam", 1510.0), ("Jo", 1490.0)]));

        assert_abs_diff_eq!(tracker.rating("Sam").unwrap(), 1510.0);
        assert_abs_diff_eq!(tracker.rating("Jo").unwrap(), 1490.0);
        assert_eq!(tracker.games_played("Sam"), Some(1));
        assert_eq!(tracker.last_played("Jo"), Some(&day1));
    }

    #[test]
    fn test_bulk_update_creates_unknown_participants() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");

        tracker.bulk_update(&day1, &ratings(&[("Ari", 1520.0)]));
        let participant = tracker.participant("Ari").unwrap();

        assert_eq!(participant.history.len(), 2);
        assert_eq!(participant.history[0].rating, DEFAULT_RATING);
        assert_eq!(participant.rating, 1520.0);
    }

    #[test]
    fn test_retract_removes_only_tagged_snapshots() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");
        let day2 = EventKey::new("day2");

        tracker.get_or_create("Sam", &day1);
        tracker.bulk_update(&day1, &ratings(&[("Sam", 1510.0)]));
        tracker.bulk_update(&day2, &ratings(&[("Sam", 1502.0)]));

        let removed = tracker.retract(&day2);
        let participant = tracker.participant("Sam").unwrap();

        assert_eq!(removed, 1);
        assert_eq!(participant.history.len(), 2);
        assert!(participant.history.iter().all(|s| s.event_key == day1));
        // Current rating is left alone
        assert_eq!(participant.rating, 1502.0);
    }

    #[test]
    fn test_reset_to_last_snapshot() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");
        let day2 = EventKey::new("day2");

        tracker.get_or_create("Sam", &day1);
        tracker.bulk_update(&day1, &ratings(&[("Sam", 1510.0)]));
        tracker.get_or_create("Jo", &day2);
        tracker.bulk_update(&day2, &ratings(&[("Sam", 1502.0), ("Jo", 1508.0)]));

        tracker.retract(&day2);
        tracker.reset_to_last_snapshot();

        assert_eq!(tracker.rating("Sam"), Some(1510.0));
        // Jo's whole history was tagged day2
        assert_eq!(tracker.participant("Jo").unwrap().history.len(), 0);
        assert_eq!(tracker.rating("Jo"), Some(DEFAULT_RATING));
    }

    #[test]
    fn test_participants_keep_creation_order() {
        let mut tracker = RatingTracker::new();
        let day1 = EventKey::new("day1");

        for name in ["Zed", "Ari", "Mo"] {
            tracker.get_or_create(name, &day1);
        }

        let names: Vec<&str> = tracker.participants().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Ari", "Mo"]);
    }
}

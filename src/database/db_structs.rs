use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::STATE_SCHEMA_VERSION,
    elo_model::EloModel,
    ledger::ReplayLedger,
    rating_tracker::RatingTracker,
    structures::{
        event_key::EventKey,
        participant::{Participant, Snapshot}
    }
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub event_key: EventKey,
    pub rating: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedParticipant {
    pub rating: f64,
    pub history: Vec<PersistedSnapshot>
}

/// Everything needed to resume a league: ratings, histories and the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    /// Keyed by participant name, in first-seen order
    pub participants: IndexMap<String, PersistedParticipant>,
    /// Processed event keys in processing order
    pub ledger: Vec<EventKey>
}

impl PersistedState {
    pub fn capture(model: &EloModel) -> PersistedState {
        let participants = model
            .rating_tracker
            .participants()
            .map(|p| {
                let history = p
                    .history
                    .iter()
                    .map(|s| PersistedSnapshot {
                        event_key: s.event_key.clone(),
                        rating: s.rating
                    })
                    .collect();

                (
                    p.name.clone(),
                    PersistedParticipant {
                        rating: p.rating,
                        history
                    }
                )
            })
            .collect();

        PersistedState {
            version: STATE_SCHEMA_VERSION,
            participants,
            ledger: model.ledger.iter().cloned().collect()
        }
    }

    /// Splits the state back into a tracker and ledger. Fails with the first
    /// ledger key that appears twice.
    pub fn into_parts(self) -> Result<(RatingTracker, ReplayLedger), EventKey> {
        let mut ledger = ReplayLedger::new();
        for key in self.ledger {
            if ledger.contains(&key) {
                return Err(key);
            }
            ledger.record(key);
        }

        let participants = self.participants.into_iter().map(|(name, p)| Participant {
            name,
            rating: p.rating,
            history: p
                .history
                .into_iter()
                .map(|s| Snapshot {
                    event_key: s.event_key,
                    rating: s.rating
                })
                .collect()
        });

        Ok((RatingTracker::from_participants(participants), ledger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{model_config::ModelConfig, structures::contest::Contest},
        utils::test_utils::generate_contests
    };

    #[test]
    fn test_capture_and_restore_preserve_model() {
        let mut model = EloModel::default();
        model.process(&generate_contests(8, &["Sam", "Jo", "Ari", "Kim"], 7));

        let state = PersistedState::capture(&model);
        assert_eq!(state.version, STATE_SCHEMA_VERSION);
        assert_eq!(state.ledger.len(), 8);

        let (tracker, ledger) = state.into_parts().unwrap();
        let restored = EloModel::from_parts(tracker, ledger, ModelConfig::default());

        assert_eq!(restored.ledger, model.ledger);
        for p in model.rating_tracker.participants() {
            assert_eq!(restored.rating_tracker.participant(&p.name), Some(p));
        }
    }

    #[test]
    fn test_restored_model_skips_processed_contests() {
        let mut model = EloModel::default();
        let contest = Contest::from_scores("2021-02-11", [("Sam", 10.0), ("Jo", 8.0)]);
        model.process_contest(&contest).unwrap();

        let (tracker, ledger) = PersistedState::capture(&model).into_parts().unwrap();
        let mut restored = EloModel::from_parts(tracker, ledger, ModelConfig::default());
        let summary = restored.process(&[contest]);

        assert!(summary.processed.is_empty());
        assert_eq!(summary.skipped, vec![EventKey::from("2021-02-11")]);
    }

    #[test]
    fn test_duplicate_ledger_key_is_rejected() {
        let state = PersistedState {
            version: STATE_SCHEMA_VERSION,
            participants: IndexMap::new(),
            ledger: vec![EventKey::from("2021-02-11"), EventKey::from("2021-02-11")]
        };

        assert_eq!(state.into_parts().unwrap_err(), EventKey::from("2021-02-11"));
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::structures::event_key::EventKey;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Contest is missing an event key")]
    MissingEventKey,

    #[error("Contest {0} has no entrants")]
    NoEntrants(EventKey),

    #[error("Contest {0} has an entry without a participant")]
    MissingParticipant(EventKey),

    #[error("Contest {event_key} has a non-finite score for {participant}")]
    InvalidScore { event_key: EventKey, participant: String }
}

/// All scores recorded under one event key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub event_key: EventKey,
    /// participant -> raw score, in the order participants were first listed
    scores: IndexMap<String, f64>
}

impl Contest {
    pub fn new(event_key: impl Into<EventKey>) -> Contest {
        Contest {
            event_key: event_key.into(),
            scores: IndexMap::new()
        }
    }

    /// Builds a contest from (participant, score) pairs. Later pairs for the
    /// same participant replace earlier ones.
    pub fn from_scores<I, S>(event_key: impl Into<EventKey>, scores: I) -> Contest
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>
    {
        let mut contest = Contest::new(event_key);
        for (participant, score) in scores {
            contest.insert_score(participant, score);
        }

        contest
    }

    /// Records a score; a participant listed twice keeps the later score.
    pub fn insert_score(&mut self, participant: impl AsRef<str>, score: f64) {
        self.scores.insert(participant.as_ref().trim().to_string(), score);
    }

    pub fn scores(&self) -> &IndexMap<String, f64> {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Checks the contest carries every required field. Runs before any rating is touched.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.event_key.is_blank() {
            return Err(ValidationError::MissingEventKey);
        }

        if self.scores.is_empty() {
            return Err(ValidationError::NoEntrants(self.event_key.clone()));
        }

        for (participant, score) in &self.scores {
            if participant.is_empty() {
                return Err(ValidationError::MissingParticipant(self.event_key.clone()));
            }

            if !score.is_finite() {
                return Err(ValidationError::InvalidScore {
                    event_key: self.event_key.clone(),
                    participant: participant.clone()
                });
            }
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::model::{constants::DEFAULT_RATING, structures::event_key::EventKey};

/// A rating recorded at the moment it changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub event_key: EventKey,
    pub rating: f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub rating: f64,
    /// Append-only, except for retraction. The first entry is the creation snapshot.
    pub history: Vec<Snapshot>
}

impl Participant {
    /// A newcomer at the default rating, with its creation snapshot tagged `event_key`.
    pub fn new(name: &str, event_key: &EventKey) -> Participant {
        Participant {
            name: name.to_string(),
            rating: DEFAULT_RATING,
            history: vec![Snapshot {
                event_key: event_key.clone(),
                rating: DEFAULT_RATING
            }]
        }
    }

    pub fn games_played(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn last_played(&self) -> Option<&EventKey> {
        self.history.last().map(|s| &s.event_key)
    }
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{rating_tracker::RatingTracker, structures::event_key::EventKey};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub participant: String,
    pub rating: f64,
    pub games_played: usize,
    pub last_played: Option<EventKey>
}

impl Standing {
    /// Days between the last contest played and `today`, when the event key is a date.
    pub fn days_since_last_played(&self, today: NaiveDate) -> Option<i64> {
        let last = self.last_played.as_ref()?.as_date()?;

        Some((today - last).num_days())
    }
}

/// Leaderboard sorted by current rating, highest first. Participants named in
/// `excluded` are left off, and ranks are assigned to those that remain.
pub fn standings(tracker: &RatingTracker, excluded: &[String]) -> Vec<Standing> {
    let mut ranked: Vec<Standing> = tracker
        .participants()
        .filter(|p| !excluded.contains(&p.name))
        .map(|p| Standing {
            rank: 0,
            participant: p.name.clone(),
            rating: p.rating,
            games_played: p.games_played(),
            last_played: p.last_played().cloned()
        })
        .collect();

    // Stable sort keeps creation order between equal ratings
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    for (i, standing) in ranked.iter_mut().enumerate() {
        standing.rank = i + 1;
    }

    ranked
}

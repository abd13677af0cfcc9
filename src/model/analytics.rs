use serde::Serialize;

use crate::model::{structures::event_key::EventKey, time_series::RatingSeries};

/// Biggest movers between one contest and the one before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMovers {
    pub event_key: EventKey,
    /// Participant with the largest percent gain
    pub biggest_winner: String,
    /// Largest rating gain in this period
    pub rating_increase: f64,
    /// Largest percent gain in this period
    pub pct_increase: f64,
    /// Participant with the largest percent drop
    pub biggest_loser: String,
    /// Largest rating drop in this period (most negative delta)
    pub rating_decrease: f64,
    /// Largest percent drop in this period
    pub pct_decrease: f64
}

/// A single cell of the rating series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingExtremum {
    pub participant: String,
    pub event_key: EventKey,
    pub rating: f64
}

struct Movement<'a> {
    participant: &'a str,
    delta: f64,
    pct: f64
}

/// Per-row winners and losers. Only participants with a value in both the row
/// and the row before it are compared; rows where nobody qualifies are left out,
/// as is the first row.
///
/// The winner/loser is picked by percent change. The reported rating and percent
/// figures are the row's extremes, which come from the same participant unless
/// starting ratings differ widely.
pub fn winners_and_losers(series: &RatingSeries) -> Vec<PeriodMovers> {
    let rows: Vec<(&EventKey, &[Option<f64>])> = series.rows().collect();
    let participants = series.participants();

    rows.windows(2)
        .filter_map(|pair| {
            let (_, previous) = pair[0];
            let (event_key, current) = pair[1];

            let movements: Vec<Movement> = participants
                .iter()
                .enumerate()
                .filter_map(|(i, name)| match (previous[i], current[i]) {
                    (Some(before), Some(after)) => Some(Movement {
                        participant: name.as_str(),
                        delta: after - before,
                        pct: (after - before) / before * 100.0
                    }),
                    _ => None
                })
                .collect();

            period_movers(event_key, &movements)
        })
        .collect()
}

fn period_movers(event_key: &EventKey, movements: &[Movement]) -> Option<PeriodMovers> {
    let winner = movements.iter().reduce(|best, m| if m.pct > best.pct { m } else { best })?;
    let loser = movements.iter().reduce(|worst, m| if m.pct < worst.pct { m } else { worst })?;

    let deltas = movements.iter().map(|m| m.delta);
    let pcts = movements.iter().map(|m| m.pct);

    Some(PeriodMovers {
        event_key: event_key.clone(),
        biggest_winner: winner.participant.to_string(),
        rating_increase: deltas.clone().fold(f64::NEG_INFINITY, f64::max),
        pct_increase: pcts.clone().fold(f64::NEG_INFINITY, f64::max),
        biggest_loser: loser.participant.to_string(),
        rating_decrease: deltas.fold(f64::INFINITY, f64::min),
        pct_decrease: pcts.fold(f64::INFINITY, f64::min)
    })
}

/// Highest rating anyone held at any processed contest.
pub fn highest_rating(series: &RatingSeries) -> Option<RatingExtremum> {
    extremum(series, |candidate, best| candidate > best)
}

/// Lowest rating anyone held at any processed contest.
pub fn lowest_rating(series: &RatingSeries) -> Option<RatingExtremum> {
    extremum(series, |candidate, best| candidate < best)
}

/// Scans column by column, then row by row, so ties go to the first participant
/// and then the earliest contest.
fn extremum(series: &RatingSeries, beats: impl Fn(f64, f64) -> bool) -> Option<RatingExtremum> {
    let mut found: Option<RatingExtremum> = None;

    for name in series.participants() {
        let Some(column) = series.column(name) else {
            continue;
        };

        for (event_key, value) in series.event_keys().iter().zip(column) {
            let Some(rating) = value else {
                continue;
            };

            let replace = match &found {
                Some(best) => beats(rating, best.rating),
                None => true
            };

            if replace {
                found = Some(RatingExtremum {
                    participant: name.clone(),
                    event_key: event_key.clone(),
                    rating
                });
            }
        }
    }

    found
}

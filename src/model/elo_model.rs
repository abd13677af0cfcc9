use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    model::{
        ledger::ReplayLedger,
        model_config::ModelConfig,
        rating_tracker::RatingTracker,
        rating_utils::{expected_total, updated_rating, win_totals},
        standings::{standings, Standing},
        structures::{
            contest::{Contest, ValidationError},
            event_key::EventKey,
            processing::{ContestOutcome, ProcessingSummary, RatingChange}
        },
        time_series::RatingSeries
    },
    utils::progress_utils::progress_bar
};

/// The rating engine: owns every participant's rating and the ledger of
/// contests already applied to them.
#[derive(Debug, Clone, Default)]
pub struct EloModel {
    pub rating_tracker: RatingTracker,
    pub ledger: ReplayLedger,
    pub config: ModelConfig
}

impl EloModel {
    pub fn new(config: ModelConfig) -> EloModel {
        EloModel {
            rating_tracker: RatingTracker::new(),
            ledger: ReplayLedger::new(),
            config
        }
    }

    /// Resumes from previously stored ratings and ledger.
    pub fn from_parts(rating_tracker: RatingTracker, ledger: ReplayLedger, config: ModelConfig) -> EloModel {
        EloModel {
            rating_tracker,
            ledger,
            config
        }
    }

    /// Processes contests in the given order. A contest that fails validation
    /// is reported in the summary and does not stop the remaining contests.
    pub fn process(&mut self, contests: &[Contest]) -> ProcessingSummary {
        let progress_bar = progress_bar(contests.len() as u64, "Processing contests".to_string());
        let mut summary = ProcessingSummary::default();

        for contest in contests {
            match self.process_contest(contest) {
                Ok(ContestOutcome::Processed(_)) => summary.processed.push(contest.event_key.clone()),
                Ok(ContestOutcome::Skipped) => summary.skipped.push(contest.event_key.clone()),
                Err(e) => {
                    warn!("Rejected contest: {}", e);
                    summary.rejected.push(e);
                }
            }

            if let Some(bar) = &progress_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress_bar {
            bar.finish_and_clear();
        }

        info!(
            "Processed {} contests ({} already applied, {} rejected)",
            summary.processed.len(),
            summary.skipped.len(),
            summary.rejected.len()
        );
        summary
    }

    /// # Contest processing
    ///
    /// Applies one dated batch of scores to the ratings of everyone in it.
    ///
    /// Steps:
    /// 1. Skip the contest if its key is already in the ledger.
    /// 2. Rank the entrants by score. Each entrant's win total is the number of
    ///     entrants they beat plus half the number they tied with.
    /// 3. Read every entrant's pre-contest rating, creating newcomers at the default rating.
    /// 4. Rate every entrant against the pre-contest ratings of all other entrants.
    ///     No new rating is applied until all of them are computed.
    /// 5. Commit the new ratings and record the key in the ledger.
    ///
    /// Validation happens before step 2, so a rejected contest leaves no trace.
    pub fn process_contest(&mut self, contest: &Contest) -> Result<ContestOutcome, ValidationError> {
        let event_key = &contest.event_key;
        if self.ledger.contains(event_key) {
            debug!("Contest {} already processed, skipping", event_key);
            return Ok(ContestOutcome::Skipped);
        }

        contest.validate()?;

        info!("Evaluating contest {} with {} entrants", event_key, contest.len());

        let (names, scores): (Vec<&String>, Vec<f64>) = contest.scores().iter().map(|(n, s)| (n, *s)).unzip();
        let wins = win_totals(&scores, self.config.low_score_wins);

        let pre_contest: Vec<f64> = names
            .iter()
            .map(|name| self.rating_tracker.get_or_create(name, event_key))
            .collect();

        let changes: Vec<RatingChange> = names
            .iter()
            .enumerate()
            .map(|(i, name)| self.rate_entrant(name, i, &pre_contest, wins[i]))
            .collect();

        let new_ratings: IndexMap<String, f64> = changes
            .iter()
            .map(|c| (c.participant.clone(), c.rating_after))
            .collect();

        self.rating_tracker.bulk_update(event_key, &new_ratings);
        self.ledger.record(event_key.clone());

        Ok(ContestOutcome::Processed(changes))
    }

    /// Rates the entrant at `index` against every other pre-contest rating.
    fn rate_entrant(&self, name: &str, index: usize, pre_contest: &[f64], win_total: f64) -> RatingChange {
        let rating = pre_contest[index];
        let opponents: Vec<f64> = pre_contest
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, r)| *r)
            .collect();

        let expected = expected_total(rating, &opponents);
        let k_factor = self.config.k_factor.k_factor(rating);

        RatingChange {
            participant: name.to_string(),
            rating_before: rating,
            rating_after: updated_rating(rating, k_factor, win_total, expected),
            win_total,
            expected,
            k_factor
        }
    }

    /// Removes a contest's snapshots and its ledger entry. Ratings set by later
    /// contests are not recomputed. Returns false if the key was never processed.
    pub fn retract(&mut self, event_key: &EventKey) -> bool {
        if !self.ledger.remove(event_key) {
            return false;
        }

        let removed = self.rating_tracker.retract(event_key);
        info!("Retracted contest {} ({} snapshots removed)", event_key, removed);

        true
    }

    /// See [`RatingTracker::reset_to_last_snapshot`].
    pub fn reset_to_last_snapshot(&mut self) {
        self.rating_tracker.reset_to_last_snapshot();
    }

    /// Dense rating-over-time table for every processed contest.
    pub fn series(&self, drop_inactive: bool) -> RatingSeries {
        RatingSeries::build(
            &self.rating_tracker,
            &self.ledger,
            drop_inactive,
            self.config.inactivity_window
        )
    }

    /// Current leaderboard, optionally without inactive participants.
    pub fn standings(&self, drop_inactive: bool) -> Vec<Standing> {
        let series = self.series(false);
        let excluded = if drop_inactive {
            series.inactive_participants().to_vec()
        } else {
            Vec::new()
        };

        standings(&self.rating_tracker, &excluded)
    }
}

use thiserror::Error;
use tracing::info;

use crate::{
    database::db::{restore_model, save_model, StateError, StateStore},
    ingestion::{
        errors::{ExtractionError, RowError},
        extraction::{extract_contests, ExtractionMode},
        score_sheet::ScoreSheet
    },
    model::{
        analytics::{highest_rating, lowest_rating, winners_and_losers, PeriodMovers, RatingExtremum},
        elo_model::EloModel,
        model_config::ModelConfig,
        standings::Standing,
        structures::{contest::ValidationError, event_key::EventKey}
    }
};

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    State(#[from] StateError)
}

#[derive(Debug, Clone)]
pub struct LeagueOptions {
    /// Exact header of the column holding scores
    pub score_column: String,
    pub low_score_wins: bool,
    /// Save the model back to the store after processing
    pub persist: bool,
    pub mode: ExtractionMode
}

impl LeagueOptions {
    pub fn new(score_column: impl Into<String>) -> LeagueOptions {
        LeagueOptions {
            score_column: score_column.into(),
            low_score_wins: false,
            persist: false,
            mode: ExtractionMode::Strict
        }
    }
}

#[derive(Debug)]
pub struct LeagueReport {
    pub model: EloModel,
    /// Event keys applied in this run, in processing order
    pub processed: Vec<EventKey>,
    /// Event keys already in the ledger
    pub skipped: Vec<EventKey>,
    pub rejected: Vec<ValidationError>,
    /// Rows dropped by lenient extraction
    pub skipped_rows: Vec<RowError>
}

impl LeagueReport {
    /// Leaderboard, optionally leaving inactive participants off.
    pub fn standings(&self, drop_inactive: bool) -> Vec<Standing> {
        self.model.standings(drop_inactive)
    }

    /// Biggest movers per contest. Inactive participants are always included.
    pub fn movers(&self) -> Vec<PeriodMovers> {
        winners_and_losers(&self.model.series(false))
    }

    /// Highest and lowest rating over the whole series, inactive participants included.
    pub fn extrema(&self) -> (Option<RatingExtremum>, Option<RatingExtremum>) {
        let series = self.model.series(false);

        (highest_rating(&series), lowest_rating(&series))
    }
}

/// Runs one league update: restore stored state, read the sheet, apply every new
/// contest and optionally save.
///
/// Missing or unreadable stored state starts a fresh league. A sheet rejected by
/// extraction returns before anything is processed or saved.
pub fn run_league(
    store: &impl StateStore,
    sheet: &ScoreSheet,
    options: &LeagueOptions
) -> Result<LeagueReport, LeagueError> {
    let config = ModelConfig::with_low_score_wins(options.low_score_wins);
    let mut model = restore_model(store, config);

    let extraction = extract_contests(sheet, &options.score_column, options.mode)?;
    let summary = model.process(&extraction.contests);

    if options.persist {
        save_model(store, &model)?;
    } else {
        info!("Leaving stored state untouched");
    }

    Ok(LeagueReport {
        model,
        processed: summary.processed,
        skipped: summary.skipped,
        rejected: summary.rejected,
        skipped_rows: extraction.skipped_rows
    })
}

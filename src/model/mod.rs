//! The rating engine.
//!
//! [`elo_model::EloModel`] ingests contests and owns the
//! [`rating_tracker::RatingTracker`] and [`ledger::ReplayLedger`]. The series,
//! analytics and standings modules only read from them.
pub mod analytics;
pub mod constants;
pub mod elo_model;
pub mod k_factor;
pub mod ledger;
pub mod model_config;
pub mod rating_tracker;
pub mod rating_utils;
pub mod standings;
pub mod structures;
pub mod time_series;

pub mod args;
pub mod database;
pub mod ingestion;
pub mod league;
pub mod model;
pub mod utils;

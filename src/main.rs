use std::{fs, process};

use chrono::Local;
use clap::Parser;
use elo_league::{
    args::Args,
    database::db::JsonFileStore,
    ingestion::{extraction::ExtractionMode, score_sheet::ScoreSheet},
    league::{run_league, LeagueOptions, LeagueReport}
};
use tracing::error;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let sheet = match fs::read_to_string(&args.sheet)
        .map_err(|e| e.to_string())
        .and_then(|json| ScoreSheet::from_json_records(&json).map_err(|e| e.to_string()))
    {
        Ok(sheet) => sheet,
        Err(e) => {
            error!("Could not read score sheet {}: {}", args.sheet.display(), e);
            process::exit(1);
        }
    };

    let options = LeagueOptions {
        score_column: args.score_column.clone(),
        low_score_wins: args.low_score_wins,
        persist: args.save,
        mode: if args.lenient {
            ExtractionMode::Lenient
        } else {
            ExtractionMode::Strict
        }
    };

    let store = JsonFileStore::new(&args.state);
    match run_league(&store, &sheet, &options) {
        Ok(report) => print_report(&report, args.drop_inactive),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(level: &str) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn print_report(report: &LeagueReport, drop_inactive: bool) {
    let today = Local::now().date_naive();

    println!("Standings");
    for s in report.standings(drop_inactive) {
        let days = s
            .days_since_last_played(today)
            .map(|d| format!("{} days ago", d))
            .unwrap_or_default();
        let last = s.last_played.as_ref().map(|k| k.to_string()).unwrap_or_default();

        println!(
            "{:>4}. {:<24} {:>8.1} {:>4} games  {} {}",
            s.rank, s.participant, s.rating, s.games_played, last, days
        );
    }

    println!();
    println!("Biggest movers");
    for m in report.movers() {
        println!(
            "{}  up: {} ({:+.1}, {:+.2}%)  down: {} ({:+.1}, {:+.2}%)",
            m.event_key,
            m.biggest_winner,
            m.rating_increase,
            m.pct_increase,
            m.biggest_loser,
            m.rating_decrease,
            m.pct_decrease
        );
    }

    println!();
    let (highest, lowest) = report.extrema();
    if let Some(high) = highest {
        println!("Highest rating: {} {:.1} on {}", high.participant, high.rating, high.event_key);
    }
    if let Some(low) = lowest {
        println!("Lowest rating: {} {:.1} on {}", low.participant, low.rating, low.event_key);
    }

    if !report.skipped_rows.is_empty() {
        println!();
        println!("{} rows were skipped", report.skipped_rows.len());
    }
}

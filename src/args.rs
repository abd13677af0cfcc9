use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Elo League",
    long_about = "Applies dated multiplayer score sheets to a persistent Elo league"
)]
pub struct Args {
    /// Score sheet as a JSON array of row objects, e.g.
    /// [{"Date": "2021-02-11", "Player": "Sam", "Total Score": "1,250"}]
    #[arg(long, help = "Path to the score sheet")]
    pub sheet: PathBuf,

    /// Header of the score column. Matched exactly, unlike the Date and Player headers
    #[arg(long, default_value = "Total Score")]
    pub score_column: String,

    /// Where league state is loaded from and saved to
    #[arg(long, env = "ELO_STATE_PATH", default_value = "league_state.json")]
    pub state: PathBuf,

    /// Rank lower scores higher (golf-style scoring)
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub low_score_wins: bool,

    /// Save the updated league state after processing
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub save: bool,

    /// Skip unreadable rows instead of rejecting the whole sheet
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub lenient: bool,

    /// Leave participants whose rating has not moved recently out of the standings
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub drop_inactive: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

use std::{env, fs, path::PathBuf, sync::Once};

use elo_league::ingestion::score_sheet::ScoreSheet;

static INIT: Once = Once::new();

/// Initialize test environment with RUST_LOG=WARN
pub fn init_test_env() {
    INIT.call_once(|| {
        env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// An empty scratch directory unique to this test process.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("elo-league-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

/// Three weeks of a four-player league in the row-object JSON format.
pub const SEASON_JSON: &str = r#"[
    { "Date": "2021-02-11", "Player": "Sam", "Total Score": "1,250" },
    { "Date": "2021-02-11", "Player": "Jo", "Total Score": 980 },
    { "Date": "2021-02-11", "Player": "Ari", "Total Score": 1100 },
    { "Date": "2021-02-18", "Player": "Sam", "Total Score": 900 },
    { "Date": "2021-02-18", "Player": "Jo", "Total Score": 1200 },
    { "Date": "2021-02-18", "Player": "Kim", "Total Score": 1200 },
    { "Date": "2021-02-25", "Player": "Ari", "Total Score": 1500 },
    { "Date": "2021-02-25", "Player": "Kim", "Total Score": 700 }
]"#;

#[allow(dead_code)]
pub fn season_sheet() -> ScoreSheet {
    ScoreSheet::from_json_records(SEASON_JSON).expect("Season sheet is valid JSON")
}

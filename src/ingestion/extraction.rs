use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    ingestion::{
        errors::{ExtractionError, RowError, RowErrorKind},
        score_sheet::{Cell, ScoreSheet}
    },
    model::structures::{contest::Contest, event_key::EventKey}
};

pub const DATE_COLUMN: &str = "date";
pub const PLAYER_COLUMN: &str = "player";

/// What to do with rows that cannot be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Any unreadable row rejects the whole sheet
    #[default]
    Strict,
    /// Unreadable rows are skipped and reported
    Lenient
}

/// Contests read from a sheet, in order of each date's first appearance
#[derive(Debug, Default)]
pub struct Extraction {
    pub contests: Vec<Contest>,
    pub skipped_rows: Vec<RowError>
}

/// Groups the rows of `sheet` into contests keyed by the date column.
///
/// The date and player headers are matched case-insensitively, the score header
/// exactly. A missing header rejects the sheet in either mode. Within a date, a
/// player listed twice keeps the later score.
pub fn extract_contests(
    sheet: &ScoreSheet,
    score_column: &str,
    mode: ExtractionMode
) -> Result<Extraction, ExtractionError> {
    let date_idx = sheet
        .column_ignore_case(DATE_COLUMN)
        .ok_or_else(|| ExtractionError::MissingColumn(DATE_COLUMN.to_string()))?;
    let player_idx = sheet
        .column_ignore_case(PLAYER_COLUMN)
        .ok_or_else(|| ExtractionError::MissingColumn(PLAYER_COLUMN.to_string()))?;
    let score_idx = sheet
        .column_exact(score_column)
        .ok_or_else(|| ExtractionError::MissingColumn(score_column.to_string()))?;

    let mut contests: IndexMap<EventKey, Contest> = IndexMap::new();
    let mut errors = Vec::new();

    for (row, cells) in sheet.rows().iter().enumerate() {
        match read_row(row, cells, date_idx, player_idx, score_idx) {
            Ok((event_key, player, score)) => contests
                .entry(event_key.clone())
                .or_insert_with(|| Contest::new(event_key))
                .insert_score(player, score),
            Err(e) => errors.push(e)
        }
    }

    if !errors.is_empty() {
        match mode {
            ExtractionMode::Strict => return Err(ExtractionError::InvalidRows(errors)),
            ExtractionMode::Lenient => {
                for e in &errors {
                    warn!("Skipping {}", e);
                }
            }
        }
    }

    info!("Read {} contests from {} rows", contests.len(), sheet.len());
    Ok(Extraction {
        contests: contests.into_values().collect(),
        skipped_rows: errors
    })
}

fn read_row(
    row: usize,
    cells: &[Cell],
    date_idx: usize,
    player_idx: usize,
    score_idx: usize
) -> Result<(EventKey, String, f64), RowError> {
    let fail = |kind| RowError { row, kind };

    let event_key = cells
        .get(date_idx)
        .and_then(Cell::as_text)
        .ok_or_else(|| fail(RowErrorKind::MissingEventKey))?;
    let player = cells
        .get(player_idx)
        .and_then(Cell::as_text)
        .ok_or_else(|| fail(RowErrorKind::MissingParticipant))?;
    let score = parse_score(cells.get(score_idx)).map_err(fail)?;

    Ok((EventKey::new(event_key), player, score))
}

/// Reads a score cell. Thousands separators in text are ignored.
fn parse_score(cell: Option<&Cell>) -> Result<f64, RowErrorKind> {
    let score = match cell {
        None | Some(Cell::Empty) => return Err(RowErrorKind::MissingScore),
        Some(Cell::Number(n)) => *n,
        Some(Cell::Text(raw)) => {
            let cleaned = raw.trim().replace(',', "");
            if cleaned.is_empty() {
                return Err(RowErrorKind::MissingScore);
            }

            cleaned
                .parse::<f64>()
                .map_err(|_| RowErrorKind::InvalidScore(raw.clone()))?
        }
    };

    if !score.is_finite() {
        return Err(RowErrorKind::InvalidScore(score.to_string()));
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::generate_score_sheet;

    fn sheet_with_bad_rows() -> ScoreSheet {
        ScoreSheet::new(
            vec!["date".to_string(), "PLAYER".to_string(), "Delta".to_string()],
            vec![
                vec![
                    Cell::Text("2021-04-22".to_string()),
                    Cell::Text("Sam".to_string()),
                    Cell::Number(3.0),
                ],
                vec![
                    Cell::Text("2021-04-22".to_string()),
                    Cell::Empty,
                    Cell::Number(5.0),
                ],
                vec![
                    Cell::Text("2021-04-22".to_string()),
                    Cell::Text("Jo".to_string()),
                    Cell::Text("n/a".to_string()),
                ],
                vec![
                    Cell::Text("2021-04-22".to_string()),
                    Cell::Text("Ari".to_string()),
                    Cell::Text("1,204".to_string()),
                ],
            ]
        )
    }

    #[test]
    fn test_groups_rows_by_date_in_order_of_appearance() {
        let sheet = generate_score_sheet(
            "Total Score",
            &[
                ("2021-02-18", "Sam", 10.0),
                ("2021-02-11", "Sam", 12.0),
                ("2021-02-18", "Jo", 8.0),
                ("2021-02-11", "Jo", 14.0),
            ]
        );

        let extraction = extract_contests(&sheet, "Total Score", ExtractionMode::Strict).unwrap();
        let keys: Vec<&str> = extraction.contests.iter().map(|c| c.event_key.as_str()).collect();

        assert_eq!(keys, vec!["2021-02-18", "2021-02-11"]);
        assert_eq!(extraction.contests[0].len(), 2);
        assert!(extraction.skipped_rows.is_empty());
    }

    #[test]
    fn test_duplicate_rows_keep_last_score() {
        let sheet = generate_score_sheet(
            "Total Score",
            &[
                ("2021-02-11", "Sam", 10.0),
                ("2021-02-11", " Sam", 15.0),
                ("2021-02-11", "Jo", 8.0),
            ]
        );

        let extraction = extract_contests(&sheet, "Total Score", ExtractionMode::Strict).unwrap();
        let contest = &extraction.contests[0];

        assert_eq!(contest.len(), 2);
        assert_eq!(contest.scores().get("Sam"), Some(&15.0));
    }

    #[test]
    fn test_missing_column_rejects_sheet() {
        let sheet = generate_score_sheet("Total Score", &[("2021-02-11", "Sam", 10.0)]);

        let result = extract_contests(&sheet, "total score", ExtractionMode::Lenient);

        assert!(matches!(result, Err(ExtractionError::MissingColumn(c)) if c == "total score"));
    }

    #[test]
    fn test_strict_mode_rejects_bad_rows() {
        let result = extract_contests(&sheet_with_bad_rows(), "Delta", ExtractionMode::Strict);

        let Err(ExtractionError::InvalidRows(errors)) = result else {
            panic!("Expected the sheet to be rejected");
        };

        assert_eq!(
            errors,
            vec![
                RowError {
                    row: 1,
                    kind: RowErrorKind::MissingParticipant
                },
                RowError {
                    row: 2,
                    kind: RowErrorKind::InvalidScore("n/a".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_lenient_mode_skips_bad_rows() {
        let extraction = extract_contests(&sheet_with_bad_rows(), "Delta", ExtractionMode::Lenient).unwrap();

        assert_eq!(extraction.skipped_rows.len(), 2);
        assert_eq!(extraction.contests.len(), 1);
        assert_eq!(extraction.contests[0].scores().get("Ari"), Some(&1204.0));
        assert_eq!(extraction.contests[0].len(), 2);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(Some(&Cell::Text(" 1,250 ".to_string()))), Ok(1250.0));
        assert_eq!(parse_score(Some(&Cell::Text("-3.5".to_string()))), Ok(-3.5));
        assert_eq!(parse_score(Some(&Cell::Text("".to_string()))), Err(RowErrorKind::MissingScore));
        assert_eq!(parse_score(None), Err(RowErrorKind::MissingScore));
        assert!(matches!(
            parse_score(Some(&Cell::Text("inf".to_string()))),
            Err(RowErrorKind::InvalidScore(_))
        ));
    }
}

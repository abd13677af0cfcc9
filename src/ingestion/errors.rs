use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    MissingEventKey,
    MissingParticipant,
    MissingScore,
    InvalidScore(String)
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowErrorKind::MissingEventKey => write!(f, "missing date"),
            RowErrorKind::MissingParticipant => write!(f, "missing player"),
            RowErrorKind::MissingScore => write!(f, "missing score"),
            RowErrorKind::InvalidScore(raw) => write!(f, "score {:?} is not a number", raw)
        }
    }
}

/// A row that could not be turned into a score entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {kind}")]
pub struct RowError {
    /// 0-based index into the sheet's rows
    pub row: usize,
    pub kind: RowErrorKind
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Score sheet is missing the '{0}' column")]
    MissingColumn(String),

    #[error("{} rows could not be read", .0.len())]
    InvalidRows(Vec<RowError>),

    #[error("Failed to parse score sheet: {0}")]
    Parse(#[from] serde_json::Error)
}

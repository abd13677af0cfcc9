use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ingestion::errors::ExtractionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64)
}

impl Cell {
    /// Trimmed text of the cell; numbers are rendered, empty text is `None`.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Cell::Empty => return None,
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string()
        };

        (!text.is_empty()).then_some(text)
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::String(s) => Cell::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or_else(|| Cell::Text(n.to_string())),
            other => Cell::Text(other.to_string())
        }
    }
}

/// Rows of raw cells under named columns, as handed over by whatever loaded the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSheet {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>
}

impl ScoreSheet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> ScoreSheet {
        ScoreSheet { columns, rows }
    }

    /// Parses a JSON array of row objects. Columns are collected in order of first
    /// appearance; a row without a column gets [`Cell::Empty`] there.
    pub fn from_json_records(json: &str) -> Result<ScoreSheet, ExtractionError> {
        let records: Vec<serde_json::Map<String, Value>> = serde_json::from_str(json)?;

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for name in record.keys() {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map(Cell::from).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        Ok(ScoreSheet { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column whose header equals `name`, ignoring case and surrounding whitespace.
    pub fn column_ignore_case(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    /// Index of the column whose header is exactly `name`.
    pub fn column_exact(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, ScoreSheet};

    #[test]
    fn test_from_json_records() {
        let json = r#"[
            { "Date": "2021-02-11", "Player": "Sam", "Total Score": "1,250" },
            { "Date": "2021-02-11", "Player": "Jo", "Total Score": 980 },
            { "Date": "2021-02-18", "Player": "Sam" }
        ]"#;

        let sheet = ScoreSheet::from_json_records(json).unwrap();

        assert_eq!(sheet.columns(), &["Date", "Player", "Total Score"]);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.rows()[0][2], Cell::Text("1,250".to_string()));
        assert_eq!(sheet.rows()[1][2], Cell::Number(980.0));
        assert_eq!(sheet.rows()[2][2], Cell::Empty);
    }

    #[test]
    fn test_from_json_records_rejects_non_array() {
        assert!(ScoreSheet::from_json_records(r#"{ "Date": "2021-02-11" }"#).is_err());
    }

    #[test]
    fn test_column_lookup() {
        let sheet = ScoreSheet::new(vec!["DATE".to_string(), " player ".to_string(), "Delta".to_string()], vec![]);

        assert_eq!(sheet.column_ignore_case("date"), Some(0));
        assert_eq!(sheet.column_ignore_case("Player"), Some(1));
        assert_eq!(sheet.column_exact("Delta"), Some(2));
        assert_eq!(sheet.column_exact("delta"), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Text("  Sam ".to_string()).as_text(), Some("Sam".to_string()));
        assert_eq!(Cell::Text("   ".to_string()).as_text(), None);
        assert_eq!(Cell::Empty.as_text(), None);
        assert_eq!(Cell::Number(3.0).as_text(), Some("3".to_string()));
    }
}

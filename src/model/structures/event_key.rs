use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label of a dated contest. Keys are compared for identity only;
/// the engine orders contests by the order they were ingested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(String);

impl EventKey {
    pub fn new(key: impl AsRef<str>) -> EventKey {
        EventKey(key.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the key as an ISO-8601 calendar date, if it is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for EventKey {
    fn from(date: NaiveDate) -> Self {
        EventKey(date.format("%Y-%m-%d").to_string())
    }
}

impl From<&str> for EventKey {
    fn from(key: &str) -> Self {
        EventKey::new(key)
    }
}

impl From<String> for EventKey {
    fn from(key: String) -> Self {
        EventKey::new(key)
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::EventKey;
    use chrono::NaiveDate;

    #[test]
    fn test_key_is_trimmed() {
        assert_eq!(EventKey::new("  2021-04-22 ").as_str(), "2021-04-22");
        assert!(EventKey::new("   ").is_blank());
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2021, 2, 11).unwrap();
        let key = EventKey::from(date);

        assert_eq!(key.as_str(), "2021-02-11");
        assert_eq!(key.as_date(), Some(date));
    }

    #[test]
    fn test_non_date_key() {
        assert_eq!(EventKey::from("week 3").as_date(), None);
    }
}

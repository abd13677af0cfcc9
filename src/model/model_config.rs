use serde::{Deserialize, Serialize};

use crate::model::{constants::INACTIVITY_WINDOW, k_factor::KFactorPolicy};

/// Tuning knobs of the rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Rank lower scores first (golf-style games)
    pub low_score_wins: bool,
    pub k_factor: KFactorPolicy,
    /// Trailing number of contests a rating must stay flat over to count as inactive
    pub inactivity_window: usize
}

impl ModelConfig {
    pub fn with_low_score_wins(low_score_wins: bool) -> ModelConfig {
        ModelConfig {
            low_score_wins,
            ..ModelConfig::default()
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            low_score_wins: false,
            k_factor: KFactorPolicy::default(),
            inactivity_window: INACTIVITY_WINDOW
        }
    }
}

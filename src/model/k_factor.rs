use std::ops::{Bound, RangeBounds};

use serde::{Deserialize, Serialize};

/// A rating range and the K-factor applied to ratings inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KFactorBand {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
    pub k: f64
}

impl KFactorBand {
    pub fn contains(&self, rating: f64) -> bool {
        (self.lower, self.upper).contains(&rating)
    }
}

/// Piecewise-constant K-factor lookup. Bands are tested in order and the first
/// band containing the rating wins, so overlapping edges resolve to the earlier band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KFactorPolicy {
    bands: Vec<KFactorBand>,
    /// Used when no band matches (only reachable with a NaN rating)
    fallback: f64
}

impl KFactorPolicy {
    pub fn new(bands: Vec<KFactorBand>, fallback: f64) -> KFactorPolicy {
        KFactorPolicy { bands, fallback }
    }

    /// K-factor for the rating a participant held before the contest.
    pub fn k_factor(&self, rating: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.contains(rating))
            .map(|band| band.k)
            .unwrap_or(self.fallback)
    }

    pub fn bands(&self) -> &[KFactorBand] {
        &self.bands
    }
}

impl Default for KFactorPolicy {
    /// `>1850` is tested before `[1750, 1850]`, so a rating of exactly 1850 uses K = 10.
    fn default() -> Self {
        use Bound::{Excluded, Included, Unbounded};

        let band = |lower, upper, k| KFactorBand { lower, upper, k };
        KFactorPolicy {
            bands: vec![
                band(Excluded(1850.0), Unbounded, 8.0),
                band(Included(1750.0), Included(1850.0), 10.0),
                band(Included(1650.0), Excluded(1750.0), 15.0),
                band(Included(1550.0), Excluded(1650.0), 18.0),
                band(Included(1450.0), Excluded(1550.0), 20.0),
                band(Included(1350.0), Excluded(1450.0), 22.0),
                band(Included(1250.0), Excluded(1350.0), 25.0),
                band(Included(1150.0), Excluded(1250.0), 30.0),
                band(Unbounded, Excluded(1150.0), 32.0),
            ],
            fallback: 32.0
        }
    }
}

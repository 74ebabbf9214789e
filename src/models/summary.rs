use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceStats — Summary of accepted prices for one profile
// ---------------------------------------------------------------------------

/// Statistics over one snapshot of listing prices, in units of 10,000 KRW (만원).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStats {
    pub count: usize,
    pub mean: i64,
    pub min: i64,
    pub max: i64,
}

// ---------------------------------------------------------------------------
// ProfileSummary — Aggregation result, possibly empty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProfileSummary {
    /// No plausible price survived extraction.
    NoData,
    Prices(PriceStats),
}

impl ProfileSummary {
    pub fn count(&self) -> usize {
        match self {
            ProfileSummary::NoData => 0,
            ProfileSummary::Prices(stats) => stats.count,
        }
    }

    pub fn stats(&self) -> Option<&PriceStats> {
        match self {
            ProfileSummary::NoData => None,
            ProfileSummary::Prices(stats) => Some(stats),
        }
    }

    pub fn mean(&self) -> Option<i64> {
        self.stats().map(|s| s.mean)
    }

    pub fn min(&self) -> Option<i64> {
        self.stats().map(|s| s.min)
    }

    pub fn max(&self) -> Option<i64> {
        self.stats().map(|s| s.max)
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ProfileSummary::NoData)
    }
}

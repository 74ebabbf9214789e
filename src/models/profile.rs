use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BrandTable;
use crate::error::{BikeWatchError, Result};

// ---------------------------------------------------------------------------
// YearRange — Inclusive model-year bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    min: u16,
    max: u16,
}

impl YearRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: u16, max: u16) -> Result<Self> {
        if min > max {
            return Err(BikeWatchError::InvalidArgument(format!(
                "year range start {min} is after end {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Parse the `2021-2024` form used by the add command. A single year
    /// (`2023`) is a one-year range.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (lo, hi) = match input.split_once('-') {
            Some((lo, hi)) => (lo, hi),
            None => (input, input),
        };
        let parse = |s: &str| {
            s.trim().parse::<u16>().map_err(|_| {
                BikeWatchError::InvalidArgument(format!("not a year range: '{input}'"))
            })
        };
        Self::new(parse(lo)?, parse(hi)?)
    }

    /// Collapse a list of individual years into its bounds.
    pub fn from_years(years: &[u16]) -> Option<Self> {
        let min = *years.iter().min()?;
        let max = *years.iter().max()?;
        Some(Self { min, max })
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Profile — A tracked brand/model/year search target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Stable watchlist identity, see [`Profile::key_for`].
    pub key: String,
    /// Brand as the user typed it (often Korean).
    pub display_brand: String,
    /// Brand token sent to the marketplace search.
    pub canonical_brand: String,
    pub model: String,
    /// Always present for profiles created through the store. Records loaded
    /// from a damaged file may lack it.
    pub year_range: Option<YearRange>,
}

impl Profile {
    pub fn new(
        display_brand: &str,
        canonical_brand: &str,
        model: &str,
        year_range: YearRange,
    ) -> Self {
        Self {
            key: Self::key_for(canonical_brand, model),
            display_brand: display_brand.trim().to_string(),
            canonical_brand: canonical_brand.trim().to_string(),
            model: model.trim().to_string(),
            year_range: Some(year_range),
        }
    }

    /// Resolve the canonical brand through `brands` and build the profile.
    pub fn resolve(
        brands: &BrandTable,
        display_brand: &str,
        model: &str,
        year_range: YearRange,
    ) -> Self {
        let canonical = brands.resolve(display_brand);
        Self::new(display_brand, &canonical, model, year_range)
    }

    /// Lowercased `brand_model` with every whitespace run replaced by `_`.
    pub fn key_for(canonical_brand: &str, model: &str) -> String {
        format!("{} {}", canonical_brand.trim(), model.trim())
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    /// `display_brand model`, as shown to the report recipient.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.display_brand, self.model)
    }
}

// ---------------------------------------------------------------------------
// ProfileRecord — Persisted watchlist entry
// ---------------------------------------------------------------------------

/// On-disk shape of a watchlist entry.
///
/// Older files stored `{brand, model, years: [..]}`; those fields are still
/// read but never written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_brand: Option<String>,
    #[serde(default, skip_serializing)]
    pub brand: Option<String>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<(u16, u16)>,
    #[serde(default, skip_serializing)]
    pub years: Option<Vec<u16>>,
}

impl ProfileRecord {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            display_brand: Some(profile.display_brand.clone()),
            canonical_brand: Some(profile.canonical_brand.clone()),
            brand: None,
            model: profile.model.clone(),
            year_range: profile.year_range.map(|r| (r.min(), r.max())),
            years: None,
        }
    }

    /// Apply the defaulting rules and produce a [`Profile`] keyed by `key`.
    ///
    /// Returns `None` when the record names no brand at all.
    pub fn into_profile(self, key: &str, brands: &BrandTable) -> Option<Profile> {
        let display = non_empty(self.display_brand).or_else(|| non_empty(self.brand));
        let canonical = non_empty(self.canonical_brand);

        let (display_brand, canonical_brand) = match (display, canonical) {
            (Some(d), Some(c)) => (d, c),
            (Some(d), None) => {
                let c = brands.resolve(&d);
                (d, c)
            }
            (None, Some(c)) => (c.clone(), c),
            (None, None) => return None,
        };

        let year_range = match (self.year_range, self.years) {
            (Some((lo, hi)), _) => YearRange::new(lo, hi).ok(),
            (None, Some(years)) => YearRange::from_years(&years),
            (None, None) => None,
        };

        Some(Profile {
            key: key.to_string(),
            display_brand,
            canonical_brand,
            model: self.model.trim().to_string(),
            year_range,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

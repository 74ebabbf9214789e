//! JSON-file watchlist store.
//!
//! The file is a single object mapping profile keys to records, written
//! pretty-printed with non-ASCII text kept as-is. Entry order is preserved
//! across load and save, and sweeps follow it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::BrandTable;
use crate::error::Result;
use crate::models::{Profile, ProfileRecord, YearRange};

/// Header line of the watchlist listing.
pub const LISTING_TITLE: &str = "현재 등록 목록:";

/// Read-only view of the watchlist, as consumed by a sweep.
pub trait Watchlist: Send + Sync {
    fn list_profiles(&self) -> Result<Vec<Profile>>;
}

/// Watchlist persisted in a JSON file.
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    path: PathBuf,
    brands: BrandTable,
}

impl WatchlistStore {
    pub fn new<P: AsRef<Path>>(path: P, brands: BrandTable) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            brands,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add or replace the profile for `display_brand` + `model`.
    ///
    /// The key is derived from the canonical brand, so re-adding a model
    /// under a different spelling of the same brand overwrites the entry.
    pub fn add(&self, display_brand: &str, model: &str, years: YearRange) -> Result<Profile> {
        let profile = Profile::resolve(&self.brands, display_brand, model, years);

        let mut records = self.load_raw()?;

        // Entries saved under an older key scheme resolve to the same
        // profile; drop them so the model is tracked once.
        let stale: Vec<String> = records
            .iter()
            .filter(|(key, value)| {
                key.as_str() != profile.key
                    && self.resolved_key(key, value).as_deref() == Some(profile.key.as_str())
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            records.shift_remove(key);
        }

        let replaced = records
            .insert(
                profile.key.clone(),
                serde_json::to_value(ProfileRecord::from_profile(&profile))?,
            )
            .is_some()
            || !stale.is_empty();
        self.save_raw(&records)?;

        info!(profile = %profile.key, replaced, rekeyed = stale.len(), "watchlist entry saved");
        Ok(profile)
    }

    /// Remove the entry stored under `key`. Returns `false` if there was none.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut records = self.load_raw()?;
        if records.shift_remove(key).is_none() {
            return Ok(false);
        }
        self.save_raw(&records)?;
        info!(profile = %key, "watchlist entry removed");
        Ok(true)
    }

    /// Look up a single profile by key.
    pub fn get(&self, key: &str) -> Result<Option<Profile>> {
        Ok(self.list_profiles()?.into_iter().find(|p| p.key == key))
    }

    /// Canonical key of a stored record, regardless of the key it is filed under.
    fn resolved_key(&self, key: &str, value: &Value) -> Option<String> {
        let record: ProfileRecord = serde_json::from_value(value.clone()).ok()?;
        let p = record.into_profile(key, &self.brands)?;
        Some(Profile::key_for(&p.canonical_brand, &p.model))
    }

    fn load_raw(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write to a temp file beside the target and rename it into place, so
    /// an interrupted save never leaves a truncated watchlist.
    fn save_raw(&self, records: &Map<String, Value>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Watchlist for WatchlistStore {
    fn list_profiles(&self) -> Result<Vec<Profile>> {
        let records = self.load_raw()?;
        let mut profiles = Vec::with_capacity(records.len());

        for (key, value) in records {
            let record: ProfileRecord = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(profile = %key, error = %e, "skipping unreadable watchlist entry");
                    continue;
                }
            };
            match record.into_profile(&key, &self.brands) {
                Some(profile) => profiles.push(profile),
                None => warn!(profile = %key, "skipping watchlist entry without a brand"),
            }
        }

        Ok(profiles)
    }
}

/// Fixed, in-memory watchlist.
impl Watchlist for Vec<Profile> {
    fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.clone())
    }
}

/// Human-readable listing of the watchlist, or the empty notice.
pub fn format_listing(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return crate::report::EMPTY_WATCHLIST_NOTICE.to_string();
    }

    let mut out = String::from(LISTING_TITLE);
    for p in profiles {
        out.push_str(&format!("\n- {}: {}", p.key, p.display_name()));
        if let Some(years) = p.year_range {
            out.push_str(&format!(" ({years})"));
        }
    }
    out
}

//! Per-profile fetch: render the marketplace search page, pull price
//! candidates, normalize, filter and aggregate.
//!
//! Each fetch owns its render session from open to close. Failures end at
//! this boundary as a [`FetchError`]; they never reach the report loop as a
//! panic or early return.

use std::ops::{Deref, DerefMut};
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, info, info_span};
use url::Url;

use crate::config::{self, Config};
use crate::error::{FetchError, Result};
use crate::models::{Profile, ProfileSummary};
use crate::price::{aggregate, is_plausible, normalize};
use crate::render::{RenderSession, Renderer};

/// Outcome of one profile fetch.
pub type FetchOutcome = std::result::Result<ProfileSummary, FetchError>;

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Drives a [`Renderer`] through the fetch protocol for one profile at a time.
pub struct Fetcher<'a> {
    renderer: &'a dyn Renderer,
    config: &'a Config,
}

impl<'a> Fetcher<'a> {
    pub fn new(renderer: &'a dyn Renderer, config: &'a Config) -> Self {
        Self { renderer, config }
    }

    /// Fetch and summarize current listings for `profile`.
    ///
    /// An empty result is `Ok(ProfileSummary::NoData)` and logged at info;
    /// a renderer failure is `Err(FetchError)` and logged at error.
    pub fn fetch_profile(&self, profile: &Profile) -> FetchOutcome {
        let span = info_span!("fetch", profile = %profile.key);
        let _enter = span.enter();

        match self.try_fetch(profile) {
            Ok(summary) => {
                if summary.is_no_data() {
                    info!(
                        brand = %profile.canonical_brand,
                        model = %profile.model,
                        "no plausible listings found"
                    );
                }
                Ok(summary)
            }
            Err(source) => {
                error!(
                    brand = %profile.canonical_brand,
                    model = %profile.model,
                    error = %source,
                    "fetch failed"
                );
                Err(FetchError {
                    profile_key: profile.key.clone(),
                    source,
                })
            }
        }
    }

    fn try_fetch(&self, profile: &Profile) -> Result<ProfileSummary> {
        let url = listing_url(
            &self.config.marketplace_base,
            &profile.canonical_brand,
            &profile.model,
        )?;

        let mut session = SessionGuard::new(self.renderer.session()?);
        let page = session.open(url.as_str())?;

        // Client-side rendering and challenge pages need time to settle.
        thread::sleep(settle_delay(self.config.settle_delay));

        let fragments = session.find_text_candidates(&page)?;
        let prices = accepted_prices(&fragments);
        debug!(
            url = %page.url,
            candidates = fragments.len(),
            accepted = prices.len(),
            "extracted prices"
        );

        Ok(aggregate(&prices))
    }
}

/// Normalize every fragment and keep the plausible prices, in page order.
pub fn accepted_prices<S: AsRef<str>>(fragments: &[S]) -> Vec<i64> {
    fragments
        .iter()
        .filter_map(|f| normalize(f.as_ref()))
        .filter(|&p| is_plausible(p))
        .collect()
}

/// Marketplace search URL for a canonical brand and raw model text.
pub fn listing_url(base: &str, canonical_brand: &str, model: &str) -> Result<Url> {
    let mut url = Url::parse(base)?.join(config::USED_LISTINGS_PATH)?;
    let query = format!("{} {}", canonical_brand.trim(), model.trim());
    url.query_pairs_mut().append_pair("query", &query);
    Ok(url)
}

/// Uniform random duration within `(min, max)`, inclusive. Reversed bounds
/// are swapped.
pub fn settle_delay(bounds: (Duration, Duration)) -> Duration {
    let (lo, hi) = if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    };
    let lo_ms = lo.as_millis() as u64;
    let hi_ms = hi.as_millis() as u64;
    Duration::from_millis(rand::thread_rng().gen_range(lo_ms..=hi_ms))
}

// ---------------------------------------------------------------------------
// SessionGuard
// ---------------------------------------------------------------------------

/// Closes the wrapped session when dropped, including during unwinding.
struct SessionGuard {
    inner: Box<dyn RenderSession>,
}

impl SessionGuard {
    fn new(inner: Box<dyn RenderSession>) -> Self {
        Self { inner }
    }
}

impl Deref for SessionGuard {
    type Target = dyn RenderSession;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.inner.close();
    }
}

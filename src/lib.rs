//! Used-motorcycle price watch.
//!
//! Sweeps a small watchlist of brand/model/year profiles against the
//! Reitwagen used-bike marketplace, pulls listing prices out of the rendered
//! search pages, and summarizes them (count, mean, min, max in 만원) into a
//! plain-text report for a single recipient.
//!
//! # Quick start
//!
//! ```no_run
//! use bikewatch::{BikeWatch, Config};
//!
//! let watch = BikeWatch::builder()
//!     .config(Config::from_env().unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Sweep the watchlist and print the report
//! println!("{}", watch.report().unwrap());
//!
//! // Or sweep and deliver it to the configured chat
//! watch.run().unwrap();
//! ```
//!
//! A sweep is sequential and slow by design: one render session per profile
//! and a randomized settle delay after every page load. Call it from a
//! scheduler thread or through [`AsyncBikeWatch`], never on a request path.

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod notify;
pub mod price;
pub mod render;
pub mod report;
pub mod store;

#[cfg(feature = "async")]
pub use async_client::AsyncBikeWatch;
pub use config::{BrandTable, Config};
pub use error::{BikeWatchError, FetchError, Result};
pub use fetch::{FetchOutcome, Fetcher};
pub use models::{PriceStats, Profile, ProfileSummary, YearRange};
pub use notify::{Notifier, TelegramNotifier};
pub use render::{HttpRenderer, RenderSession, RenderedPage, Renderer};
pub use store::{Watchlist, WatchlistStore};

use std::fmt;

use chrono::Utc;
use tracing::info;

// ---------------------------------------------------------------------------
// BikeWatchBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`BikeWatch`].
///
/// Every collaborator has a default derived from the [`Config`]: an
/// [`HttpRenderer`], a [`WatchlistStore`] at `config.data_file`, and a
/// [`TelegramNotifier`] when a bot token is set.
#[derive(Default)]
pub struct BikeWatchBuilder {
    config: Config,
    renderer: Option<Box<dyn Renderer>>,
    watchlist: Option<Box<dyn Watchlist>>,
    notifier: Option<Box<dyn Notifier>>,
}

impl BikeWatchBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use a custom page renderer, e.g. a headless browser.
    pub fn renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Read profiles from somewhere other than the configured JSON file.
    pub fn watchlist<W: Watchlist + 'static>(mut self, watchlist: W) -> Self {
        self.watchlist = Some(Box::new(watchlist));
        self
    }

    /// Deliver reports through a custom channel.
    pub fn notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn build(self) -> Result<BikeWatch> {
        let config = self.config;

        let renderer: Box<dyn Renderer> = match self.renderer {
            Some(r) => r,
            None => Box::new(HttpRenderer::from_config(&config)),
        };
        let watchlist: Box<dyn Watchlist> = match self.watchlist {
            Some(w) => w,
            None => Box::new(WatchlistStore::new(&config.data_file, config.brands.clone())),
        };
        let notifier = match (self.notifier, &config.bot_token) {
            (Some(n), _) => Some(n),
            (None, Some(token)) => {
                Some(Box::new(TelegramNotifier::new(token, config.timeout)?) as Box<dyn Notifier>)
            }
            (None, None) => None,
        };

        Ok(BikeWatch {
            config,
            renderer,
            watchlist,
            notifier,
        })
    }
}

// ---------------------------------------------------------------------------
// BikeWatch
// ---------------------------------------------------------------------------

/// The sweep pipeline: watchlist → per-profile fetch → report → delivery.
pub struct BikeWatch {
    config: Config,
    renderer: Box<dyn Renderer>,
    watchlist: Box<dyn Watchlist>,
    notifier: Option<Box<dyn Notifier>>,
}

impl BikeWatch {
    pub fn builder() -> BikeWatchBuilder {
        BikeWatchBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn watchlist(&self) -> &dyn Watchlist {
        self.watchlist.as_ref()
    }

    /// Sweep the whole watchlist and return the report text.
    ///
    /// Fails only if the watchlist itself cannot be read. Individual profile
    /// failures show up as no-data entries.
    pub fn report(&self) -> Result<String> {
        self.compose().map(|(text, _)| text)
    }

    /// Sweep the given profiles and return the report body (no header).
    pub fn sweep(&self, profiles: &[Profile]) -> String {
        let fetcher = Fetcher::new(self.renderer.as_ref(), &self.config);
        info!(profiles = profiles.len(), "sweep started");
        let body = report::build_report(profiles, |p| fetcher.fetch_profile(p));
        info!("sweep finished");
        body
    }

    /// Sweep, then deliver the report to the configured recipient.
    ///
    /// Returns the delivered text, or `None` when the watchlist is empty (or
    /// holds no profile with a year range) and [`Config::notify_when_empty`]
    /// is off.
    pub fn run(&self) -> Result<Option<String>> {
        let (text, empty) = self.compose()?;
        if empty && !self.config.notify_when_empty {
            info!("watchlist is empty; nothing sent");
            return Ok(None);
        }

        let notifier = self.notifier.as_ref().ok_or_else(|| {
            BikeWatchError::InvalidArgument("no notifier configured (set a bot token)".into())
        })?;
        let recipient = self.config.recipient.ok_or_else(|| {
            BikeWatchError::InvalidArgument("no report recipient configured".into())
        })?;

        notifier.send(recipient, &text)?;
        Ok(Some(text))
    }

    /// Report text plus whether it is the empty-watchlist notice.
    ///
    /// Profiles without a year range are not reportable; a watchlist made up
    /// only of those is treated like an empty one.
    fn compose(&self) -> Result<(String, bool)> {
        let profiles = self.watchlist.list_profiles()?;
        if profiles.is_empty() {
            return Ok((report::EMPTY_WATCHLIST_NOTICE.to_string(), true));
        }

        let body = self.sweep(&profiles);
        if body.is_empty() {
            info!(profiles = profiles.len(), "no profile has a year range");
            return Ok((report::EMPTY_WATCHLIST_NOTICE.to_string(), true));
        }

        let header = report::report_header(&Utc::now());
        Ok((format!("{header}\n\n{body}"), false))
    }
}

impl fmt::Display for BikeWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BikeWatch(marketplace={}, recipient={}, notifier={})",
            self.config.marketplace_base,
            self.config
                .recipient
                .map(|r| r.to_string())
                .unwrap_or_else(|| "none".into()),
            self.notifier.is_some()
        )
    }
}

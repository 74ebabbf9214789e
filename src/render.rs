//! Page renderer capability.
//!
//! A [`Renderer`] hands out one [`RenderSession`] per fetch. Sessions are
//! stateful and expensive (for a headless browser, a whole browser process),
//! so the fetch orchestrator never shares them across profiles and always
//! closes them before moving on.

use std::time::Duration;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::config::{self, Config};
use crate::error::{BikeWatchError, Result};

/// Page content as the renderer saw it after navigation.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final URL after redirects.
    pub url: String,
    pub html: String,
}

/// Source of render sessions.
pub trait Renderer: Send + Sync {
    fn session(&self) -> Result<Box<dyn RenderSession>>;
}

/// One live renderer session, used for a single profile fetch.
pub trait RenderSession {
    /// Navigate to `url` and return the rendered document.
    fn open(&mut self, url: &str) -> Result<RenderedPage>;

    /// Text of every element that looks like it could hold a price.
    ///
    /// The default implementation applies
    /// [`PRICE_CANDIDATE_SELECTOR`](config::PRICE_CANDIDATE_SELECTOR) to the
    /// page HTML.
    fn find_text_candidates(&self, page: &RenderedPage) -> Result<Vec<String>> {
        price_candidates(&page.html)
    }

    /// Release the session. Called exactly once by the orchestrator.
    fn close(&mut self) {}
}

/// Trimmed, non-empty text of all nodes matching the price candidate selector.
pub fn price_candidates(html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(config::PRICE_CANDIDATE_SELECTOR)
        .map_err(|e| BikeWatchError::Render(format!("invalid candidate selector: {e}")))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

// ---------------------------------------------------------------------------
// HttpRenderer
// ---------------------------------------------------------------------------

/// Renderer that fetches server-rendered HTML over plain HTTP.
///
/// It does not run client-side scripts. Listings rendered only in the browser
/// need a headless-browser [`Renderer`] instead.
pub struct HttpRenderer {
    timeout: Duration,
    user_agent: String,
}

impl HttpRenderer {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        Self {
            timeout,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timeout, &config.user_agent)
    }
}

impl Renderer for HttpRenderer {
    fn session(&self) -> Result<Box<dyn RenderSession>> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Box::new(HttpSession {
            client: Some(client),
        }))
    }
}

struct HttpSession {
    client: Option<Client>,
}

impl RenderSession for HttpSession {
    fn open(&mut self, url: &str) -> Result<RenderedPage> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| BikeWatchError::Render("session already closed".into()))?;

        let resp = client.get(url).send()?.error_for_status()?;
        let final_url = resp.url().to_string();
        let html = resp.text()?;
        debug!(url = %final_url, bytes = html.len(), "page loaded");

        Ok(RenderedPage {
            url: final_url,
            html,
        })
    }

    fn close(&mut self) {
        self.client = None;
    }
}

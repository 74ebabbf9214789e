//! Report delivery.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config;
use crate::error::{BikeWatchError, Result};

/// Destination for a finished report. Retries and rate limits are the
/// channel's business.
pub trait Notifier: Send + Sync {
    fn send(&self, recipient: i64, text: &str) -> Result<()>;
}

/// Telegram Bot API `sendMessage` client.
pub struct TelegramNotifier {
    token: String,
    api_base: String,
    client: Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        Self::with_api_base(token, config::TELEGRAM_API_BASE, timeout)
    }

    /// Point at a different Bot API host, e.g. a local Bot API server.
    pub fn with_api_base(token: &str, api_base: &str, timeout: Duration) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(BikeWatchError::InvalidArgument(
                "Telegram bot token is empty".into(),
            ));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            token: token.trim().to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Notifier for TelegramNotifier {
    fn send(&self, recipient: i64, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let resp = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: recipient,
                text,
            })
            .send()?;

        let status = resp.status();
        let body: ApiResponse = resp.json().map_err(|e| {
            BikeWatchError::Notify(format!("unreadable Bot API response ({status}): {e}"))
        })?;
        if !status.is_success() || !body.ok {
            return Err(BikeWatchError::Notify(format!(
                "Bot API rejected message ({status}): {}",
                body.description.unwrap_or_default()
            )));
        }

        info!(recipient, chars = text.chars().count(), "report delivered");
        Ok(())
    }
}

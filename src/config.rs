use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{BikeWatchError, Result};

pub const MARKETPLACE_BASE: &str = "https://www.reitwagen.co.kr";
pub const USED_LISTINGS_PATH: &str = "/products/home/used";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Elements whose class hints at a price. Deliberately loose; the normalizer
/// and plausibility filter discard the false positives.
pub const PRICE_CANDIDATE_SELECTOR: &str = r#"div[class*="price"], span[class*="price"], strong, .price, [class*="amount"], [class*="currency"]"#;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DATA_FILE_NAME: &str = "bikes.json";

/// Display brand names as users type them, paired with the brand token the
/// marketplace search understands.
///
/// Order matters: a key that appears twice (ignoring case) keeps the later value.
pub fn brand_aliases() -> Vec<(&'static str, &'static str)> {
    vec![
        ("혼다", "Honda"),
        ("야마하", "Yamaha"),
        ("스즈키", "Suzuki"),
        ("가와사키", "Kawasaki"),
        ("할리데이비슨", "Harley-Davidson"),
        ("할리", "Harley-Davidson"),
        ("harley", "Harley-Davidson"),
        ("Harley", "Harley-Davidson"),
        ("비엠더블유", "BMW"),
        ("bmw", "BMW"),
        ("두카티", "Ducati"),
        ("트라이엄프", "Triumph"),
        ("케이티엠", "KTM"),
        ("ktm", "KTM"),
        ("베스파", "Vespa"),
        ("대림", "Daelim"),
        ("혼다", "Honda"),
        ("로얄엔필드", "Royal Enfield"),
        ("아프릴리아", "Aprilia"),
    ]
}

// ---------------------------------------------------------------------------
// BrandTable
// ---------------------------------------------------------------------------

/// Case-insensitive lookup from a user-entered brand to its canonical form.
#[derive(Debug, Clone, Default)]
pub struct BrandTable {
    entries: HashMap<String, String>,
}

impl BrandTable {
    /// Build a table from ordered `(alias, canonical)` pairs. Last writer wins.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut entries = HashMap::new();
        for (alias, canonical) in pairs {
            entries.insert(alias.as_ref().to_lowercase(), canonical.into());
        }
        Self { entries }
    }

    /// Canonical brand for `display`, or `display` unchanged when unmapped.
    pub fn resolve(&self, display: &str) -> String {
        let trimmed = display.trim();
        self.entries
            .get(&trimmed.to_lowercase())
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Everything a sweep needs, passed explicitly into [`crate::BikeWatch`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token. Delivery is disabled when absent.
    pub bot_token: Option<String>,
    /// Chat id that receives reports.
    pub recipient: Option<i64>,
    pub brands: BrandTable,
    pub marketplace_base: String,
    /// Inclusive bounds of the randomized wait after a page is opened.
    pub settle_delay: (Duration, Duration),
    pub timeout: Duration,
    pub user_agent: String,
    /// Deliver the "nothing tracked" notice instead of staying silent.
    pub notify_when_empty: bool,
    /// Location of the watchlist JSON file.
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            recipient: None,
            brands: BrandTable::new(brand_aliases()),
            marketplace_base: MARKETPLACE_BASE.to_string(),
            settle_delay: (Duration::from_secs(5), Duration::from_secs(8)),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            notify_when_empty: false,
            data_file: default_data_dir().join(DATA_FILE_NAME),
        }
    }
}

impl Config {
    /// Defaults overlaid with `BIKEWATCH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(token) = env::var("BIKEWATCH_BOT_TOKEN") {
            if !token.trim().is_empty() {
                config.bot_token = Some(token.trim().to_string());
            }
        }
        if let Ok(chat) = env::var("BIKEWATCH_CHAT_ID") {
            let id = chat.trim().parse::<i64>().map_err(|_| {
                BikeWatchError::InvalidArgument(format!("BIKEWATCH_CHAT_ID is not a chat id: {chat}"))
            })?;
            config.recipient = Some(id);
        }
        if let Ok(path) = env::var("BIKEWATCH_DATA_FILE") {
            config.data_file = PathBuf::from(path);
        }
        if let Ok(flag) = env::var("BIKEWATCH_NOTIFY_WHEN_EMPTY") {
            config.notify_when_empty = parse_flag(&flag)?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(BikeWatchError::InvalidArgument(format!(
            "expected a boolean flag, got '{other}'"
        ))),
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("bikewatch")
    } else {
        PathBuf::from(".bikewatch")
    }
}

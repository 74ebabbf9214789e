#[derive(Debug, thiserror::Error)]
pub enum BikeWatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BikeWatchError>;

/// A renderer or network failure while fetching one watchlist profile.
///
/// Raised only at the fetch boundary; the report loop treats it the same as
/// a profile with no listings.
#[derive(Debug, thiserror::Error)]
#[error("fetch failed for '{profile_key}': {source}")]
pub struct FetchError {
    pub profile_key: String,
    #[source]
    pub source: BikeWatchError,
}

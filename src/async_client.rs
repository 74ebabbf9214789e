//! Async wrapper around [`BikeWatch`] for use in async runtimes (Tokio, etc.).
//!
//! A sweep blocks for the whole watchlist: network, rendering and the
//! settle delay after each page. Running it through
//! [`tokio::task::spawn_blocking`] keeps a chat bot or scheduler responsive
//! while it runs.
//!
//! # Example
//!
//! ```no_run
//! use bikewatch::{AsyncBikeWatch, BikeWatch, Config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let watch = BikeWatch::builder()
//!         .config(Config::from_env().unwrap())
//!         .build()
//!         .unwrap();
//!     let watch = AsyncBikeWatch::new(watch);
//!
//!     let report = watch.report().await.unwrap();
//!     println!("{report}");
//! }
//! ```

use std::sync::Arc;

use crate::error::{BikeWatchError, Result};
use crate::BikeWatch;

/// Async handle to a shared [`BikeWatch`]. Cheap to clone.
#[derive(Clone)]
pub struct AsyncBikeWatch {
    inner: Arc<BikeWatch>,
}

impl AsyncBikeWatch {
    pub fn new(watch: BikeWatch) -> Self {
        Self {
            inner: Arc::new(watch),
        }
    }

    /// Run a blocking operation on the blocking thread pool.
    pub async fn run_blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&BikeWatch) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let watch = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&watch))
            .await
            .map_err(|e| BikeWatchError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Sweep the watchlist and return the report text.
    pub async fn report(&self) -> Result<String> {
        self.run_blocking(|w| w.report()).await
    }

    /// Sweep and deliver, see [`BikeWatch::run`].
    pub async fn run(&self) -> Result<Option<String>> {
        self.run_blocking(|w| w.run()).await
    }
}

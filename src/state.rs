//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed config and one pooled HTTP client for the API proxy.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, DEFAULT_UPSTREAM_TIMEOUT_SECS};

/// Clone is required by Axum; inner fields are Arc-wrapped or cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let timeout_secs = config
            .upstream
            .as_ref()
            .map_or(DEFAULT_UPSTREAM_TIMEOUT_SECS, |u| u.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}

//! Host configuration parsed from environment variables.

use client::util::config::{ClientScript, OidcSettings};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("invalid API_UPSTREAM_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
    #[error("invalid API_UPSTREAM_URL: {0}")]
    InvalidUpstreamUrl(String),
}

/// Where `/api/*` requests are forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// `None` disables the API proxy (requests answer 503).
    pub upstream: Option<UpstreamConfig>,
    /// `None` disables login in the client.
    pub oidc: Option<OidcSettings>,
    pub client_script: ClientScript,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_UPSTREAM_URL`: base URL of the admin API (proxy disabled when absent)
    /// - `API_UPSTREAM_TIMEOUT_SECS`: default 30
    /// - `OIDC_AUTHORITY`, `OIDC_CLIENT_ID`, `OIDC_REDIRECT_URI`: all three enable login
    /// - `OIDC_POST_LOGOUT_REDIRECT_URI`, `OIDC_SCOPE`
    /// - `OIDC_CLIENT_SCRIPT_URL`, `OIDC_CLIENT_SCRIPT_INTEGRITY`: bundle location and SRI hash
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("API_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let upstream = lookup("API_UPSTREAM_URL")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_upstream_url(&raw).map(|base_url| UpstreamConfig { base_url, timeout_secs }))
            .transpose()?;

        Ok(Self {
            port,
            upstream,
            oidc: OidcSettings::from_lookup(&lookup),
            client_script: ClientScript::from_lookup(&lookup),
        })
    }
}

fn parse_upstream_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::InvalidUpstreamUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUpstreamUrl(format!("{raw}: unsupported scheme")));
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

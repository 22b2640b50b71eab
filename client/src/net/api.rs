//! REST API helpers for the admin user listing.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Tests: in-memory `HttpTransport` implementations.
//!
//! ERROR HANDLING
//! ==============
//! `fetch_users` never fails past its boundary: transport errors, non-2xx
//! statuses and undecodable bodies all collapse into
//! `AdminFetchResult::Failure` with a message the view shows verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::UserRecord;

pub const ADMIN_USERS_ENDPOINT: &str = "/api/admin/users";

/// Failure message for any non-2xx response.
pub const NOT_OK_MESSAGE: &str = "Network response was not ok";

/// Outcome of one admin listing request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AdminFetchResult {
    #[default]
    Pending,
    Success(Vec<UserRecord>),
    Failure(String),
}

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP seam used by the fetcher.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Issue a GET with `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns the underlying error message when no response was received.
    async fn get_with_bearer(&self, url: &str, token: &str) -> Result<TransportResponse, String>;
}

#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Fetch the admin user listing with the given access token.
pub async fn fetch_users<T: HttpTransport>(transport: &T, access_token: &str) -> AdminFetchResult {
    let resp = match transport.get_with_bearer(ADMIN_USERS_ENDPOINT, access_token).await {
        Ok(resp) => resp,
        Err(e) => {
            log::warn!("admin user fetch failed: {e}");
            return AdminFetchResult::Failure(e);
        }
    };
    if !resp.is_success() {
        log::warn!("admin user fetch returned status {}", resp.status);
        return AdminFetchResult::Failure(NOT_OK_MESSAGE.to_owned());
    }
    match serde_json::from_str::<Vec<UserRecord>>(&resp.body) {
        Ok(records) => AdminFetchResult::Success(records),
        Err(e) => AdminFetchResult::Failure(e.to_string()),
    }
}

/// Browser transport backed by `fetch` through `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    async fn get_with_bearer(&self, url: &str, token: &str) -> Result<TransportResponse, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(url)
                .header("Authorization", &bearer_header(token))
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = resp.status();
            let body = if resp.ok() { resp.text().await.map_err(|e| e.to_string())? } else { String::new() };
            Ok(TransportResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, token);
            Err("not available on server".to_owned())
        }
    }
}

//! `/api/*` pass-through to the upstream admin API.
//!
//! Only the headers the client needs are forwarded (`Authorization`,
//! `Accept`). Upstream status, content type and body are returned as-is so
//! the client sees the same non-2xx responses it would see directly.

use axum::extract::{Path, RawQuery, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("API upstream not configured")]
    NotConfigured,
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        tracing::warn!(error = %self, "api proxy failure");
        (status, self.to_string()).into_response()
    }
}

/// Join the upstream base URL, the captured API path and the raw query.
#[must_use]
pub fn upstream_url(base_url: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/api/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// `GET /api/{*path}`: forward to `<API_UPSTREAM_URL>/api/{path}`.
pub async fn forward(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let upstream = state.config.upstream.as_ref().ok_or(ProxyError::NotConfigured)?;
    let url = upstream_url(&upstream.base_url, &path, query.as_deref());

    let mut request = state.http.get(&url);
    for name in [AUTHORIZATION, ACCEPT] {
        if let Some(value) = headers.get(&name).cloned() {
            request = request.header(name, value);
        }
    }

    let resp = request.send().await?;
    let status = resp.status();
    let content_type = resp.headers().get(CONTENT_TYPE).cloned();
    let body = resp.bytes().await?;
    tracing::debug!(%url, %status, bytes = body.len(), "api proxy response");

    let mut response = (status, body).into_response();
    if let Some(content_type) = content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

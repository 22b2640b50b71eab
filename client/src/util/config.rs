//! OIDC client settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host reads these from its environment and renders them into the SSR
//! shell as `<meta>` tags; the hydrated client reads them back from the
//! document. Both sides parse through `from_lookup` with the same keys.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const OIDC_AUTHORITY: &str = "OIDC_AUTHORITY";
pub const OIDC_CLIENT_ID: &str = "OIDC_CLIENT_ID";
pub const OIDC_REDIRECT_URI: &str = "OIDC_REDIRECT_URI";
pub const OIDC_POST_LOGOUT_REDIRECT_URI: &str = "OIDC_POST_LOGOUT_REDIRECT_URI";
pub const OIDC_SCOPE: &str = "OIDC_SCOPE";

pub const OIDC_CLIENT_SCRIPT_URL: &str = "OIDC_CLIENT_SCRIPT_URL";
pub const OIDC_CLIENT_SCRIPT_INTEGRITY: &str = "OIDC_CLIENT_SCRIPT_INTEGRITY";

pub const DEFAULT_SCOPE: &str = "openid profile";

/// Pinned browser bundle of `oidc-client-ts`; exposes the `oidc` global.
pub const DEFAULT_CLIENT_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/oidc-client-ts@3.1.0/dist/browser/oidc-client-ts.min.js";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OidcSettings {
    pub authority: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub post_logout_redirect_uri: Option<String>,
    pub scope: String,
}

impl OidcSettings {
    /// Build settings from a key lookup.
    ///
    /// Returns `None` if the authority, client id or redirect URI is missing
    /// or blank (login is disabled in that case).
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        Some(Self {
            authority: value(OIDC_AUTHORITY)?.trim_end_matches('/').to_owned(),
            client_id: value(OIDC_CLIENT_ID)?,
            redirect_uri: value(OIDC_REDIRECT_URI)?,
            post_logout_redirect_uri: value(OIDC_POST_LOGOUT_REDIRECT_URI),
            scope: value(OIDC_SCOPE).unwrap_or_else(|| DEFAULT_SCOPE.to_owned()),
        })
    }

    /// Key/value pairs rendered into the shell, in a stable order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            (OIDC_AUTHORITY, self.authority.clone()),
            (OIDC_CLIENT_ID, self.client_id.clone()),
            (OIDC_REDIRECT_URI, self.redirect_uri.clone()),
            (OIDC_SCOPE, self.scope.clone()),
        ];
        if let Some(uri) = &self.post_logout_redirect_uri {
            entries.push((OIDC_POST_LOGOUT_REDIRECT_URI, uri.clone()));
        }
        entries
    }

    /// Read settings from the `<meta>` tags of the current document.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_document() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Self::from_lookup(|key| {
            document
                .query_selector(&format!("meta[name=\"{key}\"]"))
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute("content"))
        })
    }
}

/// Where the shell loads the `oidc-client-ts` bundle from.
///
/// Deployments can self-host the bundle (for example under `/pkg`) or pin a
/// subresource integrity hash for the CDN copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientScript {
    pub src: String,
    pub integrity: Option<String>,
}

impl Default for ClientScript {
    fn default() -> Self {
        Self { src: DEFAULT_CLIENT_SCRIPT_URL.to_owned(), integrity: None }
    }
}

impl ClientScript {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        Self {
            src: value(OIDC_CLIENT_SCRIPT_URL).unwrap_or_else(|| DEFAULT_CLIENT_SCRIPT_URL.to_owned()),
            integrity: value(OIDC_CLIENT_SCRIPT_INTEGRITY),
        }
    }

    /// `crossorigin` value required for an integrity check on a CDN copy.
    #[must_use]
    pub fn crossorigin(&self) -> Option<&'static str> {
        self.integrity.as_ref().map(|_| "anonymous")
    }
}

//! Shared DTOs for the identity provider and admin API boundaries.
//!
//! DESIGN
//! ======
//! `User` is built from the provider's stored-user JSON rather than bound
//! field-by-field to JS objects, so claim parsing stays testable on native
//! targets. Role claims are read leniently: anything that is not an array of
//! strings under `realm_access.roles` counts as "no roles".

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signed-in identity derived from provider-issued claims.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    /// `preferred_username` claim; empty when the provider omits it.
    pub preferred_username: String,
    /// Bearer token presented to the admin API.
    pub access_token: String,
    /// Realm roles from `realm_access.roles`, in claim order.
    pub roles: Vec<String>,
    /// Access token expiry in seconds since the Unix epoch, if known.
    pub expires_at: Option<i64>,
    /// Provider-reported expiry flag at the time the user was loaded.
    pub expired: bool,
}

impl User {
    /// Whether the user carries `role` among their realm roles.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Roles joined for display, in claim order.
    #[must_use]
    pub fn roles_display(&self) -> String {
        self.roles.join(", ")
    }

    /// Name shown in greetings, `None` when the claim was missing or blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = self.preferred_username.trim();
        if name.is_empty() { None } else { Some(name) }
    }

    /// Parse the JSON produced by `oidc.User#toStorageString()`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the payload is not JSON or lacks an
    /// `access_token`.
    pub fn from_storage_json(raw: &str, expired: bool) -> Result<Self, String> {
        let stored: StoredUser = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        Ok(Self {
            preferred_username: stored
                .profile
                .get("preferred_username")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            access_token: stored.access_token,
            roles: realm_roles(&stored.profile),
            expires_at: stored.expires_at,
            expired,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StoredUser {
    access_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    profile: serde_json::Value,
}

/// Extract `realm_access.roles` from an ID token profile.
///
/// Missing or malformed collections yield no roles; non-string entries
/// are skipped and duplicates keep their first position.
#[must_use]
pub fn realm_roles(profile: &serde_json::Value) -> Vec<String> {
    profile
        .get("realm_access")
        .and_then(|access| access.get("roles"))
        .and_then(serde_json::Value::as_array)
        .map(|roles| {
            let mut names: Vec<String> = Vec::with_capacity(roles.len());
            for name in roles.iter().filter_map(serde_json::Value::as_str) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_owned());
                }
            }
            names
        })
        .unwrap_or_default()
}

/// Identifier of an admin API user record. The API is free to use numeric
/// or string ids; both render the same way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One row of `GET /api/admin/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

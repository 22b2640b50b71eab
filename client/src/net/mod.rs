//! Networking and identity-provider modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the admin REST call, `oidc` wraps the browser OIDC library,
//! and `types` defines the claim and payload schema shared by both.

pub mod api;
pub mod oidc;
pub mod types;

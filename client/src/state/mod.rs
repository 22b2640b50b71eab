//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern: `auth` holds the provider-owned session,
//! `admin` the admin page's fetch lifecycle.

pub mod admin;
pub mod auth;

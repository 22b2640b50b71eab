//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (gate decision, fetches) and
//! delegates rendering details to `components`.


pub mod admin;
pub mod callback;
pub mod home;
pub mod secure;

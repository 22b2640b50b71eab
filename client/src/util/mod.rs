//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep gating rules and configuration parsing free of view
//! code so they can be tested on native targets.

pub mod auth;
pub mod config;
pub mod gate;

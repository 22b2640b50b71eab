//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components receive the session through an `AuthHandle` prop rather than
//! looking it up from context.

pub mod nav_header;
pub mod route_gate;
pub mod user_table;

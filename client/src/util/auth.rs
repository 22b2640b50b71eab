//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gated routes apply identical redirect behavior: the login redirect fires
//! once when a route first lands on `NeedsLogin`, not on every session update
//! that keeps it there.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::state::auth::{AuthHandle, SessionCommand};
use crate::util::gate::{GateDecision, decide};

/// Reactive gate decision for a route.
pub fn gate_memo(auth: AuthHandle, required_role: Option<&'static str>) -> Memo<GateDecision> {
    Memo::new(move |_| auth.session.with(|session| decide(session, required_role)))
}

/// Command to run when the gate moves from `previous` to `next`.
///
/// Re-evaluating the same decision yields nothing, so a route that stays on
/// `NeedsLogin` redirects once.
#[must_use]
pub fn redirect_command(previous: Option<GateDecision>, next: GateDecision) -> Option<SessionCommand> {
    if previous == Some(next) {
        return None;
    }
    next.command()
}

/// Dispatch the decision's command whenever the decision changes.
pub fn install_gate_redirect(auth: AuthHandle, decision: Memo<GateDecision>) {
    Effect::new(move |previous: Option<GateDecision>| {
        let next = decision.get();
        if let Some(command) = redirect_command(previous, next) {
            auth.dispatch(command);
        }
        next
    });
}

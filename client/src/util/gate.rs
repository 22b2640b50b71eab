//! Route authorization gate.
//!
//! DESIGN
//! ======
//! `decide` is a pure function of the session and the route's required
//! role. The login redirect is not performed here: it is returned as a
//! `SessionCommand` for the caller to execute when the decision first lands
//! on `NeedsLogin`.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::state::auth::{Session, SessionCommand};

/// What a gated route should render for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Loading,
    NeedsLogin,
    Unauthorized,
    Authorized,
}

impl GateDecision {
    /// Side effect implied by this decision.
    #[must_use]
    pub fn command(self) -> Option<SessionCommand> {
        match self {
            Self::NeedsLogin => Some(SessionCommand::SigninRedirect),
            Self::Loading | Self::Unauthorized | Self::Authorized => None,
        }
    }
}

/// Map session state to a gate decision.
///
/// A session without a user counts as having no roles, so a role-gated route
/// resolves to `Unauthorized` instead of failing.
#[must_use]
pub fn decide(session: &Session, required_role: Option<&str>) -> GateDecision {
    if session.is_loading {
        return GateDecision::Loading;
    }
    if !session.is_authenticated {
        return GateDecision::NeedsLogin;
    }
    if let Some(role) = required_role {
        let granted = session.user.as_ref().is_some_and(|user| user.has_role(role));
        if !granted {
            return GateDecision::Unauthorized;
        }
    }
    GateDecision::Authorized
}

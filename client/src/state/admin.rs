//! Admin page fetch state.
//!
//! DESIGN
//! ======
//! One listing request is issued per distinct signed-in user while the page
//! is authorized. Each request carries a generation number; only a result
//! whose generation is still current is applied, so a slow request for a
//! replaced user (or an unmounted page) cannot overwrite newer state.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::net::api::AdminFetchResult;
use crate::net::types::{User, UserRecord};
use crate::state::auth::Session;
use crate::util::gate::GateDecision;

/// Permission to run one listing request and later apply its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub access_token: String,
}

#[derive(Clone, Debug, Default)]
pub struct AdminState {
    pub result: AdminFetchResult,
    fetched_for: Option<User>,
    generation: u64,
}

impl AdminState {
    /// Decide whether the current session warrants a new request.
    ///
    /// Returns a ticket only for an authorized decision with a user that
    /// differs from the one last fetched for; the result resets to
    /// `Pending` in that case.
    pub fn plan_fetch(&mut self, session: &Session, decision: GateDecision) -> Option<FetchTicket> {
        if decision != GateDecision::Authorized {
            return None;
        }
        let user = session.user.as_ref()?;
        if self.fetched_for.as_ref() == Some(user) {
            return None;
        }
        self.fetched_for = Some(user.clone());
        self.generation += 1;
        self.result = AdminFetchResult::Pending;
        Some(FetchTicket { generation: self.generation, access_token: user.access_token.clone() })
    }

    /// Store `result` if `ticket` is from the latest request.
    pub fn apply(&mut self, ticket: &FetchTicket, result: AdminFetchResult) -> bool {
        if ticket.generation != self.generation {
            log::debug!("dropping stale admin fetch result (generation {})", ticket.generation);
            return false;
        }
        self.result = result;
        true
    }

    /// Invalidate any in-flight request.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// What the admin route renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminView<'a> {
    Loading,
    Redirecting,
    NotAuthorized,
    Table {
        rows: &'a [UserRecord],
        pending: bool,
        error: Option<&'a str>,
    },
}

/// Pick the admin branch for a decision and fetch result.
#[must_use]
pub fn admin_view(decision: GateDecision, result: &AdminFetchResult) -> AdminView<'_> {
    match decision {
        GateDecision::Loading => AdminView::Loading,
        GateDecision::NeedsLogin => AdminView::Redirecting,
        GateDecision::Unauthorized => AdminView::NotAuthorized,
        GateDecision::Authorized => match result {
            AdminFetchResult::Pending => AdminView::Table { rows: &[], pending: true, error: None },
            AdminFetchResult::Success(rows) => AdminView::Table { rows, pending: false, error: None },
            AdminFetchResult::Failure(message) => AdminView::Table { rows: &[], pending: false, error: Some(message.as_str()) },
        },
    }
}

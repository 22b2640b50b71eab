use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::net::api::{HttpTransport, NOT_OK_MESSAGE, TransportResponse, fetch_users};
use crate::net::types::RecordId;
use crate::util::gate::decide;

const ADMIN: &str = "APPX-Admin";

// =============================================================
// Helpers
// =============================================================

fn user(token: &str, roles: &[&str]) -> User {
    User {
        preferred_username: "adminuser".to_owned(),
        access_token: token.to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        ..User::default()
    }
}

fn record(id: i64, name: &str) -> UserRecord {
    UserRecord { id: RecordId::Number(id), username: name.to_owned(), email: Some(format!("{name}@x.com")) }
}

struct CountingTransport {
    calls: Cell<usize>,
    status: u16,
    body: &'static str,
}

impl CountingTransport {
    fn new(status: u16, body: &'static str) -> Self {
        Self { calls: Cell::new(0), status, body }
    }
}

impl HttpTransport for CountingTransport {
    async fn get_with_bearer(&self, _url: &str, _token: &str) -> Result<TransportResponse, String> {
        self.calls.set(self.calls.get() + 1);
        Ok(TransportResponse { status: self.status, body: self.body.to_owned() })
    }
}

/// Drive the admin page through a sequence of session states the way the
/// page effect does: evaluate, plan, fetch, apply.
fn drive(states: &[Session], transport: &CountingTransport) -> (AdminState, GateDecision) {
    let mut admin = AdminState::default();
    let mut decision = GateDecision::Loading;
    for session in states {
        decision = decide(session, Some(ADMIN));
        if let Some(ticket) = admin.plan_fetch(session, decision) {
            let result = block_on(fetch_users(transport, &ticket.access_token));
            assert!(admin.apply(&ticket, result));
        }
    }
    (admin, decision)
}

// =============================================================
// plan_fetch
// =============================================================

#[test]
fn plans_once_per_distinct_user() {
    let mut admin = AdminState::default();
    let session = Session::signed_in(user("t1", &[ADMIN]));

    let ticket = admin.plan_fetch(&session, GateDecision::Authorized).unwrap();
    assert_eq!(ticket.access_token, "t1");
    assert_eq!(admin.plan_fetch(&session, GateDecision::Authorized), None);
    assert_eq!(admin.plan_fetch(&session.clone(), GateDecision::Authorized), None);
}

#[test]
fn declined_plan_leaves_loaded_rows_untouched() {
    let mut admin = AdminState::default();
    let session = Session::signed_in(user("t1", &[ADMIN]));
    let ticket = admin.plan_fetch(&session, GateDecision::Authorized).unwrap();
    admin.apply(&ticket, AdminFetchResult::Success(vec![record(1, "a")]));

    // Session churn for the same user must not disturb the table.
    assert_eq!(admin.plan_fetch(&session, GateDecision::Authorized), None);
    assert_eq!(admin.plan_fetch(&session, GateDecision::Loading), None);
    assert_eq!(admin.result, AdminFetchResult::Success(vec![record(1, "a")]));
}

#[test]
fn new_token_replans_and_resets_to_pending() {
    let mut admin = AdminState::default();
    let first = admin.plan_fetch(&Session::signed_in(user("t1", &[ADMIN])), GateDecision::Authorized).unwrap();
    admin.apply(&first, AdminFetchResult::Success(vec![record(1, "a")]));

    let second = admin.plan_fetch(&Session::signed_in(user("t2", &[ADMIN])), GateDecision::Authorized).unwrap();
    assert_eq!(second.access_token, "t2");
    assert!(second.generation > first.generation);
    assert_eq!(admin.result, AdminFetchResult::Pending);
}

#[test]
fn no_plan_without_authorization() {
    let mut admin = AdminState::default();
    let session = Session::signed_in(user("t1", &[]));
    for decision in [GateDecision::Loading, GateDecision::NeedsLogin, GateDecision::Unauthorized] {
        assert_eq!(admin.plan_fetch(&session, decision), None);
    }
}

#[test]
fn no_plan_without_user() {
    let mut admin = AdminState::default();
    let session = Session { is_loading: false, is_authenticated: true, user: None };
    assert_eq!(admin.plan_fetch(&session, GateDecision::Authorized), None);

    let ticket = admin.plan_fetch(&Session::signed_in(user("t1", &[ADMIN])), GateDecision::Authorized).unwrap();
    assert_eq!(ticket.generation, 1);
}

// =============================================================
// apply / cancel
// =============================================================

#[test]
fn stale_result_is_dropped() {
    let mut admin = AdminState::default();
    let old = admin.plan_fetch(&Session::signed_in(user("t1", &[ADMIN])), GateDecision::Authorized).unwrap();
    let new = admin.plan_fetch(&Session::signed_in(user("t2", &[ADMIN])), GateDecision::Authorized).unwrap();

    assert!(admin.apply(&new, AdminFetchResult::Success(vec![record(2, "new")])));
    assert!(!admin.apply(&old, AdminFetchResult::Success(vec![record(1, "old")])));
    assert_eq!(admin.result, AdminFetchResult::Success(vec![record(2, "new")]));
}

#[test]
fn cancel_discards_in_flight_result() {
    let mut admin = AdminState::default();
    let ticket = admin.plan_fetch(&Session::signed_in(user("t1", &[ADMIN])), GateDecision::Authorized).unwrap();
    admin.cancel();
    assert!(!admin.apply(&ticket, AdminFetchResult::Failure("late".to_owned())));
    assert_eq!(admin.result, AdminFetchResult::Pending);
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn loading_then_admin_fetches_once_and_renders_table() {
    let transport = CountingTransport::new(200, r#"[{"id":1,"username":"a","email":"a@x.com"}]"#);
    let admin_user = user("t1", &[ADMIN]);
    let states = [
        Session::loading(),
        Session::loading(),
        Session::signed_in(admin_user.clone()),
        Session::signed_in(admin_user),
    ];

    let (admin, decision) = drive(&states, &transport);

    assert_eq!(transport.calls.get(), 1);
    let expected = [record(1, "a")];
    assert_eq!(
        admin_view(decision, &admin.result),
        AdminView::Table { rows: &expected, pending: false, error: None }
    );
}

#[test]
fn user_without_role_sees_not_authorized_and_no_fetch() {
    let transport = CountingTransport::new(200, "[]");
    let states = [Session::loading(), Session::signed_in(user("t1", &[]))];

    let (admin, decision) = drive(&states, &transport);

    assert_eq!(transport.calls.get(), 0);
    assert_eq!(admin_view(decision, &admin.result), AdminView::NotAuthorized);
}

#[test]
fn relogin_fetches_again() {
    let transport = CountingTransport::new(200, "[]");
    let states = [
        Session::signed_in(user("t1", &[ADMIN])),
        Session::signed_out(),
        Session::signed_in(user("t2", &[ADMIN])),
    ];

    drive(&states, &transport);

    assert_eq!(transport.calls.get(), 2);
}

#[test]
fn failed_fetch_renders_inline_error() {
    let transport = CountingTransport::new(500, "");
    let (admin, decision) = drive(&[Session::signed_in(user("t1", &[ADMIN]))], &transport);

    assert_eq!(
        admin_view(decision, &admin.result),
        AdminView::Table { rows: &[], pending: false, error: Some(NOT_OK_MESSAGE) }
    );
}

// =============================================================
// admin_view
// =============================================================

#[test]
fn view_branches_follow_decision() {
    let result = AdminFetchResult::Pending;
    assert_eq!(admin_view(GateDecision::Loading, &result), AdminView::Loading);
    assert_eq!(admin_view(GateDecision::NeedsLogin, &result), AdminView::Redirecting);
    assert_eq!(admin_view(GateDecision::Unauthorized, &result), AdminView::NotAuthorized);
    assert_eq!(
        admin_view(GateDecision::Authorized, &result),
        AdminView::Table { rows: &[], pending: true, error: None }
    );
}

use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::net::types::RecordId;

// =============================================================
// Helpers
// =============================================================

struct MockTransport {
    reply: Result<TransportResponse, String>,
    calls: RefCell<Vec<(String, String)>>,
}

impl MockTransport {
    fn status(status: u16, body: &str) -> Self {
        Self { reply: Ok(TransportResponse { status, body: body.to_owned() }), calls: RefCell::default() }
    }

    fn broken(message: &str) -> Self {
        Self { reply: Err(message.to_owned()), calls: RefCell::default() }
    }
}

impl HttpTransport for MockTransport {
    async fn get_with_bearer(&self, url: &str, token: &str) -> Result<TransportResponse, String> {
        self.calls.borrow_mut().push((url.to_owned(), bearer_header(token)));
        self.reply.clone()
    }
}

// =============================================================
// fetch_users
// =============================================================

#[test]
fn success_parses_records() {
    let transport = MockTransport::status(200, r#"[{"id":1,"username":"a","email":"a@x.com"}]"#);
    let result = block_on(fetch_users(&transport, "tok"));
    assert_eq!(
        result,
        AdminFetchResult::Success(vec![UserRecord {
            id: RecordId::Number(1),
            username: "a".to_owned(),
            email: Some("a@x.com".to_owned()),
        }])
    );
}

#[test]
fn sends_one_bearer_request_to_admin_endpoint() {
    let transport = MockTransport::status(200, "[]");
    let result = block_on(fetch_users(&transport, "abc.def"));
    assert_eq!(result, AdminFetchResult::Success(Vec::new()));
    assert_eq!(
        *transport.calls.borrow(),
        vec![(ADMIN_USERS_ENDPOINT.to_owned(), "Bearer abc.def".to_owned())]
    );
}

#[test]
fn server_error_is_not_ok_failure() {
    let transport = MockTransport::status(500, "boom");
    let result = block_on(fetch_users(&transport, "tok"));
    assert_eq!(result, AdminFetchResult::Failure("Network response was not ok".to_owned()));
}

#[test]
fn client_errors_are_reported_the_same_way() {
    for status in [401, 403, 404] {
        let transport = MockTransport::status(status, "");
        let result = block_on(fetch_users(&transport, "tok"));
        assert_eq!(result, AdminFetchResult::Failure(NOT_OK_MESSAGE.to_owned()), "status {status}");
    }
}

#[test]
fn transport_error_message_is_surfaced() {
    let transport = MockTransport::broken("TypeError: Failed to fetch");
    let result = block_on(fetch_users(&transport, "tok"));
    assert_eq!(result, AdminFetchResult::Failure("TypeError: Failed to fetch".to_owned()));
}

#[test]
fn undecodable_body_is_a_failure() {
    let transport = MockTransport::status(200, "<html>login</html>");
    let result = block_on(fetch_users(&transport, "tok"));
    assert!(matches!(result, AdminFetchResult::Failure(ref msg) if !msg.is_empty()));
}

#[test]
fn non_array_body_is_a_failure() {
    let transport = MockTransport::status(200, r#"{"users":[]}"#);
    let result = block_on(fetch_users(&transport, "tok"));
    assert!(matches!(result, AdminFetchResult::Failure(_)));
}

// =============================================================
// TransportResponse
// =============================================================

#[test]
fn success_range_is_2xx() {
    let ok = |status| TransportResponse { status, body: String::new() }.is_success();
    assert!(ok(200));
    assert!(ok(204));
    assert!(ok(299));
    assert!(!ok(199));
    assert!(!ok(302));
    assert!(!ok(500));
}

#[test]
fn result_defaults_to_pending() {
    assert_eq!(AdminFetchResult::default(), AdminFetchResult::Pending);
}

//! Page available to any authenticated user.

use leptos::prelude::*;

use crate::components::route_gate::RouteGate;
use crate::state::auth::{AuthHandle, Session};
use crate::util::auth::gate_memo;

#[must_use]
pub fn roles_line(session: &Session) -> String {
    let (name, roles) = session
        .user
        .as_ref()
        .map(|u| (u.preferred_username.as_str(), u.roles_display()))
        .unwrap_or_default();
    format!("Welcome, {name}. You have the following roles: {roles}")
}

#[component]
pub fn SecurePage(auth: AuthHandle) -> impl IntoView {
    let decision = gate_memo(auth, None);

    view! {
        <RouteGate auth decision title="Secure Page">
            <div class="secure-page">
                <h1>"Secure Page"</h1>
                <p>{move || auth.session.with(roles_line)}</p>
            </div>
        </RouteGate>
    }
}

//! Admin page: user listing gated on the admin realm role.

use leptos::prelude::*;

use crate::components::route_gate::RouteGate;
use crate::components::user_table::UserTable;
use crate::net::api::{GlooTransport, fetch_users};
use crate::state::admin::{AdminState, AdminView, admin_view};
use crate::state::auth::{AuthHandle, Session};
use crate::util::auth::gate_memo;

/// Realm role required to open the admin page.
pub const ADMIN_ROLE: &str = "APPX-Admin";

#[must_use]
pub fn admin_greeting(session: &Session) -> String {
    format!("Welcome, Admin {}.", session.display_name().unwrap_or_default())
}

#[component]
pub fn AdminPage(auth: AuthHandle) -> impl IntoView {
    let decision = gate_memo(auth, Some(ADMIN_ROLE));
    let admin = RwSignal::new(AdminState::default());

    // One request per distinct authorized user; stale results are dropped
    // by generation.
    Effect::new(move || {
        let decision = decision.get();
        let ticket = auth
            .session
            .with(|session| admin.try_update_untracked(|state| state.plan_fetch(session, decision)))
            .flatten();
        let Some(ticket) = ticket else {
            return;
        };
        // The table only changes (back to pending) when a request is issued.
        admin.notify();
        leptos::task::spawn_local(async move {
            let result = fetch_users(&GlooTransport, &ticket.access_token).await;
            admin.try_update(|state| state.apply(&ticket, result));
        });
    });

    on_cleanup(move || {
        admin.try_update_untracked(AdminState::cancel);
    });

    let listing = move || {
        admin.with(|state| match admin_view(decision.get(), &state.result) {
            AdminView::Table { rows, pending, error } => {
                let error = error.map(|e| {
                    view! { <p class="admin-page__error">{format!("Error fetching users: {e}")}</p> }
                });
                view! {
                    {error}
                    <UserTable rows=rows.to_vec() pending/>
                }
                .into_any()
            }
            AdminView::Loading | AdminView::Redirecting | AdminView::NotAuthorized => ().into_any(),
        })
    };

    view! {
        <RouteGate auth decision title="Admin Page">
            <div class="admin-page">
                <h1>"Admin Page"</h1>
                <p>{move || auth.session.with(admin_greeting)}</p>
                <h2>"User List"</h2>
                {listing}
            </div>
        </RouteGate>
    }
}

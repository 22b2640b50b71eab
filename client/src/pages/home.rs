//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::{AuthHandle, Session};

#[must_use]
pub fn greeting(session: &Session) -> String {
    format!("Welcome, {}.", session.display_name().unwrap_or("guest"))
}

#[component]
pub fn HomePage(auth: AuthHandle) -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"Public Page"</h1>
            <p>{move || auth.session.with(greeting)}</p>
        </div>
    }
}

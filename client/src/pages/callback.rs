//! Sign-in callback landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{AuthHandle, Session, SessionCommand};

/// Where to go once the callback has settled, `None` while still loading.
#[must_use]
pub fn callback_destination(session: &Session) -> Option<&'static str> {
    if session.is_loading { None } else { Some("/") }
}

/// Completes the authorization response and returns to the home page.
#[component]
pub fn CallbackPage(auth: AuthHandle) -> impl IntoView {
    let navigate = use_navigate();

    Effect::new(move || auth.dispatch(SessionCommand::SigninCallback));

    Effect::new(move || {
        if let Some(path) = auth.session.with(callback_destination) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! { <div class="callback-page">"Loading..."</div> }
}

//! Navigation header shown on every route.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::{AuthHandle, SessionCommand};

/// Static route links plus a login/logout button for the current session.
#[component]
pub fn NavHeader(auth: AuthHandle) -> impl IntoView {
    let authenticated = move || auth.session.with(|s| s.is_authenticated);

    view! {
        <header class="nav-header">
            <nav class="nav-header__links">
                <A href="/">"Home"</A>
                " | "
                <A href="/secure">"Secure"</A>
                " | "
                <A href="/admin">"Admin"</A>
            </nav>
            <div class="nav-header__session">
                <Show
                    when=authenticated
                    fallback=move || {
                        view! {
                            <button on:click=move |_| auth.dispatch(SessionCommand::SigninRedirect)>
                                "Log in"
                            </button>
                        }
                    }
                >
                    <button on:click=move |_| auth.dispatch(SessionCommand::SignoutRedirect)>
                        "Log out"
                    </button>
                </Show>
            </div>
        </header>
    }
}

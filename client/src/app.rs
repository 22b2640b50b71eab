//! Root application component with routing and session wiring.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_header::NavHeader;
use crate::net::oidc::BrowserSessionProvider;
use crate::pages::{admin::AdminPage, callback::CallbackPage, home::HomePage, secure::SecurePage};
use crate::state::auth::{AuthHandle, Session};
use crate::util::config::{ClientScript, OidcSettings};

/// HTML shell rendered on the server for SSR + hydration.
///
/// OIDC settings are emitted as `<meta>` tags for the client to read on
/// startup; `script` locates the `oidc-client-ts` bundle.
pub fn shell(options: LeptosOptions, oidc: Option<OidcSettings>, script: ClientScript) -> impl IntoView {
    let crossorigin = script.crossorigin();
    let settings_meta = oidc
        .map(|settings| {
            settings
                .entries()
                .into_iter()
                .map(|(name, content)| view! { <meta name=name content=content/> })
                .collect_view()
        })
        .unwrap_or_default();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {settings_meta}
                <script src=script.src integrity=script.integrity crossorigin=crossorigin></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session signal and hands an `AuthHandle` to the header and each
/// route; the identity provider is started once the client hydrates.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::loading());
    let provider = BrowserSessionProvider::new(session);
    let auth = AuthHandle::new(session, provider);

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        provider.start(OidcSettings::from_document());
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/keygate.css"/>
        <Title text="Keygate"/>

        <Router>
            <NavHeader auth/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=move || view! { <HomePage auth/> }/>
                    <Route path=StaticSegment("secure") view=move || view! { <SecurePage auth/> }/>
                    <Route path=StaticSegment("admin") view=move || view! { <AdminPage auth/> }/>
                    <Route path=StaticSegment("callback") view=move || view! { <CallbackPage auth/> }/>
                </Routes>
            </main>
        </Router>
    }
}

//! Browser identity provider backed by `oidc-client-ts`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell loads the `oidc-client-ts` browser bundle, which exposes the
//! `oidc` global. This module binds its `UserManager`, translates its events
//! into `Session` updates and executes `SessionCommand`s against it. Token
//! exchange, storage and silent renew stay inside the library.
//!
//! Server-side (SSR) builds compile the provider as a no-op: the session
//! stays `Loading` until the client hydrates.

#[cfg(test)]
#[path = "oidc_test.rs"]
mod oidc_test;

use leptos::prelude::*;

use crate::state::auth::{Session, SessionProvider};
use crate::util::config::OidcSettings;

/// Whether a query string carries an authorization response
/// (`code` or `error`, together with `state`).
#[must_use]
pub fn has_auth_params(search: &str) -> bool {
    let mut has_state = false;
    let mut has_result = false;
    for pair in search.trim_start_matches('?').split('&') {
        let key = pair.split('=').next().unwrap_or_default();
        match key {
            "state" => has_state = true,
            "code" | "error" => has_result = true,
            _ => {}
        }
    }
    has_state && has_result
}

/// `oidc-client-ts` settings object for `settings`.
#[must_use]
pub fn user_manager_settings(settings: &OidcSettings) -> serde_json::Value {
    let mut value = serde_json::json!({
        "authority": settings.authority,
        "client_id": settings.client_id,
        "redirect_uri": settings.redirect_uri,
        "response_type": "code",
        "scope": settings.scope,
        "automaticSilentRenew": true,
    });
    if let Some(uri) = &settings.post_logout_redirect_uri {
        value["post_logout_redirect_uri"] = serde_json::Value::String(uri.clone());
    }
    value
}

/// Session provider for the browser.
///
/// The `UserManager` itself lives in a thread-local (JS handles are not
/// `Send`); this handle only carries the session signal it updates.
#[derive(Clone, Copy)]
pub struct BrowserSessionProvider {
    session: RwSignal<Session>,
}

impl BrowserSessionProvider {
    pub fn new(session: RwSignal<Session>) -> Self {
        Self { session }
    }

    /// Create the user manager, subscribe to its events and load the
    /// initial session (completing a pending sign-in callback if the URL
    /// carries one). With no settings, the session becomes signed out.
    pub fn start(&self, settings: Option<OidcSettings>) {
        #[cfg(feature = "hydrate")]
        let init = browser::start;
        #[cfg(not(feature = "hydrate"))]
        let init = |_: RwSignal<Session>, _: &OidcSettings| Ok::<(), String>(());
        self.start_with(settings, init);
    }

    /// `start` with the manager setup supplied by `init`.
    ///
    /// A setup error (for example the `oidc` global never loaded) signs the
    /// session out, so gated routes leave `Loading`.
    pub(crate) fn start_with<F>(&self, settings: Option<OidcSettings>, init: F)
    where
        F: FnOnce(RwSignal<Session>, &OidcSettings) -> Result<(), String>,
    {
        let Some(settings) = settings else {
            log::warn!("OIDC settings missing; login disabled");
            self.session.set(Session::signed_out());
            return;
        };
        if let Err(e) = init(self.session, &settings) {
            log::error!("identity provider unavailable: {e}");
            self.session.set(Session::signed_out());
        }
    }
}

impl SessionProvider for BrowserSessionProvider {
    fn signin_redirect(&self) {
        #[cfg(feature = "hydrate")]
        browser::signin_redirect();
    }

    fn signout_redirect(&self) {
        #[cfg(feature = "hydrate")]
        browser::signout_redirect();
    }

    fn signin_callback(&self) {
        #[cfg(feature = "hydrate")]
        browser::signin_callback(self.session);
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::{Cell, RefCell};

    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::{has_auth_params, user_manager_settings};
    use crate::net::types::User;
    use crate::state::auth::Session;
    use crate::util::config::OidcSettings;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = oidc)]
        #[derive(Clone)]
        type UserManager;

        #[wasm_bindgen(constructor, catch, js_namespace = oidc)]
        fn new(settings: &JsValue) -> Result<UserManager, JsValue>;

        #[wasm_bindgen(method, catch, js_name = getUser)]
        async fn get_user(this: &UserManager) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signinRedirect)]
        async fn signin_redirect(this: &UserManager) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signoutRedirect)]
        async fn signout_redirect(this: &UserManager) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(method, catch, js_name = signinCallback)]
        async fn signin_callback(this: &UserManager) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(method, getter)]
        fn events(this: &UserManager) -> UserManagerEvents;
    }

    #[wasm_bindgen]
    extern "C" {
        type UserManagerEvents;

        #[wasm_bindgen(method, js_name = addUserLoaded)]
        fn add_user_loaded(this: &UserManagerEvents, cb: &Closure<dyn FnMut(JsValue)>);

        #[wasm_bindgen(method, js_name = addUserUnloaded)]
        fn add_user_unloaded(this: &UserManagerEvents, cb: &Closure<dyn FnMut()>);

        #[wasm_bindgen(method, js_name = addAccessTokenExpired)]
        fn add_access_token_expired(this: &UserManagerEvents, cb: &Closure<dyn FnMut()>);

        type OidcUser;

        #[wasm_bindgen(method, js_name = toStorageString)]
        fn to_storage_string(this: &OidcUser) -> String;

        #[wasm_bindgen(method, getter)]
        fn expired(this: &OidcUser) -> Option<bool>;
    }

    thread_local! {
        static MANAGER: RefCell<Option<UserManager>> = const { RefCell::new(None) };
        static CALLBACK_STARTED: Cell<bool> = const { Cell::new(false) };
    }

    fn manager() -> Option<UserManager> {
        let manager = MANAGER.with(|m| m.borrow().clone());
        if manager.is_none() {
            log::warn!("identity provider not configured");
        }
        manager
    }

    fn js_error(err: &JsValue) -> String {
        err.as_string()
            .or_else(|| js_sys::Reflect::get(err, &JsValue::from_str("message")).ok()?.as_string())
            .unwrap_or_else(|| format!("{err:?}"))
    }

    fn to_user(value: &JsValue) -> Option<User> {
        if value.is_null() || value.is_undefined() {
            return None;
        }
        let user: &OidcUser = value.unchecked_ref();
        match User::from_storage_json(&user.to_storage_string(), user.expired().unwrap_or(false)) {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("unreadable OIDC user: {e}");
                None
            }
        }
    }

    fn session_for(value: &JsValue) -> Session {
        to_user(value).map_or_else(Session::signed_out, Session::from_user)
    }

    fn location_search() -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    /// Drop the authorization response from the address bar.
    fn strip_auth_params() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let path = window.location().pathname().unwrap_or_else(|_| "/".to_owned());
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
        }
    }

    pub(super) fn start(session: RwSignal<Session>, settings: &OidcSettings) -> Result<(), String> {
        let config = js_sys::JSON::parse(&user_manager_settings(settings).to_string())
            .map_err(|e| format!("invalid OIDC settings: {}", js_error(&e)))?;
        let manager = UserManager::new(&config).map_err(|e| format!("cannot create UserManager: {}", js_error(&e)))?;

        let events = manager.events();
        let on_loaded = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            session.set(session_for(&user));
        });
        let on_unloaded = Closure::<dyn FnMut()>::new(move || session.set(Session::signed_out()));
        let on_expired = Closure::<dyn FnMut()>::new(move || {
            log::info!("access token expired");
            session.update(|s| {
                *s = match s.user.take() {
                    Some(user) => Session::expired(user),
                    None => Session::signed_out(),
                };
            });
        });
        events.add_user_loaded(&on_loaded);
        events.add_user_unloaded(&on_unloaded);
        events.add_access_token_expired(&on_expired);
        // Listeners live as long as the page.
        on_loaded.forget();
        on_unloaded.forget();
        on_expired.forget();

        MANAGER.with(|m| *m.borrow_mut() = Some(manager.clone()));

        if has_auth_params(&location_search()) {
            signin_callback(session);
            return Ok(());
        }
        leptos::task::spawn_local(async move {
            match manager.get_user().await {
                Ok(user) => session.set(session_for(&user)),
                Err(e) => {
                    log::error!("failed to load OIDC user: {}", js_error(&e));
                    session.set(Session::signed_out());
                }
            }
        });
        Ok(())
    }

    pub(super) fn signin_redirect() {
        let Some(manager) = manager() else {
            return;
        };
        leptos::task::spawn_local(async move {
            if let Err(e) = manager.signin_redirect().await {
                log::error!("signin redirect failed: {}", js_error(&e));
            }
        });
    }

    pub(super) fn signout_redirect() {
        let Some(manager) = manager() else {
            return;
        };
        leptos::task::spawn_local(async move {
            if let Err(e) = manager.signout_redirect().await {
                log::error!("signout redirect failed: {}", js_error(&e));
            }
        });
    }

    /// Complete the authorization response; runs at most once per page load.
    pub(super) fn signin_callback(session: RwSignal<Session>) {
        // Before `start` the URL still carries the response; `start` completes it.
        let Some(manager) = MANAGER.with(|m| m.borrow().clone()) else {
            return;
        };
        if CALLBACK_STARTED.with(|started| started.replace(true)) {
            return;
        }
        leptos::task::spawn_local(async move {
            match manager.signin_callback().await {
                Ok(user) => session.set(session_for(&user)),
                Err(e) => {
                    log::error!("signin callback failed: {}", js_error(&e));
                    session.set(Session::signed_out());
                }
            }
            strip_auth_params();
        });
    }
}

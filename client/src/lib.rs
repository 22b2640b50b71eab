//! # client
//!
//! Leptos + WASM frontend for the keygate portal: a public page, an
//! authenticated page and an admin page gated on the `APPX-Admin` realm role.
//!
//! Identity is delegated to an OpenID Connect provider through the
//! `oidc-client-ts` browser library (`net::oidc`). Route gating lives in
//! `util::gate`, the admin user listing in `net::api` + `state::admin`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs browser logging and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

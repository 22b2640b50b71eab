//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the API pass-through and health check, then stitches them with
//! Leptos SSR rendering and the hydration assets under a single Axum router.

pub mod proxy;

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by the SSR app; tested without Leptos.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/{*path}", get(proxy::forward))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Request spans for every route of the assembled app.
pub fn traced(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http())
}

/// API routes + Leptos SSR + `/pkg` hydration assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (malformed
/// `LEPTOS_*` environment, which cargo-leptos derives from the root
/// `[[workspace.metadata.leptos]]` block).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);
    let oidc = state.config.oidc.clone();
    let script = state.config.client_script.clone();

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone(), oidc.clone(), script.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(traced(
        api_routes(state)
            .merge(leptos_router)
            .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))),
    ))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

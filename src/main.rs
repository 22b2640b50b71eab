mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    if config.oidc.is_none() {
        tracing::warn!("OIDC_AUTHORITY / OIDC_CLIENT_ID / OIDC_REDIRECT_URI not set; login disabled");
    }
    match &config.upstream {
        Some(upstream) => tracing::info!(base_url = %upstream.base_url, "api proxy enabled"),
        None => tracing::warn!("API_UPSTREAM_URL not set; /api requests will fail"),
    }

    let port = config.port;
    let state = state::AppState::new(config).expect("http client init failed");
    let app = routes::leptos_app(state).expect("leptos app init failed");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "keygate listening");
    axum::serve(listener, app).await.expect("server failed");
}

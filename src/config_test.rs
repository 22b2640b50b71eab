use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let map: HashMap<&str, &str> = pairs.iter().copied().collect();
    AppConfig::from_lookup(|key| map.get(key).map(|v| (*v).to_owned()))
}

#[test]
fn defaults_with_empty_environment() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream, None);
    assert_eq!(cfg.oidc, None);
}

#[test]
fn parses_upstream_and_port_overrides() {
    let cfg = config_from(&[
        ("PORT", "8081"),
        ("API_UPSTREAM_URL", "http://localhost:8082/"),
        ("API_UPSTREAM_TIMEOUT_SECS", "5"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8081);
    assert_eq!(
        cfg.upstream,
        Some(UpstreamConfig { base_url: "http://localhost:8082".to_owned(), timeout_secs: 5 })
    );
}

#[test]
fn upstream_uses_default_timeout() {
    let cfg = config_from(&[("API_UPSTREAM_URL", "https://api.example.com")]).unwrap();
    assert_eq!(cfg.upstream.unwrap().timeout_secs, DEFAULT_UPSTREAM_TIMEOUT_SECS);
}

#[test]
fn blank_upstream_disables_proxy() {
    let cfg = config_from(&[("API_UPSTREAM_URL", "  ")]).unwrap();
    assert_eq!(cfg.upstream, None);
}

#[test]
fn parses_oidc_settings() {
    let cfg = config_from(&[
        ("OIDC_AUTHORITY", "http://localhost:8080/realms/appx"),
        ("OIDC_CLIENT_ID", "appx-frontend"),
        ("OIDC_REDIRECT_URI", "http://localhost:3000/callback"),
    ])
    .unwrap();
    let oidc = cfg.oidc.unwrap();
    assert_eq!(oidc.client_id, "appx-frontend");
    assert_eq!(oidc.scope, "openid profile");
}

#[test]
fn client_script_defaults_and_overrides() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.client_script, ClientScript::default());

    let cfg = config_from(&[
        ("OIDC_CLIENT_SCRIPT_URL", "/pkg/oidc-client-ts.min.js"),
        ("OIDC_CLIENT_SCRIPT_INTEGRITY", "sha384-abc"),
    ])
    .unwrap();
    assert_eq!(cfg.client_script.src, "/pkg/oidc-client-ts.min.js");
    assert_eq!(cfg.client_script.integrity.as_deref(), Some("sha384-abc"));
}

#[test]
fn invalid_port_is_rejected() {
    assert_eq!(config_from(&[("PORT", "http")]), Err(ConfigError::InvalidPort("http".to_owned())));
    assert_eq!(config_from(&[("PORT", "70000")]), Err(ConfigError::InvalidPort("70000".to_owned())));
}

#[test]
fn invalid_timeout_is_rejected() {
    assert_eq!(
        config_from(&[("API_UPSTREAM_TIMEOUT_SECS", "0")]),
        Err(ConfigError::InvalidTimeout("0".to_owned()))
    );
    assert_eq!(
        config_from(&[("API_UPSTREAM_TIMEOUT_SECS", "soon")]),
        Err(ConfigError::InvalidTimeout("soon".to_owned()))
    );
}

#[test]
fn invalid_upstream_url_is_rejected() {
    assert!(matches!(
        config_from(&[("API_UPSTREAM_URL", "not a url")]),
        Err(ConfigError::InvalidUpstreamUrl(_))
    ));
    assert!(matches!(
        config_from(&[("API_UPSTREAM_URL", "ftp://files.example.com")]),
        Err(ConfigError::InvalidUpstreamUrl(_))
    ));
}

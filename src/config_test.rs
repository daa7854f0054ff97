use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<&'static str> {
    let map: HashMap<&'static str, &'static str> = pairs.iter().copied().collect();
    move |key| map.get(key).copied()
}

#[test]
fn empty_lookup_yields_defaults() {
    let config = ClientConfig::from_lookup(|_| None).unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.resend_cooldown_secs, 60);
    assert_eq!(config.post_auth_path, "/role-select");
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let config = ClientConfig::from_lookup(lookup_from(&[("MARKETPLACE_API_BASE_URL", "https://api.example.com/v1/")]))
        .unwrap();
    assert_eq!(config.api_base_url, "https://api.example.com/v1");
}

#[test]
fn numeric_overrides_are_parsed() {
    let config = ClientConfig::from_lookup(lookup_from(&[
        ("MARKETPLACE_REQUEST_TIMEOUT_SECS", "30"),
        ("MARKETPLACE_RESEND_COOLDOWN_SECS", " 45 "),
    ]))
    .unwrap();
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.resend_cooldown_secs, 45);
}

#[test]
fn zero_or_garbage_numbers_are_rejected() {
    let err = ClientConfig::from_lookup(lookup_from(&[("MARKETPLACE_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidNumber { key: "MARKETPLACE_REQUEST_TIMEOUT_SECS", value: "0".to_owned() }
    );
    assert!(ClientConfig::from_lookup(lookup_from(&[("MARKETPLACE_RESEND_COOLDOWN_SECS", "soon")])).is_err());
}

#[test]
fn post_auth_path_must_be_absolute() {
    let err = ClientConfig::from_lookup(lookup_from(&[("MARKETPLACE_POST_AUTH_PATH", "home")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPath { .. }));

    let config = ClientConfig::from_lookup(lookup_from(&[("MARKETPLACE_POST_AUTH_PATH", "/home")])).unwrap();
    assert_eq!(config.post_auth_path, "/home");
}

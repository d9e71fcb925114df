use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_match_portal_behaviour() {
    let cfg = PortalConfig::default();
    assert_eq!(cfg.default_route, Route::Home);
    assert_eq!(cfg.login_route, Route::Login);
    assert_eq!(cfg.post_login_route, Route::Dashboard);
    assert_eq!(cfg.history_capacity, 50);
    assert_eq!(cfg.transition_delay_ms, 10);
    assert_eq!(cfg.max_redirects, 1);
    assert!(cfg.users_file.is_none());
}

#[test]
fn env_overrides_layer_over_defaults() {
    let ov = PortalOverrides::from_lookup(lookup_from(&[
        (ENV_HISTORY_CAPACITY, "20"),
        (ENV_MAX_REDIRECTS, "3"),
        (ENV_USERS_FILE, "/tmp/users.json"),
        (ENV_RNG_SEED, "42"),
    ]));
    let cfg = PortalConfig::from_layers(&PortalConfig::default(), &ov);
    assert_eq!(cfg.history_capacity, 20);
    assert_eq!(cfg.max_redirects, 3);
    assert_eq!(cfg.users_file.as_deref(), Some(std::path::Path::new("/tmp/users.json")));
    assert_eq!(cfg.rng_seed, Some(42));
    // untouched values inherit
    assert_eq!(cfg.login_redirect_delay_ms, 1_000);
}

#[test]
fn invalid_values_are_ignored() {
    let ov = PortalOverrides::from_lookup(lookup_from(&[
        (ENV_HISTORY_CAPACITY, "lots"),
        (ENV_TRANSITION_DELAY_MS, "-5"),
        (ENV_USERS_FILE, "  "),
    ]));
    assert_eq!(ov, PortalOverrides::default());
}

#[test]
fn zero_history_capacity_is_rejected() {
    let ov = PortalOverrides { history_capacity: Some(0), ..Default::default() };
    let cfg = PortalConfig::from_layers(&PortalConfig::default(), &ov);
    assert_eq!(cfg.history_capacity, 50);
}

#[test]
fn config_deserializes_with_partial_fields() {
    let cfg: PortalConfig = serde_json::from_str(r#"{"history_capacity": 10, "default_route": "home"}"#).unwrap();
    assert_eq!(cfg.history_capacity, 10);
    assert_eq!(cfg.signup_redirect_delay_ms, 2_000);
}

#[test]
fn zero_max_redirects_is_rejected() {
    let ov = PortalOverrides::from_lookup(lookup_from(&[(ENV_MAX_REDIRECTS, "0")]));
    assert_eq!(ov.max_redirects, Some(0));
    let cfg = PortalConfig::from_layers(&PortalConfig::default(), &ov);
    assert_eq!(cfg.max_redirects, 1);
}

#[test]
fn file_layer_sits_under_env_overrides() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("portal.json");
    std::fs::write(&path, r#"{"history_capacity": 12, "max_redirects": 0, "rng_seed": 3}"#).unwrap();

    let file = PortalConfig::from_file(&path).unwrap();
    assert_eq!(file.history_capacity, 12);
    assert_eq!(file.max_redirects, 1);
    assert_eq!(file.transition_delay_ms, 10);

    let ov = PortalOverrides::from_lookup(lookup_from(&[(ENV_HISTORY_CAPACITY, "30")]));
    let cfg = PortalConfig::from_layers(&file, &ov);
    assert_eq!(cfg.history_capacity, 30);
    assert_eq!(cfg.rng_seed, Some(3));
}

#[test]
fn unreadable_config_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = PortalConfig::from_file(tmp.path().join("absent.json")).unwrap_err();
    assert!(missing.to_string().contains("reading config file"));

    let path = tmp.path().join("bad.json");
    std::fs::write(&path, "[1, 2").unwrap();
    let bad = PortalConfig::load(Some(path.as_path())).unwrap_err();
    assert!(bad.to_string().contains("parsing config file"));
}

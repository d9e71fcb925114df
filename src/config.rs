use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::router::Route;

/// Portal settings. Everything has a working default; see `PortalOverrides` for layering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// Route an empty or unknown navigation address resolves to.
    pub default_route: Route,
    /// Route a protected request without a session is sent to.
    pub login_route: Route,
    /// Route the portal navigates to after a successful login.
    pub post_login_route: Route,

    /// Delay between marking a view visible and applying its active flag.
    pub transition_delay_ms: u64,
    /// Delay before navigating after a successful login.
    pub login_redirect_delay_ms: u64,
    /// Follow-up re-route after the post-login navigation fires.
    pub login_reroute_delay_ms: u64,
    /// Delay before navigating home after a successful registration.
    pub signup_redirect_delay_ms: u64,

    /// Retention count of the sensor history log (newest first).
    pub history_capacity: usize,
    /// Forced redirects allowed in one routing pass before it stops. At least 1.
    pub max_redirects: u32,

    /// Durable credential registry. None keeps users in memory only.
    pub users_file: Option<PathBuf>,
    /// Seed for the sensor / employee-id generator. None seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            default_route: Route::Home,
            login_route: Route::Login,
            post_login_route: Route::Dashboard,

            transition_delay_ms: 10,
            login_redirect_delay_ms: 1_000,
            login_reroute_delay_ms: 100,
            signup_redirect_delay_ms: 2_000,

            history_capacity: 50,
            max_redirects: 1,

            users_file: None,
            rng_seed: None,
        }
    }
}

/// Partial settings; unspecified values inherit from the base config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PortalOverrides {
    pub transition_delay_ms: Option<u64>,
    pub login_redirect_delay_ms: Option<u64>,
    pub signup_redirect_delay_ms: Option<u64>,
    pub history_capacity: Option<usize>,
    pub max_redirects: Option<u32>,
    pub users_file: Option<PathBuf>,
    pub rng_seed: Option<u64>,
}

pub const ENV_USERS_FILE: &str = "RSMS_USERS_FILE";
pub const ENV_HISTORY_CAPACITY: &str = "RSMS_HISTORY_CAPACITY";
pub const ENV_TRANSITION_DELAY_MS: &str = "RSMS_TRANSITION_DELAY_MS";
pub const ENV_LOGIN_REDIRECT_DELAY_MS: &str = "RSMS_LOGIN_REDIRECT_DELAY_MS";
pub const ENV_SIGNUP_REDIRECT_DELAY_MS: &str = "RSMS_SIGNUP_REDIRECT_DELAY_MS";
pub const ENV_MAX_REDIRECTS: &str = "RSMS_MAX_REDIRECTS";
pub const ENV_RNG_SEED: &str = "RSMS_RNG_SEED";

fn parse_var<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(target: "rsms::config", "ignoring {}='{}': not a valid value", key, raw);
            None
        }
    }
}

impl PortalOverrides {
    /// Read overrides through an arbitrary key lookup (the process env in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            transition_delay_ms: parse_var(ENV_TRANSITION_DELAY_MS, lookup(ENV_TRANSITION_DELAY_MS)),
            login_redirect_delay_ms: parse_var(ENV_LOGIN_REDIRECT_DELAY_MS, lookup(ENV_LOGIN_REDIRECT_DELAY_MS)),
            signup_redirect_delay_ms: parse_var(ENV_SIGNUP_REDIRECT_DELAY_MS, lookup(ENV_SIGNUP_REDIRECT_DELAY_MS)),
            history_capacity: parse_var(ENV_HISTORY_CAPACITY, lookup(ENV_HISTORY_CAPACITY)),
            max_redirects: parse_var(ENV_MAX_REDIRECTS, lookup(ENV_MAX_REDIRECTS)),
            users_file: lookup(ENV_USERS_FILE).filter(|s| !s.trim().is_empty()).map(PathBuf::from),
            rng_seed: parse_var(ENV_RNG_SEED, lookup(ENV_RNG_SEED)),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }
}

impl PortalConfig {
    /// Build an effective config from a base plus overrides.
    pub fn from_layers(base: &PortalConfig, ov: &PortalOverrides) -> Self {
        let mut cfg = base.clone();
        if let Some(v) = ov.transition_delay_ms { cfg.transition_delay_ms = v; }
        if let Some(v) = ov.login_redirect_delay_ms { cfg.login_redirect_delay_ms = v; }
        if let Some(v) = ov.signup_redirect_delay_ms { cfg.signup_redirect_delay_ms = v; }
        // A zero-capacity log would silently drop every event
        if let Some(v) = ov.history_capacity.filter(|v| *v > 0) { cfg.history_capacity = v; }
        // The first redirect (to login or home) must always be followed
        if let Some(v) = ov.max_redirects.filter(|v| *v > 0) { cfg.max_redirects = v; }
        if ov.users_file.is_some() { cfg.users_file = ov.users_file.clone(); }
        if ov.rng_seed.is_some() { cfg.rng_seed = ov.rng_seed; }
        cfg
    }

    /// Defaults overlaid with `RSMS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_layers(&PortalConfig::default(), &PortalOverrides::from_env())
    }

    /// JSON settings file; missing fields keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut cfg: PortalConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        if cfg.history_capacity == 0 {
            warn!(target: "rsms::config", "history_capacity 0 in {} ignored", path.display());
            cfg.history_capacity = PortalConfig::default().history_capacity;
        }
        if cfg.max_redirects == 0 {
            warn!(target: "rsms::config", "max_redirects 0 in {} ignored", path.display());
            cfg.max_redirects = 1;
        }
        Ok(cfg)
    }

    /// Full layering: defaults, then the optional settings file, then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(p) => Self::from_file(p)?,
            None => PortalConfig::default(),
        };
        Ok(Self::from_layers(&base, &PortalOverrides::from_env()))
    }
}

#[cfg(test)]
mod config_tests;

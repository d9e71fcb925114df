//! Tracing subscriber setup. Filter comes from `RUST_LOG`, falling back to `info`.

use tracing_subscriber::{fmt, EnvFilter};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global fmt subscriber. Returns an error if one is already installed.
pub fn try_init() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(filter())
        .try_init()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

/// Install the global fmt subscriber, ignoring a subscriber installed earlier.
pub fn init() {
    let _ = try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        init();
        assert!(try_init().is_err());
    }
}

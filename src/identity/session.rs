use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::tprintln;

use super::Identity;

/// The current authenticated identity of the tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
}

fn gen_id() -> String {
    // 128-bit random id base64url without padding
    let mut buf = [0u8; 16];
    if let Err(e) = getrandom::getrandom(&mut buf) {
        warn!(target: "rsms::identity", "session id entropy unavailable: {}", e);
    }
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Single owner of the tab session. Clones share the same slot.
///
/// Nothing is persisted: a new store starts without a session, so every load
/// requires a fresh login.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self) -> Option<Session> {
        self.slot.read().clone()
    }

    pub fn is_active(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Install a session for `identity`, replacing any previous one.
    pub fn set(&self, identity: Identity) -> Session {
        let sess = Session { session_id: gen_id(), identity, issued_at: Utc::now() };
        let prev = self.slot.write().replace(sess.clone());
        info!(
            target: "rsms::identity",
            "session.set email={} role={} replaced={}",
            sess.identity.email, sess.identity.role, prev.is_some()
        );
        tprintln!("session.set sid={}", sess.session_id);
        sess
    }

    /// Drop the session. Returns whether one was present.
    pub fn clear(&self) -> bool {
        let prev = self.slot.write().take();
        if let Some(p) = &prev {
            info!(target: "rsms::identity", "session.clear email={}", p.identity.email);
        }
        prev.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;

    #[test]
    fn starts_empty() {
        let store = SessionStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_active());
    }

    #[test]
    fn set_overwrites_and_clones_share_state() {
        let store = SessionStore::new();
        let view = store.clone();
        let first = store.set(Identity::new("Ann", "a@x.com", Role::GovernmentOfficer));
        let second = store.set(Identity::new("Bob", "b@x.com", Role::RailwayOfficer));
        assert_ne!(first.session_id, second.session_id);
        let cur = view.get().unwrap();
        assert_eq!(cur.identity.email, "b@x.com");
        assert_eq!(cur.identity.role, Role::RailwayOfficer);
    }

    #[test]
    fn session_ids_are_random_url_safe() {
        let id = gen_id();
        assert_eq!(id.len(), 22);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // all-zero bytes encode to this
        assert_ne!(id, "AAAAAAAAAAAAAAAAAAAAAA");
        assert_ne!(id, gen_id());
    }

    #[test]
    fn clear_is_unconditional() {
        let store = SessionStore::new();
        assert!(!store.clear());
        store.set(Identity::new("Ann", "a@x.com", Role::GovernmentOfficer));
        assert!(store.clear());
        assert!(store.get().is_none());
    }
}

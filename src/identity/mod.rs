//! Identities, the per-tab session store and the durable credential registry.
//! The router only ever reads the session store; the auth forms are its only writers.

mod role;
mod principal;
mod session;
mod provider;
mod error;

pub use role::{Role, BadgeColor};
pub use principal::Identity;
pub use session::{Session, SessionStore};
pub use provider::{CredentialStore, LocalCredentialStore, Registration, normalize_email};
pub use error::AuthError;

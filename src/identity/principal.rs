use serde::{Deserialize, Serialize};

use super::Role;

/// Authenticated identity carried by a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), email: email.into(), role }
    }

    /// Upper-cased first letter of the name, used by the profile avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next().and_then(|c| c.to_uppercase().next())
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::security::{hash_password, verify_password};

use super::{AuthError, Identity, Role};

/// Sign-up request as submitted by the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Durable registry of identities, consulted only by the auth forms.
pub trait CredentialStore: Send + Sync {
    fn register(&self, req: &Registration) -> Result<Identity, AuthError>;
    fn authenticate(&self, email: &str, password: &str, role: Role) -> Result<Identity, AuthError>;
}

/// Emails are matched trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// On-disk row. The role stays a string so a bad value is caught at login, not at load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    name: String,
    email: String,
    password_hash: String,
    role: String,
}

fn read_users(path: &Path) -> Result<Vec<UserRecord>> {
    if !path.exists() { return Ok(Vec::new()); }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading users file {}", path.display()))?;
    if text.trim().is_empty() { return Ok(Vec::new()); }
    let users = serde_json::from_str(&text)
        .with_context(|| format!("parsing users file {}", path.display()))?;
    Ok(users)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_users(path: &Path, users: &[UserRecord]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    let text = serde_json::to_string_pretty(users)?;
    // Write beside the target and rename over it so a crash never leaves a half-written file
    let tmp = staging_path(path);
    std::fs::write(&tmp, text).with_context(|| format!("writing users file {}", tmp.display()))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("replacing users file {}", path.display()));
    }
    Ok(())
}

/// Credential store backed by a JSON file, or by memory alone.
pub struct LocalCredentialStore {
    path: Option<PathBuf>,
    users: RwLock<Vec<UserRecord>>,
}

impl LocalCredentialStore {
    pub fn in_memory() -> Self {
        Self { path: None, users: RwLock::new(Vec::new()) }
    }

    /// Load (or start) the registry at `path`; writes go back to the same file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let users = read_users(&path)?;
        info!(target: "rsms::identity", "credential store opened path={} users={}", path.display(), users.len());
        Ok(Self { path: Some(path), users: RwLock::new(users) })
    }

    pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

    pub fn len(&self) -> usize { self.users.read().len() }

    pub fn is_empty(&self) -> bool { self.users.read().is_empty() }

    pub fn contains(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.users.read().iter().any(|u| u.email == email)
    }
}

impl CredentialStore for LocalCredentialStore {
    fn register(&self, req: &Registration) -> Result<Identity, AuthError> {
        let email = normalize_email(&req.email);
        let name = req.name.trim().to_string();
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == email) {
            debug!(target: "rsms::identity", "register rejected: duplicate email={}", email);
            return Err(AuthError::AlreadyRegistered);
        }
        let record = UserRecord {
            name: name.clone(),
            email: email.clone(),
            password_hash: hash_password(&req.password)?,
            role: req.role.as_str().to_string(),
        };
        users.push(record);
        if let Some(path) = &self.path {
            if let Err(e) = write_users(path, &users) {
                users.pop();
                warn!(target: "rsms::identity", "register rolled back: {}", e);
                return Err(AuthError::Storage(e));
            }
        }
        info!(target: "rsms::identity", "registered email={} role={}", email, req.role);
        Ok(Identity { name, email, role: req.role })
    }

    fn authenticate(&self, email: &str, password: &str, role: Role) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        let users = self.users.read();
        let Some(user) = users.iter().find(|u| u.email == email && verify_password(&u.password_hash, password)) else {
            debug!(target: "rsms::identity", "authenticate failed: invalid credentials email={}", email);
            return Err(AuthError::InvalidCredentials);
        };
        let registered: Role = match user.role.parse() {
            Ok(r) => r,
            Err(_) => {
                warn!(target: "rsms::identity", "stored role '{}' for email={} is not recognised", user.role, email);
                return Err(AuthError::UnknownRole(user.role.clone()));
            }
        };
        if registered != role {
            debug!(target: "rsms::identity", "authenticate failed: role mismatch email={} selected={} registered={}", email, role, registered);
            return Err(AuthError::RoleMismatch { registered });
        }
        Ok(Identity { name: user.name.clone(), email: user.email.clone(), role: registered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(email: &str, role: Role) -> Registration {
        Registration { name: " Ann ".into(), email: email.into(), password: "pw1".into(), role }
    }

    #[test]
    fn register_normalizes_and_rejects_duplicates() {
        let store = LocalCredentialStore::in_memory();
        let id = store.register(&reg("  A@X.com ", Role::GovernmentOfficer)).unwrap();
        assert_eq!(id.email, "a@x.com");
        assert_eq!(id.name, "Ann");
        assert!(store.contains("a@x.com"));
        let dup = store.register(&reg("a@x.com", Role::RailwayOfficer));
        assert!(matches!(dup, Err(AuthError::AlreadyRegistered)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn authenticate_checks_password_then_role() {
        let store = LocalCredentialStore::in_memory();
        store.register(&reg("a@x.com", Role::RailwayOfficer)).unwrap();

        let bad = store.authenticate("a@x.com", "nope", Role::RailwayOfficer);
        assert!(matches!(bad, Err(AuthError::InvalidCredentials)));

        let unknown = store.authenticate("b@x.com", "pw1", Role::RailwayOfficer);
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

        let wrong_role = store.authenticate("a@x.com", "pw1", Role::GovernmentOfficer);
        assert!(matches!(wrong_role, Err(AuthError::RoleMismatch { registered: Role::RailwayOfficer })));

        let ok = store.authenticate(" A@x.COM", "pw1", Role::RailwayOfficer).unwrap();
        assert_eq!(ok.role, Role::RailwayOfficer);
    }

    #[test]
    fn corrupted_stored_role_is_an_integrity_error() {
        let store = LocalCredentialStore::in_memory();
        store.register(&reg("a@x.com", Role::RailwayOfficer)).unwrap();
        store.users.write()[0].role = "Station Master".into();
        let res = store.authenticate("a@x.com", "pw1", Role::RailwayOfficer);
        assert!(matches!(res, Err(AuthError::UnknownRole(r)) if r == "Station Master"));
    }
}

use thiserror::Error;

use super::Role;

/// Failures of the registration and login flows. Display text is the inline form message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please select a role to proceed.")]
    RoleRequired,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("This email is already registered. Please login.")]
    AlreadyRegistered,
    #[error("Invalid credentials. Please try again or Sign Up first.")]
    InvalidCredentials,
    #[error("This email is registered as a {registered}. Please select the correct role.")]
    RoleMismatch { registered: Role },
    /// Stored or submitted role outside the two known values.
    #[error("Account role '{0}' is not a recognised role.")]
    UnknownRole(String),
    #[error("credential store failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::RoleRequired => "role_required",
            AuthError::PasswordMismatch => "password_mismatch",
            AuthError::AlreadyRegistered => "already_registered",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::RoleMismatch { .. } => "role_mismatch",
            AuthError::UnknownRole(_) => "unknown_role",
            AuthError::Storage(_) => "storage_error",
        }
    }
}

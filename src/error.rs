//! Unified portal error model.
//! Routing never fails; these errors only surface from the authentication forms
//! and the credential store, where they become inline messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::identity::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    Conflict { code: String, message: String },
    Auth { code: String, message: String },
    Integrity { code: String, message: String },
    Storage { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Integrity { code, .. }
            | AppError::Storage { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Integrity { message, .. }
            | AppError::Storage { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn integrity<S: Into<String>>(code: S, msg: S) -> Self { AppError::Integrity { code: code.into(), message: msg.into() } }
    pub fn storage<S: Into<String>>(code: S, msg: S) -> Self { AppError::Storage { code: code.into(), message: msg.into() } }

    /// True for errors caused by what the user typed or picked, as opposed to store faults.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::UserInput { .. } | AppError::Conflict { .. } | AppError::Auth { .. })
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::storage("storage_error".to_string(), err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code().to_string();
        let message = err.to_string();
        match err {
            AuthError::RoleRequired | AuthError::PasswordMismatch => AppError::user(code, message),
            AuthError::AlreadyRegistered => AppError::conflict(code, message),
            AuthError::InvalidCredentials | AuthError::RoleMismatch { .. } => AppError::auth(code, message),
            AuthError::UnknownRole(_) => AppError::integrity(code, message),
            AuthError::Storage(_) => AppError::storage(code, message),
        }
    }
}

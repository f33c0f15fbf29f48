//! Unified application error model and mapping helpers.
//! `AppError` is what crosses a surface boundary (login form, signup form, shell, REPL);
//! `AuthError` covers surface-local validation that never reaches the session store.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    Auth { code: String, message: String },
    NotAuthenticated { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Config { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::Auth { code, .. }
            | AppError::NotAuthenticated { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Config { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::Auth { message, .. }
            | AppError::NotAuthenticated { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Config { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn not_authenticated<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotAuthenticated { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn config<S: Into<String>>(code: S, msg: S) -> Self { AppError::Config { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map to the toast a surface shows for this failure.
    /// Only surface-local validation gets a specific description; everything else is generic.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::UserInput { message, .. } => Notice::error(message.clone()),
            AppError::Auth { code, message } if code == "password_mismatch" => Notice::error(message.clone()),
            AppError::Auth { .. } => Notice::error("Invalid credentials. Please try again."),
            AppError::NotAuthenticated { .. } => Notice::error("Please log in to continue."),
            AppError::NotFound { .. } | AppError::Conflict { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                Notice::error("Something went wrong. Please try again.")
            }
        }
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
        // Provider failures arrive as anyhow; a typed AuthError inside keeps its kind
        match err.downcast::<AuthError>() {
            Ok(auth) => auth.into(),
            Err(other) => AppError::Internal { code: "internal".into(), message: other.to_string() },
        }
    }
}

/// Validation and credential failures raised by calling surfaces or by a verifying provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,
    #[error("an account for '{0}' already exists")]
    AlreadyExists(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::PasswordMismatch => "password_mismatch",
            AuthError::UnknownRole(_) => "unknown_role",
            AuthError::MissingField(_) => "missing_field",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::AlreadyExists(_) => "already_exists",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            AuthError::UnknownRole(_) | AuthError::MissingField(_) => AppError::UserInput { code: code.into(), message },
            AuthError::AlreadyExists(_) => AppError::Conflict { code: code.into(), message },
            AuthError::PasswordMismatch | AuthError::InvalidCredentials => AppError::Auth { code: code.into(), message },
        }
    }
}

/// A transient message shown by a surface after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

impl Notice {
    pub fn success<T: Into<String>, D: Into<String>>(title: T, description: D) -> Self {
        Self { title: title.into(), description: description.into(), destructive: false }
    }

    pub fn error<D: Into<String>>(description: D) -> Self {
        Self { title: "Error".into(), description: description.into(), destructive: true }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_maps_to_app_error_kinds() {
        assert!(matches!(AppError::from(AuthError::PasswordMismatch), AppError::Auth { .. }));
        assert!(matches!(AppError::from(AuthError::UnknownRole("guest".into())), AppError::UserInput { .. }));
        assert!(matches!(AppError::from(AuthError::MissingField("email")), AppError::UserInput { .. }));
        assert!(matches!(AppError::from(AuthError::AlreadyExists("a@b.c".into())), AppError::Conflict { .. }));
        assert_eq!(AppError::from(AuthError::InvalidCredentials).code_str(), "invalid_credentials");
    }

    #[test]
    fn notice_mapping() {
        let n = AppError::from(AuthError::PasswordMismatch).notice();
        assert_eq!(n.title, "Error");
        assert_eq!(n.description, "Passwords do not match.");
        assert!(n.destructive);

        let n = AppError::from(AuthError::InvalidCredentials).notice();
        assert_eq!(n.description, "Invalid credentials. Please try again.");

        let n = AppError::internal("internal", "boom").notice();
        assert_eq!(n.description, "Something went wrong. Please try again.");
    }

    #[test]
    fn anyhow_keeps_auth_kind() {
        let e: AppError = anyhow::Error::new(AuthError::InvalidCredentials).into();
        assert_eq!(e.code_str(), "invalid_credentials");
        let e: AppError = anyhow::anyhow!("disk on fire").into();
        assert!(matches!(e, AppError::Internal { .. }));
        assert_eq!(e.to_string(), "internal: disk on fire");
    }

    #[test]
    fn serde_tagging() {
        let v = serde_json::to_value(AppError::user("unknown_role", "unknown role 'x'")).unwrap();
        assert_eq!(v["type"], "user_input");
        assert_eq!(v["code"], "unknown_role");
    }
}

//! Sign-in and user creation errors.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from [`super::AuthService`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email of a new user is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] wayfarer_core::EmailError),

    /// Unknown email or wrong password. Sign-in never says which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A user with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Argon2 could not hash the password.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether the failure is ours rather than the caller's.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::PasswordHash)
    }
}

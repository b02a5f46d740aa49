//! Handler error type.
//!
//! Every handler returns [`Result`]. Server-side failures are reported to
//! Sentry and logged; the client only ever sees a status code and a short
//! message that reveals nothing about the cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::mail::MailError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Contact inquiry could not be delivered.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing page or record; the payload names it for the logs.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_))
            | Self::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::InvalidEmail(_) | AuthError::PasswordTooShort { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Mail(MailError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Mail(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_)
            | Self::Session(_)
            | Self::Internal(_)
            | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error is a server-side fault worth reporting.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Database(err) => {
                matches!(err, RepositoryError::Database(_) | RepositoryError::DataCorruption(_))
            }
            Self::Auth(err) => err.is_internal(),
            Self::Mail(_) | Self::Session(_) | Self::Internal(_) => true,
            Self::NotFound(_) => false,
        }
    }

    /// Message safe to show the client.
    fn client_message(&self) -> String {
        match self {
            Self::NotFound(_) | Self::Database(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_owned(),
            Self::Auth(AuthError::UserAlreadyExists) => {
                "An account with this email already exists".to_owned()
            }
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_owned(),
            Self::Auth(err @ AuthError::PasswordTooShort { .. }) => err.to_string(),
            Self::Mail(MailError::NotConfigured) => "Contact form is unavailable".to_owned(),
            Self::Mail(_) => "Could not send your message, please try again later".to_owned(),
            _ => "Internal server error".to_owned(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_reportable() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (self.status(), self.client_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the signed-in user to Sentry events from this scope.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Stop attaching a user to Sentry events (sign-out).
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_resource_only_in_logs() {
        let err = AppError::NotFound("package cruises/caribbean".to_string());
        assert_eq!(err.to_string(), "Not found: package cruises/caribbean");
        assert_eq!(err.client_message(), "Not found");
        assert!(!err.is_reportable());
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (AppError::Internal("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Database(RepositoryError::NotFound), StatusCode::NOT_FOUND),
            (
                AppError::Database(RepositoryError::Conflict("taken".to_string())),
                StatusCode::CONFLICT,
            ),
            (AppError::Auth(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (
                AppError::Auth(AuthError::PasswordTooShort { min: 8 }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Mail(MailError::NotConfigured), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = AppError::Internal("pool timed out after 10s".to_string());
        assert!(err.is_reportable());
        assert_eq!(err.client_message(), "Internal server error");
    }
}

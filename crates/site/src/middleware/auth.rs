//! Authentication extractor.
//!
//! The access gate decides whether a request may reach a handler; this
//! extractor hands the signed-in identity to handlers that display or audit it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::gate::{SIGN_IN_PATH, matches_prefix};
use crate::models::{SessionToken, session_keys};

/// Signed-in identity. Anonymous requests are redirected to sign-in, or
/// get a bare 401 under `/api`.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAuth(token): RequireAuth) -> impl IntoResponse {
///     format!("Signed in as {}", token.email)
/// }
/// ```
pub struct RequireAuth(pub SessionToken);

/// Rejection for a request without a session token.
#[derive(Debug)]
pub enum AuthRejection {
    RedirectToSignIn,
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to(SIGN_IN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Token stored at sign-in, if the session carries one.
async fn session_token(parts: &Parts) -> Option<SessionToken> {
    let session = parts.extensions.get::<Session>()?;
    match session.get(session_keys::SESSION_TOKEN).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session token");
            None
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match session_token(parts).await {
            Some(token) => Ok(Self(token)),
            None if matches_prefix(parts.uri.path(), "/api") => Err(AuthRejection::Unauthorized),
            None => Err(AuthRejection::RedirectToSignIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn html_rejection_redirects_to_sign_in() {
        let response = AuthRejection::RedirectToSignIn.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], SIGN_IN_PATH);
    }

    #[test]
    fn api_rejection_is_unauthorized() {
        let response = AuthRejection::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Axum entry point for the access gate.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::{debug, warn};

use super::{Access, AccessGate, GateDecision, classify};
use crate::models::{SessionToken, session_keys};
use crate::state::AppState;

/// Gate every request before it reaches a handler.
///
/// Must run inside the session layer. Public paths skip the session read.
pub async fn gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if classify(&path) == Access::Public {
        return next.run(request).await;
    }

    let token = match request.extensions().get::<Session>() {
        Some(session) => session
            .get::<SessionToken>(session_keys::SESSION_TOKEN)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to read session token");
                None
            }),
        None => None,
    };

    match AccessGate::evaluate(&path, token.as_ref(), state.settings()).await {
        GateDecision::Continue => next.run(request).await,
        GateDecision::Redirect(target) => {
            let location = target.location();
            debug!(path = %path, location = %location, "Access gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

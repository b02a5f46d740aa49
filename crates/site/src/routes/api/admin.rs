//! Back-office administration endpoints (ADMIN only).

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::db::{ArticleRepository, PackageTypeRepository, SettingsRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Category, PackageType, SiteSettings, User};
use crate::state::AppState;

/// Body of `PUT /api/settings/status`.
#[derive(Debug, Deserialize)]
pub struct ActivationUpdate {
    pub active: bool,
}

/// `GET /api/users`
#[instrument(skip(state))]
pub async fn users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(UserRepository::new(state.pool()).list().await?))
}

/// `GET /api/package-types`
#[instrument(skip(state))]
pub async fn package_types(State(state): State<AppState>) -> Result<Json<Vec<PackageType>>> {
    Ok(Json(PackageTypeRepository::new(state.pool()).list().await?))
}

/// `GET /api/categories`
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(ArticleRepository::new(state.pool()).categories().await?))
}

/// `GET /api/settings` - the settings row, SMTP password omitted.
///
/// # Errors
///
/// Returns 404 if no settings row exists yet.
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    SettingsRepository::new(state.pool())
        .get()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("site settings".to_string()))
}

/// `PUT /api/settings/status` - activate or deactivate the public site.
#[instrument(skip(state, token), fields(user_id = %token.subject))]
pub async fn set_site_status(
    State(state): State<AppState>,
    RequireAuth(token): RequireAuth,
    Json(update): Json<ActivationUpdate>,
) -> Result<StatusCode> {
    SettingsRepository::new(state.pool())
        .set_status(update.active)
        .await?;
    state.settings().invalidate().await;

    info!(active = update.active, "Site activation changed");
    Ok(StatusCode::NO_CONTENT)
}

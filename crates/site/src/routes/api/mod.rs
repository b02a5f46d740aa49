//! JSON API.
//!
//! Access is enforced by the gate: `/api/public`, `/api/contact` and
//! `/api/site-config` are open to everyone, the admin endpoints need the
//! ADMIN role and everything else needs ADMIN or EDITOR.

pub mod admin;
pub mod catalog;
pub mod contact;
pub mod public;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::middleware::{api_rate_limiter, contact_rate_limiter};
use crate::state::AppState;

/// Create the API router, nested under `/api`.
pub fn router() -> Router<AppState> {
    let contact = Router::new()
        .route("/contact", post(contact::submit))
        .layer(contact_rate_limiter());

    let public = Router::new()
        .route("/site-config", get(public::site_config))
        .route("/public/packages", get(public::packages))
        .layer(api_rate_limiter());

    Router::new()
        .merge(contact)
        .merge(public)
        // Editor
        .route("/packages", get(catalog::packages))
        .route("/packages/{id}/status", patch(catalog::update_package_status))
        .route("/articles", get(catalog::articles))
        // Admin
        .route("/users", get(admin::users))
        .route("/package-types", get(admin::package_types))
        .route("/categories", get(admin::categories))
        .route("/settings", get(admin::settings))
        .route("/settings/status", put(admin::set_site_status))
}

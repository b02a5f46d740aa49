//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::gate::MAINTENANCE_PATH;
use crate::routes::layout::PageLayout;
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub layout: PageLayout,
}

/// Maintenance page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/maintenance.html")]
pub struct MaintenanceTemplate {
    pub layout: PageLayout,
}

/// Display the About page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let layout = PageLayout::build(&state, "/about", Some("About us".to_string()), None).await?;
    Ok(AboutTemplate { layout })
}

/// Display the maintenance page with `503 Service Unavailable`.
#[instrument(skip(state))]
pub async fn maintenance(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let layout = PageLayout::build(
        &state,
        MAINTENANCE_PATH,
        Some("Under maintenance".to_string()),
        None,
    )
    .await?;

    Ok((StatusCode::SERVICE_UNAVAILABLE, MaintenanceTemplate { layout }))
}

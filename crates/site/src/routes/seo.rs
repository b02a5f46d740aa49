//! Crawler endpoints: `sitemap.xml` and `robots.txt`.

use axum::{
    extract::State,
    http::header::{CONTENT_TYPE, HeaderValue},
    response::IntoResponse,
};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::seo::sitemap;
use crate::state::AppState;

/// `GET /sitemap.xml`
#[instrument(skip(state))]
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let entries = sitemap::collect_entries(state.pool()).await?;
    debug!(urls = entries.len(), "Rendering sitemap");

    Ok((
        [(
            CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=utf-8"),
        )],
        sitemap::render(&state.config().base_url, &entries),
    ))
}

/// `GET /robots.txt`
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        sitemap::robots_txt(&state.config().base_url),
    )
}

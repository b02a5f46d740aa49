//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (hero slides, featured packages)
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (database)
//! GET  /robots.txt               - Crawler rules
//! GET  /sitemap.xml              - Sitemap
//!
//! # Catalog
//! GET  /packages                 - Package types with their packages
//! GET  /packages/{type}          - Packages of a type
//! GET  /packages/{type}/{slug}   - Package detail (301 for legacy slugs)
//!
//! # Content
//! GET  /blog                     - Published articles
//! GET  /blog/{slug}              - Article
//! GET  /about                    - About page
//! GET  /maintenance              - Maintenance page (503)
//!
//! # Auth
//! GET  /auth/signin              - Sign-in page
//! POST /auth/signin              - Sign-in action
//! POST /auth/signout             - Sign-out action
//!
//! # Back office
//! GET  /admin                    - Dashboard
//!
//! # JSON API
//! GET  /api/site-config          - Public branding
//! GET  /api/public/packages      - Active packages
//! POST /api/contact              - Contact inquiry (rate limited)
//! GET  /api/packages             - All packages (editor)
//! PATCH /api/packages/{id}/status - Change package status (editor)
//! GET  /api/articles             - All articles (editor)
//! GET  /api/users                - Users (admin)
//! GET  /api/package-types        - Package types (admin)
//! GET  /api/categories           - Article categories (admin)
//! GET  /api/settings             - Site settings (admin)
//! PUT  /api/settings/status      - Activate/deactivate the site (admin)
//! ```

pub mod admin;
pub mod api;
pub mod auth;
pub mod blog;
pub mod health;
pub mod home;
pub mod layout;
pub mod packages;
pub mod pages;
pub mod seo;

use axum::{Router, middleware::from_fn, middleware::from_fn_with_state, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::gate::gate_middleware;
use crate::middleware::{
    SiteSessionLayer, auth_rate_limiter, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/site/static";

/// Create all page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/maintenance", get(pages::maintenance))
        .route("/admin", get(admin::dashboard))
        .route("/sitemap.xml", get(seo::sitemap_xml))
        .route("/robots.txt", get(seo::robots_txt))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/packages", packages::router())
        .nest("/blog", blog::router())
        .nest("/auth", auth::router().layer(auth_rate_limiter()))
        .nest("/api", api::router())
}

/// Assemble the full application: routes, static files, the access gate and
/// the middleware stack.
///
/// The gate runs inside the session layer so it can read the session token.
pub fn app(state: AppState, session_layer: SiteSessionLayer) -> Router {
    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn_with_state(state.clone(), gate_middleware))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header::LOCATION},
    };
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{SentryConfig, SiteConfig};
    use crate::middleware::create_session_layer;

    /// App over a pool that never connects. Only requests the gate rejects
    /// before touching the database are safe to send.
    fn test_app() -> Router {
        let config = SiteConfig {
            database_url: SecretString::from("postgres://wayfarer@localhost:1/wayfarer"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("k".repeat(64)),
            settings_cache_ttl: Duration::ZERO,
            sentry: SentryConfig::default(),
        };
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgres://wayfarer@localhost:1/wayfarer")
            .unwrap();
        let session_layer = create_session_layer(&pool, &config).unwrap();
        app(AppState::new(config, pool), session_layer)
    }

    async fn get(uri: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn anonymous_admin_request_redirects_to_sign_in() {
        let response = get("/admin/packages").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[LOCATION],
            "/auth/signin?next=%2Fadmin%2Fpackages"
        );
    }

    #[tokio::test]
    async fn anonymous_api_request_redirects_to_sign_in() {
        let response = get("/api/settings").await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[LOCATION],
            "/auth/signin?next=%2Fapi%2Fsettings"
        );
    }

    #[tokio::test]
    async fn liveness_is_public() {
        let response = get("/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn robots_txt_needs_no_database() {
        let response = get("/robots.txt").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Sitemap: http://localhost:3000/sitemap.xml"));
    }
}

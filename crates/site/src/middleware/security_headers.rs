//! Security and caching headers on every response.
//!
//! The header set is fixed except for `Cache-Control`, which depends on what
//! was requested: fingerprinted assets are immutable, back-office and API
//! responses are never stored, and public pages must be revalidated because
//! the access gate can start redirecting them at any time.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, header::CACHE_CONTROL},
    middleware::Next,
    response::Response,
};

use crate::gate::matches_prefix;

/// Package and slide images are external URLs, hence `img-src https:`.
/// JSON-LD blocks are data and are not subject to `script-src`.
const CONTENT_SECURITY: &str = "default-src 'none'; \
     script-src 'self'; \
     style-src 'self'; \
     font-src 'self'; \
     img-src 'self' https:; \
     connect-src 'self'; \
     frame-src 'none'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'; \
     upgrade-insecure-requests";

const PERMISSIONS: &str = "camera=(), \
     display-capture=(), \
     geolocation=(), \
     microphone=(), \
     payment=(), \
     usb=(), \
     browsing-topics=(), \
     interest-cohort=()";

/// Headers that never vary.
const FIXED_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", CONTENT_SECURITY),
    ("permissions-policy", PERMISSIONS),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    // External image hosts rarely send CORP headers
    ("cross-origin-embedder-policy", "credentialless"),
];

/// Paths whose responses are per-user and must never be stored.
const PRIVATE_PREFIXES: &[&str] = &["/admin", "/api", "/auth"];

/// `Cache-Control` value for a request path.
#[must_use]
pub fn cache_policy(path: &str) -> &'static str {
    if path.starts_with("/static/") && path.contains("/derived/") {
        "public, max-age=31536000, immutable"
    } else if path.starts_with("/static/") {
        "public, max-age=3600"
    } else if PRIVATE_PREFIXES
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        "no-store"
    } else {
        "no-cache"
    }
}

/// Add the security headers and a path-dependent `Cache-Control`.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let cache = cache_policy(request.uri().path());
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for &(name, value) in FIXED_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    // Handlers may choose something stricter
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{
            Request,
            header::{CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        },
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn every_response_carries_the_headers() {
        let app = Router::new()
            .route("/packages", get(|| async { "ok" }))
            .layer(middleware::from_fn(security_headers_middleware));

        let response = app
            .oneshot(Request::builder().uri("/packages").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[CACHE_CONTROL], "no-cache");
        let csp = headers[CONTENT_SECURITY_POLICY].to_str().unwrap();
        assert!(csp.contains("img-src 'self' https:;"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn cache_policy_by_path() {
        assert_eq!(
            cache_policy("/static/css/derived/main.0a1b2c3d.css"),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(cache_policy("/static/css/main.css"), "public, max-age=3600");
        assert_eq!(cache_policy("/admin"), "no-store");
        assert_eq!(cache_policy("/api/public/packages"), "no-store");
        assert_eq!(cache_policy("/auth/signin"), "no-store");
        assert_eq!(cache_policy("/administrator"), "no-cache");
        assert_eq!(cache_policy("/"), "no-cache");
    }
}

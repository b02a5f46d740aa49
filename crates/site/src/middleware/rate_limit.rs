//! Per-client rate limits (governor via `tower_governor`).
//!
//! | limiter | routes | replenish | burst |
//! |---------|--------|-----------|-------|
//! | [`auth_rate_limiter`] | `/auth/*` | 1 every 6 s | 5 |
//! | [`contact_rate_limiter`] | `POST /api/contact` | 1 every 20 s | 3 |
//! | [`api_rate_limiter`] | `/api/site-config`, `/api/public/*` | 1 every 1 s | 50 |

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Proxy headers carrying the client address, most trusted first.
///
/// `x-forwarded-for` may hold a chain; its first hop is the client.
const CLIENT_IP_HEADERS: &[&str] = &["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Keys requests by client IP: proxy headers first, then the TCP peer.
///
/// The peer fallback needs `into_make_service_with_connect_info`.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl ClientIpKeyExtractor {
    fn from_headers(headers: &HeaderMap) -> Option<IpAddr> {
        CLIENT_IP_HEADERS.iter().find_map(|name| {
            headers
                .get(*name)?
                .to_str()
                .ok()?
                .split(',')
                .next()?
                .trim()
                .parse()
                .ok()
        })
    }
}

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        Self::from_headers(req.headers())
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Build a limiter replenishing one request every `period_secs`.
///
/// # Panics
///
/// Panics if `period_secs` or `burst` is zero. Every caller below passes
/// non-zero literals.
fn limiter(period_secs: u64, burst: u32) -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(period_secs)
        .burst_size(burst)
        .finish()
        .expect("rate limiter period and burst must be non-zero");
    GovernorLayer::new(Arc::new(config))
}

/// Sign-in form: about 10 attempts a minute per IP.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    limiter(6, 5)
}

/// Contact inquiries: about 3 a minute per IP. Each one sends an email.
#[must_use]
pub fn contact_rate_limiter() -> RateLimiterLayer {
    limiter(20, 3)
}

/// Public JSON endpoints: bursts of 50, then one request a second.
#[must_use]
pub fn api_rate_limiter() -> RateLimiterLayer {
    limiter(1, 50)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/api/contact")
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn cloudflare_header_wins() {
        let req = request()
            .header("cf-connecting-ip", "203.0.113.7")
            .header("x-forwarded-for", "198.51.100.1")
            .body(())
            .unwrap();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), ip("203.0.113.7"));
    }

    #[test]
    fn forwarded_for_uses_first_hop() {
        let req = request()
            .header("x-forwarded-for", "198.51.100.1, 10.0.0.2")
            .body(())
            .unwrap();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), ip("198.51.100.1"));
    }

    #[test]
    fn unparsable_header_falls_through() {
        let req = request()
            .header("cf-connecting-ip", "unknown")
            .header("x-real-ip", "2001:db8::1")
            .body(())
            .unwrap();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), ip("2001:db8::1"));
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut req = request().body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo("192.0.2.10:51000".parse::<SocketAddr>().unwrap()));
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), ip("192.0.2.10"));
    }

    #[test]
    fn no_source_is_an_error() {
        let req = request().body(()).unwrap();
        assert!(ClientIpKeyExtractor.extract(&req).is_err());
    }
}

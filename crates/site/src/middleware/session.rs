//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session id
//! cookie is signed with the configured session secret.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions::cookie::{Key, KeyError, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "wf_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session layer with a signed cookie and `PostgreSQL` store.
pub type SiteSessionLayer = SessionManagerLayer<PostgresStore, SignedCookie>;

/// Error building the session layer.
#[derive(Debug, Error)]
pub enum SessionLayerError {
    #[error("invalid session store name: {0}")]
    Store(String),

    #[error("session secret is not a valid signing key: {0}")]
    Key(#[from] KeyError),
}

/// Create the session layer with `PostgreSQL` store.
///
/// Sessions live in `site.session` (created by the migrations).
///
/// # Errors
///
/// Returns `SessionLayerError::Key` if the session secret is shorter than
/// 64 bytes.
pub fn create_session_layer(
    pool: &PgPool,
    config: &SiteConfig,
) -> Result<SiteSessionLayer, SessionLayerError> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("site")
        .and_then(|store| store.with_table_name("session"))
        .map_err(SessionLayerError::Store)?;

    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}

//! Database operations for the site `PostgreSQL` database.
//!
//! # Schema: `site`
//!
//! ## Tables
//!
//! - `settings` - Singleton site settings (activation flag, branding, SMTP)
//! - `package_type` - Package groupings
//! - `package` - Travel packages (slug unique per package type)
//! - `article_category`, `article` - Blog content
//! - `hero_slide` - Home page carousel
//! - `user` - Back-office accounts (argon2 password hashes)
//! - `session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p wayfarer-cli -- migrate
//! ```
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the crate builds without
//! a live database.

pub mod articles;
pub mod catalog;
pub mod package_types;
pub mod packages;
pub mod settings;
pub mod slides;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use articles::ArticleRepository;
pub use catalog::PgCatalog;
pub use package_types::PackageTypeRepository;
pub use packages::PackageRepository;
pub use settings::{PgSettings, SettingsRepository};
pub use slides::SlideRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Pagination window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Largest page any list query will return.
    pub const MAX_LIMIT: i64 = 100;

    /// Build a page window, clamping the limit to `1..=MAX_LIMIT` and the
    /// offset to be non-negative.
    #[must_use]
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Window for a 1-based page number.
    #[must_use]
    pub fn numbered(page: u32, per_page: i64) -> Self {
        let index = i64::from(page.max(1) - 1);
        Self::new(per_page, index.saturating_mul(per_page))
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_limit_and_offset() {
        assert_eq!(Page::new(0, -5), Page { limit: 1, offset: 0 });
        assert_eq!(Page::new(500, 20), Page { limit: 100, offset: 20 });
    }

    #[test]
    fn numbered_pages_are_one_based() {
        assert_eq!(Page::numbered(1, 12), Page { limit: 12, offset: 0 });
        assert_eq!(Page::numbered(3, 12), Page { limit: 12, offset: 24 });
        assert_eq!(Page::numbered(0, 12), Page { limit: 12, offset: 0 });
    }
}

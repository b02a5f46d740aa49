//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::db::{PgCatalog, PgSettings};
use crate::providers::CachedSettings;
use crate::seo::StructuredDataGenerator;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    settings: CachedSettings<PgSettings>,
    catalog: PgCatalog,
    seo: StructuredDataGenerator,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Site configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        let settings =
            CachedSettings::new(PgSettings::new(pool.clone()), config.settings_cache_ttl);
        let catalog = PgCatalog::new(pool.clone());
        let seo = StructuredDataGenerator::new(&config.base_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                settings,
                catalog,
                seo,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Site settings, cached for `SITE_SETTINGS_CACHE_SECS`.
    #[must_use]
    pub fn settings(&self) -> &CachedSettings<PgSettings> {
        &self.inner.settings
    }

    /// Package catalog reads used by the structured data generator.
    #[must_use]
    pub fn catalog(&self) -> &PgCatalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn seo(&self) -> &StructuredDataGenerator {
        &self.inner.seo
    }
}

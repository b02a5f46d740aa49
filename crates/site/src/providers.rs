//! Data sources injected into the access gate and the structured data
//! generator.
//!
//! Policy code only sees these traits. The `PostgreSQL` implementations live in
//! [`crate::db`]; tests use in-memory fixtures.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::debug;

use crate::db::RepositoryError;
use crate::models::{Package, PackageType, SiteSettings};

/// Error reading site settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("settings unavailable: {0}")]
    Unavailable(String),
}

/// Source of the site settings singleton.
pub trait SettingsProvider: Send + Sync {
    /// Whether the site is open to anonymous visitors.
    ///
    /// A missing settings row counts as active.
    fn site_active(&self) -> impl Future<Output = Result<bool, SettingsError>> + Send;

    /// The settings row, if one exists.
    fn settings(
        &self,
    ) -> impl Future<Output = Result<Option<SiteSettings>, SettingsError>> + Send;
}

/// Read access to the package catalog.
pub trait CatalogSource: Send + Sync {
    /// Active packages flagged `FEATURED` or `MAIN`.
    fn promoted_packages(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Package>, RepositoryError>> + Send;

    /// A package by slug within its package type, drafts included.
    fn package(
        &self,
        type_slug: &str,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Package>, RepositoryError>> + Send;

    /// A package type by slug.
    fn package_type(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<PackageType>, RepositoryError>> + Send;

    /// Active packages of one package type.
    fn active_packages_of_type(
        &self,
        type_slug: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Package>, RepositoryError>> + Send;
}

/// Caches another provider's settings for a fixed TTL.
///
/// With a zero TTL every call goes straight to the inner provider.
pub struct CachedSettings<P> {
    inner: P,
    cache: Option<Cache<(), Option<SiteSettings>>>,
}

impl<P: SettingsProvider> CachedSettings<P> {
    /// Wrap `inner`, caching its settings for `ttl`.
    #[must_use]
    pub fn new(inner: P, ttl: Duration) -> Self {
        let cache = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });
        Self { inner, cache }
    }

    /// Drop the cached row so the next read hits the inner provider.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(&()).await;
        }
    }
}

impl<P: SettingsProvider> SettingsProvider for CachedSettings<P> {
    async fn site_active(&self) -> Result<bool, SettingsError> {
        if self.cache.is_none() {
            return self.inner.site_active().await;
        }

        Ok(self.settings().await?.is_none_or(|settings| settings.status))
    }

    async fn settings(&self) -> Result<Option<SiteSettings>, SettingsError> {
        let Some(cache) = &self.cache else {
            return self.inner.settings().await;
        };

        if let Some(settings) = cache.get(&()).await {
            debug!("Cache hit for site settings");
            return Ok(settings);
        }

        let settings = self.inner.settings().await?;
        cache.insert((), settings.clone()).await;
        Ok(settings)
    }
}

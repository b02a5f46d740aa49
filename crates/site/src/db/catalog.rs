//! [`CatalogSource`] over the package repositories.

use sqlx::PgPool;

use super::{Page, PackageRepository, PackageTypeRepository, RepositoryError};
use crate::models::{Package, PackageType};
use crate::providers::CatalogSource;

/// Catalog reads backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogSource for PgCatalog {
    async fn promoted_packages(&self, limit: i64) -> Result<Vec<Package>, RepositoryError> {
        PackageRepository::new(&self.pool).promoted(limit).await
    }

    async fn package(
        &self,
        type_slug: &str,
        slug: &str,
    ) -> Result<Option<Package>, RepositoryError> {
        PackageRepository::new(&self.pool)
            .any_by_slug(type_slug, slug)
            .await
    }

    async fn package_type(&self, slug: &str) -> Result<Option<PackageType>, RepositoryError> {
        PackageTypeRepository::new(&self.pool).by_slug(slug).await
    }

    async fn active_packages_of_type(
        &self,
        type_slug: &str,
        limit: i64,
    ) -> Result<Vec<Package>, RepositoryError> {
        PackageRepository::new(&self.pool)
            .list_active(Some(type_slug), Page::new(limit, 0))
            .await
    }
}

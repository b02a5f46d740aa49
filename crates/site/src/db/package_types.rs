//! Package type repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::PackageType;

/// Repository for package type queries.
pub struct PackageTypeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PackageTypeRepository<'a> {
    /// Create a new package type repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a package type by its unique slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn by_slug(&self, slug: &str) -> Result<Option<PackageType>, RepositoryError> {
        let package_type = sqlx::query_as::<_, PackageType>(
            r"
            SELECT id, slug, name, description
            FROM site.package_type
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(package_type)
    }

    /// All package types, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<PackageType>, RepositoryError> {
        let types = sqlx::query_as::<_, PackageType>(
            r"
            SELECT id, slug, name, description
            FROM site.package_type
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(types)
    }
}

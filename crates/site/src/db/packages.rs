//! Travel package repository.
//!
//! Every query joins `site.package_type` so callers get the type slug needed
//! to build canonical URLs. Drafts are never returned by the public lookups.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use wayfarer_core::slug::matches_terms;
use wayfarer_core::{PackageId, PackageStatus};

use super::{Page, RepositoryError};
use crate::models::Package;

/// Upper bound on packages scanned when resolving a legacy slug.
const LEGACY_SCAN_LIMIT: i64 = 500;

macro_rules! select_packages {
    ($tail:literal) => {
        concat!(
            r"
            SELECT
                p.id,
                p.package_type_id,
                t.slug AS type_slug,
                t.name AS type_name,
                p.slug,
                p.title,
                p.summary,
                p.description,
                p.price,
                p.currency,
                p.duration_days,
                p.destinations,
                p.image_url,
                p.status,
                p.highlight,
                p.updated_at
            FROM site.package p
            JOIN site.package_type t ON t.id = p.package_type_id
            ",
            $tail
        )
    };
}

/// Repository for travel package queries.
pub struct PackageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PackageRepository<'a> {
    /// Create a new package repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active packages flagged `FEATURED` or `MAIN`, `MAIN` first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn promoted(&self, limit: i64) -> Result<Vec<Package>, RepositoryError> {
        let packages = sqlx::query_as::<_, Package>(select_packages!(
            r"
            WHERE p.status = 'ACTIVE' AND p.highlight IN ('FEATURED', 'MAIN')
            ORDER BY p.highlight DESC, p.updated_at DESC
            LIMIT $1
            "
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(packages)
    }

    /// Look up a published package by its slug within a package type.
    ///
    /// Inactive and unavailable packages are returned (their pages still
    /// render); drafts are not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn by_slug(
        &self,
        type_slug: &str,
        slug: &str,
    ) -> Result<Option<Package>, RepositoryError> {
        let package = sqlx::query_as::<_, Package>(select_packages!(
            r"
            WHERE t.slug = $1 AND p.slug = $2 AND p.status <> 'DRAFT'
            "
        ))
        .bind(type_slug)
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(package)
    }

    /// A package by slug within its type, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn any_by_slug(
        &self,
        type_slug: &str,
        slug: &str,
    ) -> Result<Option<Package>, RepositoryError> {
        let package = sqlx::query_as::<_, Package>(select_packages!(
            "WHERE t.slug = $1 AND p.slug = $2"
        ))
        .bind(type_slug)
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(package)
    }

    /// Active packages, optionally restricted to one package type.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_active(
        &self,
        type_slug: Option<&str>,
        page: Page,
    ) -> Result<Vec<Package>, RepositoryError> {
        let packages = sqlx::query_as::<_, Package>(select_packages!(
            r"
            WHERE p.status = 'ACTIVE' AND ($1::text IS NULL OR t.slug = $1)
            ORDER BY p.highlight DESC, p.title
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(type_slug)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(packages)
    }

    /// Every package regardless of status, most recently edited first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self, page: Page) -> Result<Vec<Package>, RepositoryError> {
        let packages = sqlx::query_as::<_, Package>(select_packages!(
            r"
            ORDER BY p.updated_at DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(packages)
    }

    /// Change a package's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no package has this id.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: PackageId,
        status: PackageStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE site.package
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Number of packages per status, for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status(&self) -> Result<Vec<(PackageStatus, i64)>, RepositoryError> {
        let rows: Vec<(PackageStatus, i64)> = sqlx::query_as(
            r"
            SELECT status, COUNT(*)
            FROM site.package
            GROUP BY status
            ORDER BY status
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Active packages of a type whose slug contains every search term.
    ///
    /// Used to redirect bookmarked URLs from before a package was renamed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn legacy_matches(
        &self,
        type_slug: &str,
        terms: &[String],
    ) -> Result<Vec<Package>, RepositoryError> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .list_active(
                Some(type_slug),
                Page {
                    limit: LEGACY_SCAN_LIMIT,
                    offset: 0,
                },
            )
            .await?;

        Ok(candidates
            .into_iter()
            .filter(|package| matches_terms(&package.slug, terms))
            .collect())
    }

    /// `(path, last modified)` of every active package, for the sitemap.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sitemap_entries(&self) -> Result<Vec<(String, DateTime<Utc>)>, RepositoryError> {
        let rows: Vec<(String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT t.slug, p.slug, p.updated_at
            FROM site.package p
            JOIN site.package_type t ON t.id = p.package_type_id
            WHERE p.status = 'ACTIVE'
            ORDER BY t.slug, p.slug
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(type_slug, slug, updated_at)| {
                (
                    format!("{}/{type_slug}/{slug}", crate::models::catalog::PACKAGES_ROOT),
                    updated_at,
                )
            })
            .collect())
    }
}

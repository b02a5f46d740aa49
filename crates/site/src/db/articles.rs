//! Blog article and category repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{Page, RepositoryError};
use crate::models::{Article, Category};

macro_rules! select_articles {
    ($tail:literal) => {
        concat!(
            r"
            SELECT
                a.id,
                a.slug,
                a.title,
                a.excerpt,
                a.body,
                a.cover_url,
                a.category_id,
                c.name AS category_name,
                a.status,
                a.published_at,
                a.updated_at
            FROM site.article a
            LEFT JOIN site.article_category c ON c.id = a.category_id
            ",
            $tail
        )
    };
}

/// Repository for blog content.
pub struct ArticleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new article repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn published(&self, page: Page) -> Result<Vec<Article>, RepositoryError> {
        let articles = sqlx::query_as::<_, Article>(select_articles!(
            r"
            WHERE a.status = 'PUBLISHED'
            ORDER BY a.published_at DESC NULLS LAST, a.id DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(articles)
    }

    /// A published article by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn published_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError> {
        let article = sqlx::query_as::<_, Article>(select_articles!(
            "WHERE a.slug = $1 AND a.status = 'PUBLISHED'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(article)
    }

    /// Every article, drafts included, most recently edited first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self, page: Page) -> Result<Vec<Article>, RepositoryError> {
        let articles = sqlx::query_as::<_, Article>(select_articles!(
            r"
            ORDER BY a.updated_at DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        Ok(articles)
    }

    /// Number of published articles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_published(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM site.article WHERE status = 'PUBLISHED'")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }

    /// All article categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, slug, name
            FROM site.article_category
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// `(path, last modified)` of every published article, for the sitemap.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sitemap_entries(&self) -> Result<Vec<(String, DateTime<Utc>)>, RepositoryError> {
        let rows: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT slug, updated_at
            FROM site.article
            WHERE status = 'PUBLISHED'
            ORDER BY published_at DESC NULLS LAST
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(slug, updated_at)| (format!("/blog/{slug}"), updated_at))
            .collect())
    }
}

//! Hero carousel slides.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::HeroSlide;

/// Repository for hero slide queries.
pub struct SlideRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SlideRepository<'a> {
    /// Create a new slide repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active slides in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active(&self) -> Result<Vec<HeroSlide>, RepositoryError> {
        let slides = sqlx::query_as::<_, HeroSlide>(
            r"
            SELECT id, title, subtitle, image_url, button_text, button_url, position, active
            FROM site.hero_slide
            WHERE active
            ORDER BY position, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(slides)
    }

    /// Number of slides, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site.hero_slide")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

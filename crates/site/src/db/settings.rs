//! Site settings singleton (`site.settings`, `id = 1`).

use sqlx::PgPool;
use tracing::instrument;

use super::RepositoryError;
use crate::models::SiteSettings;
use crate::providers::{SettingsError, SettingsProvider};

/// Repository for the settings row.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self) -> Result<Option<SiteSettings>, RepositoryError> {
        let settings = sqlx::query_as::<_, SiteSettings>(
            r"
            SELECT
                status,
                site_name,
                default_title,
                default_description,
                logo_url,
                contact_email,
                contact_phone,
                address,
                instagram_url,
                facebook_url,
                youtube_url,
                tiktok_url,
                whatsapp_number,
                smtp_host,
                smtp_port,
                smtp_username,
                smtp_password,
                smtp_from,
                contact_recipient
            FROM site.settings
            WHERE id = 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(settings)
    }

    /// Fetch only the activation flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status(&self) -> Result<Option<bool>, RepositoryError> {
        let status: Option<(bool,)> =
            sqlx::query_as("SELECT status FROM site.settings WHERE id = 1")
                .fetch_optional(self.pool)
                .await?;

        Ok(status.map(|(status,)| status))
    }

    /// Open or close the site to anonymous visitors.
    ///
    /// Creates the settings row with defaults if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn set_status(&self, active: bool) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO site.settings (id, status)
            VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET status = $1, updated_at = NOW()
            ",
        )
        .bind(active)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// [`SettingsProvider`] reading straight from `PostgreSQL`.
#[derive(Clone)]
pub struct PgSettings {
    pool: PgPool,
}

impl PgSettings {
    /// Create a provider over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SettingsProvider for PgSettings {
    async fn site_active(&self) -> Result<bool, SettingsError> {
        let status = SettingsRepository::new(&self.pool).status().await?;
        Ok(status.unwrap_or(true))
    }

    async fn settings(&self) -> Result<Option<SiteSettings>, SettingsError> {
        Ok(SettingsRepository::new(&self.pool).get().await?)
    }
}

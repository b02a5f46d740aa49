//! Back-office home.
//!
//! Reachable by any signed-in user; the access gate guards the sections
//! below it by role.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use wayfarer_core::{PackageStatus, Role};

use crate::db::{ArticleRepository, PackageRepository, SettingsRepository, SlideRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Package counts by status, zero-filled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackageCounts {
    pub draft: i64,
    pub active: i64,
    pub inactive: i64,
    pub unavailable: i64,
}

impl PackageCounts {
    fn from_rows(rows: &[(PackageStatus, i64)]) -> Self {
        let mut counts = Self::default();
        for (status, count) in rows {
            let slot = match status {
                PackageStatus::Draft => &mut counts.draft,
                PackageStatus::Active => &mut counts.active,
                PackageStatus::Inactive => &mut counts.inactive,
                PackageStatus::Unavailable => &mut counts.unavailable,
            };
            *slot += count;
        }
        counts
    }

    #[must_use]
    pub const fn total(&self) -> i64 {
        self.draft + self.active + self.inactive + self.unavailable
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub email: String,
    pub is_admin: bool,
    pub is_staff: bool,
    /// `None` when no settings row exists yet.
    pub site_active: Option<bool>,
    pub packages: PackageCounts,
    pub published_articles: i64,
    pub slides: i64,
}

/// Display the back-office dashboard.
#[instrument(skip(state, token), fields(user_id = %token.subject))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(token): RequireAuth,
) -> Result<impl IntoResponse> {
    let pool = state.pool();
    let packages = PackageRepository::new(pool);
    let articles = ArticleRepository::new(pool);
    let slides = SlideRepository::new(pool);
    let settings = SettingsRepository::new(pool);

    let (package_rows, published_articles, slides, site_active) = tokio::try_join!(
        packages.count_by_status(),
        articles.count_published(),
        slides.count(),
        settings.status(),
    )?;

    Ok(DashboardTemplate {
        email: token.email.to_string(),
        is_admin: token.has_any_role(&[Role::Admin]),
        is_staff: token.has_any_role(&[Role::Admin, Role::Editor]),
        site_active,
        packages: PackageCounts::from_rows(&package_rows),
        published_articles,
        slides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_statuses_count_as_zero() {
        let counts = PackageCounts::from_rows(&[
            (PackageStatus::Active, 12),
            (PackageStatus::Draft, 3),
        ]);

        assert_eq!(
            counts,
            PackageCounts {
                draft: 3,
                active: 12,
                inactive: 0,
                unavailable: 0,
            }
        );
        assert_eq!(counts.total(), 15);
    }
}

//! Back-office catalog endpoints (ADMIN or EDITOR).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{info, instrument};

use wayfarer_core::{PackageId, PackageStatus};

use crate::db::{ArticleRepository, Page, PackageRepository};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Article, Package};
use crate::state::AppState;

/// `?limit=&offset=` for back-office listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    fn page(&self) -> Page {
        Page::new(
            self.limit.unwrap_or(Page::MAX_LIMIT),
            self.offset.unwrap_or(0),
        )
    }
}

/// Body of `PATCH /api/packages/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: PackageStatus,
}

/// `GET /api/packages` - every package, drafts included.
#[instrument(skip(state))]
pub async fn packages(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Package>>> {
    let packages = PackageRepository::new(state.pool())
        .list_all(query.page())
        .await?;
    Ok(Json(packages))
}

/// `PATCH /api/packages/{id}/status`
///
/// # Errors
///
/// Returns 404 if the package doesn't exist.
#[instrument(skip(state, token), fields(user_id = %token.subject))]
pub async fn update_package_status(
    State(state): State<AppState>,
    RequireAuth(token): RequireAuth,
    Path(id): Path<i32>,
    Json(update): Json<StatusUpdate>,
) -> Result<StatusCode> {
    let id = PackageId::new(id);
    PackageRepository::new(state.pool())
        .update_status(id, update.status)
        .await?;

    info!(package_id = %id, status = ?update.status, "Package status changed");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/articles` - every article, drafts included.
#[instrument(skip(state))]
pub async fn articles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Article>>> {
    let articles = ArticleRepository::new(state.pool())
        .list_all(query.page())
        .await?;
    Ok(Json(articles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_the_largest_page() {
        let query = ListQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(query.page(), Page::new(Page::MAX_LIMIT, 0));
    }

    #[test]
    fn status_update_uses_database_labels() {
        let update: StatusUpdate =
            serde_json::from_str(r#"{"status":"UNAVAILABLE"}"#).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(update.status, PackageStatus::Unavailable);
        assert!(serde_json::from_str::<StatusUpdate>(r#"{"status":"archived"}"#).is_err());
    }
}

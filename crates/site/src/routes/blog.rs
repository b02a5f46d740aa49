//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use tracing::instrument;

use crate::content::{excerpt, reading_time_minutes, render_markdown};
use crate::db::{ArticleRepository, Page};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Article;
use crate::routes::layout::PageLayout;
use crate::routes::packages::PageQuery;
use crate::state::AppState;

/// Articles per page on the blog index.
const PER_PAGE: i64 = 10;

/// Number of recent articles to show in sidebar.
const RECENT_POSTS_COUNT: usize = 3;

/// Length of generated excerpts when an article has none.
const EXCERPT_CHARS: usize = 180;

/// Article view for templates.
#[derive(Clone)]
pub struct ArticleView {
    pub path: String,
    pub title: String,
    pub excerpt: String,
    pub cover_url: Option<String>,
    pub category_name: Option<String>,
    /// `YYYY-MM-DD`, empty for undated articles.
    pub published_on: String,
    pub reading_time_minutes: usize,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            path: article.path(),
            title: article.title.clone(),
            excerpt: article
                .excerpt
                .clone()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| excerpt(&article.body, EXCERPT_CHARS)),
            cover_url: article.cover_url.clone(),
            category_name: article.category_name.clone(),
            published_on: article
                .published_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            reading_time_minutes: reading_time_minutes(&article.body),
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub layout: PageLayout,
    pub articles: Vec<ArticleView>,
    pub page: u32,
    pub has_next: bool,
}

/// Blog article detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub layout: PageLayout,
    pub article: ArticleView,
    pub body_html: String,
    pub recent: Vec<ArticleView>,
}

/// Display the blog index with published articles.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let window = Page::numbered(page, PER_PAGE);
    let articles = ArticleRepository::new(state.pool())
        .published(Page::new(window.limit + 1, window.offset))
        .await?;

    let per_page = usize::try_from(PER_PAGE).unwrap_or(usize::MAX);
    let has_next = articles.len() > per_page;
    let articles = articles
        .iter()
        .take(per_page)
        .map(ArticleView::from)
        .collect();

    let layout = PageLayout::build(&state, "/blog", Some("Blog".to_string()), None).await?;

    Ok(BlogIndexTemplate {
        layout,
        articles,
        page,
        has_next,
    })
}

/// Display a single published article by slug.
///
/// # Errors
///
/// Returns 404 if the article doesn't exist or is a draft.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let repo = ArticleRepository::new(state.pool());
    let (article, recent) = tokio::try_join!(
        repo.published_by_slug(&slug),
        repo.published(Page::new(i64::try_from(RECENT_POSTS_COUNT + 1).unwrap_or(4), 0))
    )?;
    let article = article.ok_or_else(|| AppError::NotFound(format!("article {slug}")))?;

    let recent = recent
        .iter()
        .filter(|a| a.id != article.id)
        .take(RECENT_POSTS_COUNT)
        .map(ArticleView::from)
        .collect();

    let view = ArticleView::from(&article);
    let layout = PageLayout::build(
        &state,
        &article.path(),
        Some(article.title.clone()),
        Some(view.excerpt.clone()),
    )
    .await?;

    Ok(BlogShowTemplate {
        layout,
        body_html: render_markdown(&article.body),
        article: view,
        recent,
    })
}

/// Create the blog routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use wayfarer_core::{ArticleId, ArticleStatus};

    use super::*;

    fn article(excerpt: Option<&str>) -> Article {
        Article {
            id: ArticleId::new(1),
            slug: "lisbon-in-three-days".to_string(),
            title: "Lisbon in three days".to_string(),
            excerpt: excerpt.map(str::to_string),
            body: "## Day one\n\nTrams, **pastéis** and the riverfront.".to_string(),
            cover_url: None,
            category_id: None,
            category_name: Some("Guides".to_string()),
            status: ArticleStatus::Published,
            published_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).single(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn view_uses_stored_excerpt() {
        let view = ArticleView::from(&article(Some("A short guide.")));
        assert_eq!(view.excerpt, "A short guide.");
        assert_eq!(view.path, "/blog/lisbon-in-three-days");
        assert_eq!(view.published_on, "2026-03-14");
        assert_eq!(view.reading_time_minutes, 1);
    }

    #[test]
    fn view_generates_excerpt_from_body() {
        let view = ArticleView::from(&article(Some("  ")));
        assert_eq!(view.excerpt, "Day one Trams, pastéis and the riverfront.");
    }
}

//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::{PackageRepository, SlideRepository};
use crate::error::Result;
use crate::filters;
use crate::models::{HeroSlide, Package};
use crate::routes::layout::PageLayout;
use crate::state::AppState;

/// Featured packages shown below the hero carousel.
const FEATURED_COUNT: i64 = 6;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: PageLayout,
    pub slides: Vec<HeroSlide>,
    pub featured: Vec<Package>,
}

/// Display the home page: hero slides and featured packages.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let pool = state.pool();
    let slides = SlideRepository::new(pool);
    let packages = PackageRepository::new(pool);

    let (slides, featured) = tokio::try_join!(slides.active(), packages.promoted(FEATURED_COUNT))?;
    let layout = PageLayout::build(&state, "/", None, None).await?;

    Ok(HomeTemplate {
        layout,
        slides,
        featured,
    })
}

//! Package catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use wayfarer_core::slug::search_terms;

use crate::content::render_markdown;
use crate::db::{Page, PackageRepository, PackageTypeRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Package, PackageType};
use crate::routes::layout::PageLayout;
use crate::state::AppState;

/// Packages per page on a package type listing.
const PER_PAGE: i64 = 12;

/// A package type with its active packages, for the catalog index.
pub struct TypeSection {
    pub package_type: PackageType,
    pub packages: Vec<Package>,
}

/// Catalog index template.
#[derive(Template, WebTemplate)]
#[template(path = "packages/index.html")]
pub struct PackagesIndexTemplate {
    pub layout: PageLayout,
    pub sections: Vec<TypeSection>,
}

/// Package type listing template.
#[derive(Template, WebTemplate)]
#[template(path = "packages/type.html")]
pub struct PackageTypeTemplate {
    pub layout: PageLayout,
    pub package_type: PackageType,
    pub packages: Vec<Package>,
    pub page: u32,
    pub has_next: bool,
}

/// Package detail template.
#[derive(Template, WebTemplate)]
#[template(path = "packages/show.html")]
pub struct PackageShowTemplate {
    pub layout: PageLayout,
    pub package: Package,
    pub description_html: String,
    pub bookable: bool,
}

/// `?page=` query for listings.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Display every package type with its active packages.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let pool = state.pool();
    let types = PackageTypeRepository::new(pool);
    let packages = PackageRepository::new(pool);

    let (types, packages) = tokio::try_join!(
        types.list(),
        packages.list_active(None, Page::new(Page::MAX_LIMIT, 0))
    )?;

    let sections = group_by_type(types, packages);
    let layout = PageLayout::build(&state, "/packages", Some("Travel packages".to_string()), None)
        .await?;

    Ok(PackagesIndexTemplate { layout, sections })
}

/// Display the active packages of one package type.
///
/// # Errors
///
/// Returns 404 if the package type doesn't exist.
#[instrument(skip(state))]
pub async fn by_type(
    State(state): State<AppState>,
    Path(type_slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let package_type = PackageTypeRepository::new(state.pool())
        .by_slug(&type_slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("package type {type_slug}")))?;

    let page = query.page.unwrap_or(1).max(1);
    // One extra row tells us whether a next page exists.
    let window = Page::numbered(page, PER_PAGE);
    let mut packages = PackageRepository::new(state.pool())
        .list_active(Some(&type_slug), Page::new(window.limit + 1, window.offset))
        .await?;
    let has_next = packages.len() > usize::try_from(PER_PAGE).unwrap_or(usize::MAX);
    packages.truncate(usize::try_from(PER_PAGE).unwrap_or(usize::MAX));

    let layout = PageLayout::build(
        &state,
        &package_type.path(),
        Some(package_type.name.clone()),
        package_type.description.clone(),
    )
    .await?;

    Ok(PackageTypeTemplate {
        layout,
        package_type,
        packages,
        page,
        has_next,
    })
}

/// Display a package, or redirect a legacy slug to its current URL.
///
/// # Errors
///
/// Returns 404 if neither the slug nor a unique legacy match exists.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((type_slug, slug)): Path<(String, String)>,
) -> Result<Response> {
    let repo = PackageRepository::new(state.pool());

    let Some(package) = repo.by_slug(&type_slug, &slug).await? else {
        return legacy_redirect(&repo, &type_slug, &slug).await;
    };

    let description_html = render_markdown(&package.description);
    let layout = PageLayout::build(
        &state,
        &package.path(),
        Some(package.title.clone()),
        Some(package.summary.clone()),
    )
    .await?;

    Ok(PackageShowTemplate {
        layout,
        bookable: package.status.is_bookable(),
        description_html,
        package,
    }
    .into_response())
}

/// 301 to the only active package matching an old slug's terms.
async fn legacy_redirect(
    repo: &PackageRepository<'_>,
    type_slug: &str,
    slug: &str,
) -> Result<Response> {
    let terms = search_terms(slug);
    let matches = repo.legacy_matches(type_slug, &terms).await?;

    match matches.as_slice() {
        [package] => {
            let location = package.path();
            info!(from = slug, to = %location, "Redirecting legacy package slug");
            Ok((StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response())
        }
        _ => {
            debug!(slug, candidates = matches.len(), "No unique legacy match");
            Err(AppError::NotFound(format!("package {type_slug}/{slug}")))
        }
    }
}

/// Pair each package type with its packages, dropping empty types.
fn group_by_type(types: Vec<PackageType>, packages: Vec<Package>) -> Vec<TypeSection> {
    let mut sections: Vec<TypeSection> = types
        .into_iter()
        .map(|package_type| TypeSection {
            package_type,
            packages: Vec::new(),
        })
        .collect();

    for package in packages {
        if let Some(section) = sections
            .iter_mut()
            .find(|s| s.package_type.id == package.package_type_id)
        {
            section.packages.push(package);
        }
    }

    sections.retain(|s| !s.packages.is_empty());
    sections
}

/// Create the package routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{type_slug}", get(by_type))
        .route("/{type_slug}/{slug}", get(show))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use wayfarer_core::{PackageHighlight, PackageId, PackageStatus, PackageTypeId};

    use super::*;

    fn package_type(id: i32, slug: &str) -> PackageType {
        PackageType {
            id: PackageTypeId::new(id),
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            description: None,
        }
    }

    fn package(id: i32, type_id: i32) -> Package {
        Package {
            id: PackageId::new(id),
            package_type_id: PackageTypeId::new(type_id),
            type_slug: String::new(),
            type_name: String::new(),
            slug: format!("package-{id}"),
            title: format!("Package {id}"),
            summary: String::new(),
            description: String::new(),
            price: Decimal::ONE_HUNDRED,
            currency: "BRL".to_string(),
            duration_days: 5,
            destinations: Vec::new(),
            image_url: None,
            status: PackageStatus::Active,
            highlight: PackageHighlight::Normal,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn packages_are_grouped_under_their_type() {
        let sections = group_by_type(
            vec![package_type(1, "cruises"), package_type(2, "national"), package_type(3, "empty")],
            vec![package(10, 2), package(11, 1), package(12, 2)],
        );

        let summary: Vec<(&str, Vec<i32>)> = sections
            .iter()
            .map(|s| {
                (
                    s.package_type.slug.as_str(),
                    s.packages.iter().map(|p| p.id.as_i32()).collect(),
                )
            })
            .collect();

        assert_eq!(summary, vec![("cruises", vec![11]), ("national", vec![10, 12])]);
    }
}

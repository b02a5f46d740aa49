//! Catalog and editorial content: packages, package types, articles, slides.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use wayfarer_core::{
    ArticleId, ArticleStatus, CategoryId, PackageHighlight, PackageId, PackageStatus,
    PackageTypeId, Price, SlideId,
};

/// URL prefix under which package types and packages are published.
pub const PACKAGES_ROOT: &str = "/packages";

/// A bookable travel package, joined with its package type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Package {
    pub id: PackageId,
    pub package_type_id: PackageTypeId,
    /// Slug of the owning package type (packages are unique per type).
    pub type_slug: String,
    pub type_name: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Markdown.
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub duration_days: i32,
    /// Ordered stops of the itinerary.
    pub destinations: Vec<String>,
    pub image_url: Option<String>,
    pub status: PackageStatus,
    pub highlight: PackageHighlight,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Site-relative URL of the package detail page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{PACKAGES_ROOT}/{}/{}", self.type_slug, self.slug)
    }

    /// Price with currency.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::new(self.price, self.currency.clone())
    }
}

/// A grouping of packages (e.g. "Cruises", "National").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PackageType {
    pub id: PackageTypeId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
}

impl PackageType {
    /// Site-relative URL of the package type listing.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{PACKAGES_ROOT}/{}", self.slug)
    }
}

/// A blog article, joined with its category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    /// Markdown.
    pub body: String,
    pub cover_url: Option<String>,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub status: ArticleStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Site-relative URL of the article.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// Article category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
}

/// A slide of the home page hero carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HeroSlide {
    pub id: SlideId,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
    pub position: i32,
    pub active: bool,
}

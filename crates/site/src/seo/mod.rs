//! Structured data (JSON-LD) and sitemap generation.
//!
//! [`StructuredDataGenerator::generate`] returns the organization document
//! followed by at most one page document chosen by [`PageRoute`]:
//!
//! | route | document |
//! |-------|----------|
//! | `/` | `TravelAgency` offering up to 5 promoted packages |
//! | `/packages/<type>/<slug>` | `TouristTrip` for the package |
//! | `/packages/<type>` | `WebPage` with an `ItemList` of up to 10 packages |
//! | anything else | `WebPage` |
//!
//! Lookup misses drop the page document. Missing or unreadable settings
//! produce no documents at all.

pub mod route;
pub mod schema;
pub mod sitemap;

use tracing::{debug, instrument, warn};

use wayfarer_core::PackageStatus;

use crate::db::RepositoryError;
use crate::models::{Package, SiteSettings};
use crate::providers::{CatalogSource, SettingsProvider};

pub use route::PageRoute;
pub use schema::{Document, StructuredData};

use schema::{
    ContactPoint, IN_STOCK, ItemList, ListItem, OUT_OF_STOCK, Offer, Organization, Provider,
    TouristTrip, TravelAgency, TripSummary, WebPage,
};

/// Promoted packages listed on the home page document.
const PROMOTED_LIMIT: i64 = 5;

/// Packages listed on a package type document.
const TYPE_LIST_LIMIT: i64 = 10;

/// Title and description for pages with fixed copy.
const PAGE_OVERRIDES: &[(&str, &str, &str)] = &[
    (
        "/packages",
        "Travel packages",
        "Browse every travel package by type and destination.",
    ),
    (
        "/about",
        "About us",
        "Who we are and how we plan your next trip.",
    ),
];

/// Offer availability for a package status.
#[must_use]
pub const fn availability(status: PackageStatus) -> &'static str {
    if status.is_bookable() {
        IN_STOCK
    } else {
        OUT_OF_STOCK
    }
}

/// Builds JSON-LD documents for site pages.
#[derive(Debug, Clone)]
pub struct StructuredDataGenerator {
    base_url: String,
}

impl StructuredDataGenerator {
    /// Create a generator emitting absolute URLs under `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Documents describing the page at `path`, organization first.
    ///
    /// Returns `Ok(None)` when site settings are missing or cannot be read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a catalog lookup fails.
    #[instrument(skip(self, settings, catalog))]
    pub async fn generate<S, C>(
        &self,
        path: &str,
        settings: &S,
        catalog: &C,
    ) -> Result<Option<Vec<StructuredData>>, RepositoryError>
    where
        S: SettingsProvider,
        C: CatalogSource,
    {
        let settings = match settings.settings().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!("No site settings, skipping structured data");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to load site settings for structured data");
                return Ok(None);
            }
        };

        let page = match PageRoute::parse(path) {
            PageRoute::Home => self.travel_agency(&settings, catalog).await?,
            PageRoute::Package { type_slug, slug } => {
                self.tourist_trip(&settings, catalog, type_slug, slug)
                    .await?
            }
            PageRoute::PackageType { type_slug } => {
                self.package_type_page(&settings, catalog, type_slug)
                    .await?
            }
            PageRoute::Page(path) => Some(self.web_page(&settings, path)),
        };

        let mut documents = vec![StructuredData::from(Document::Organization(
            self.organization(&settings),
        ))];
        documents.extend(page.map(StructuredData::from));

        Ok(Some(documents))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn organization(&self, settings: &SiteSettings) -> Organization {
        let contact_point = (settings.contact_phone.is_some() || settings.contact_email.is_some())
            .then(|| ContactPoint {
                kind: "ContactPoint",
                contact_type: "customer service",
                telephone: settings.contact_phone.clone(),
                email: settings.contact_email.clone(),
            });

        Organization {
            name: settings.site_name.clone(),
            url: self.url("/"),
            logo: settings.logo_url.clone(),
            description: settings.default_description.clone(),
            contact_point,
            same_as: settings.social_links(),
        }
    }

    fn offer(&self, package: &Package) -> Offer {
        Offer {
            kind: "Offer",
            price: package.price().amount_string(),
            price_currency: package.currency.clone(),
            url: self.url(&package.path()),
            availability: availability(package.status),
            item_offered: None,
        }
    }

    async fn travel_agency<C: CatalogSource>(
        &self,
        settings: &SiteSettings,
        catalog: &C,
    ) -> Result<Option<Document>, RepositoryError> {
        let packages = catalog.promoted_packages(PROMOTED_LIMIT).await?;
        if packages.is_empty() {
            return Ok(None);
        }

        let makes_offer = packages
            .iter()
            .map(|package| Offer {
                item_offered: Some(TripSummary {
                    kind: "TouristTrip",
                    name: package.title.clone(),
                    description: package.summary.clone(),
                    url: self.url(&package.path()),
                }),
                ..self.offer(package)
            })
            .collect();

        Ok(Some(Document::TravelAgency(TravelAgency {
            name: settings.site_name.clone(),
            url: self.url("/"),
            description: settings.default_description.clone(),
            logo: settings.logo_url.clone(),
            telephone: settings.contact_phone.clone(),
            address: settings.address.clone(),
            makes_offer,
        })))
    }

    async fn tourist_trip<C: CatalogSource>(
        &self,
        settings: &SiteSettings,
        catalog: &C,
        type_slug: &str,
        slug: &str,
    ) -> Result<Option<Document>, RepositoryError> {
        let Some(package) = catalog.package(type_slug, slug).await? else {
            debug!(type_slug, slug, "Package not found, no trip document");
            return Ok(None);
        };

        let itinerary = (!package.destinations.is_empty()).then(|| {
            ItemList::numbered(
                package
                    .destinations
                    .iter()
                    .cloned()
                    .map(ListItem::place)
                    .collect(),
            )
        });

        Ok(Some(Document::TouristTrip(TouristTrip {
            name: package.title.clone(),
            description: package.summary.clone(),
            url: self.url(&package.path()),
            image: package.image_url.clone(),
            itinerary,
            offers: self.offer(&package),
            provider: Provider {
                kind: "TravelAgency",
                name: settings.site_name.clone(),
                url: self.url("/"),
            },
        })))
    }

    async fn package_type_page<C: CatalogSource>(
        &self,
        settings: &SiteSettings,
        catalog: &C,
        type_slug: &str,
    ) -> Result<Option<Document>, RepositoryError> {
        let (package_type, packages) = tokio::join!(
            catalog.package_type(type_slug),
            catalog.active_packages_of_type(type_slug, TYPE_LIST_LIMIT),
        );

        let Some(package_type) = package_type? else {
            debug!(type_slug, "Package type not found, no listing document");
            return Ok(None);
        };

        let items = packages?
            .into_iter()
            .map(|package| {
                let url = self.url(&package.path());
                ListItem::link(package.title, package.summary, url)
            })
            .collect();

        Ok(Some(Document::WebPage(WebPage {
            name: format!("Packages of {}", package_type.name),
            description: package_type
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| settings.default_description.clone()),
            url: self.url(&package_type.path()),
            main_entity: Some(ItemList::numbered(items)),
        })))
    }

    fn web_page(&self, settings: &SiteSettings, path: &str) -> Document {
        let (name, description) = PAGE_OVERRIDES
            .iter()
            .find(|(page, _, _)| *page == path)
            .map_or_else(
                || {
                    (
                        settings.default_title.clone(),
                        settings.default_description.clone(),
                    )
                },
                |(_, title, description)| ((*title).to_owned(), (*description).to_owned()),
            );

        Document::WebPage(WebPage {
            name,
            description,
            url: self.url(path),
            main_entity: None,
        })
    }
}

/// Serialize documents for `<script type="application/ld+json">` blocks.
///
/// `</` is escaped so a value can never close the script element.
///
/// # Errors
///
/// Returns `serde_json::Error` if a document fails to serialize.
pub fn json_ld_scripts(documents: &[StructuredData]) -> Result<Vec<String>, serde_json::Error> {
    documents
        .iter()
        .map(|document| serde_json::to_string(document).map(|json| json.replace("</", "<\\/")))
        .collect()
}

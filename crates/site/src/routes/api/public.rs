//! Public JSON endpoints: branding and the active package listing.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::db::{Page, PackageRepository};
use crate::error::Result;
use crate::models::{Package, SiteSettings};
use crate::providers::SettingsProvider;
use crate::state::AppState;

/// Default page size of the public package listing.
const DEFAULT_LIMIT: i64 = 20;

/// Branding shown by client-side widgets.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct SiteConfigResponse {
    pub active: bool,
    pub site_name: String,
    pub logo_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub social_links: Vec<String>,
}

impl From<&SiteSettings> for SiteConfigResponse {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            active: settings.status,
            site_name: settings.site_name.clone(),
            logo_url: settings.logo_url.clone(),
            contact_email: settings.contact_email.clone(),
            contact_phone: settings.contact_phone.clone(),
            whatsapp_number: settings.whatsapp_number.clone(),
            address: settings.address.clone(),
            social_links: settings.social_links(),
        }
    }
}

/// `GET /api/site-config`
///
/// Never fails: without readable settings the site is reported active with
/// empty branding.
#[instrument(skip(state))]
pub async fn site_config(State(state): State<AppState>) -> Json<SiteConfigResponse> {
    let settings = state.settings().settings().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load site settings for site-config");
        None
    });

    Json(settings.as_ref().map_or_else(
        || SiteConfigResponse {
            active: true,
            ..SiteConfigResponse::default()
        },
        SiteConfigResponse::from,
    ))
}

/// Query of `GET /api/public/packages`.
#[derive(Debug, Deserialize)]
pub struct PackageListQuery {
    #[serde(rename = "type")]
    pub type_slug: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A package as exposed to the public API.
#[derive(Debug, Serialize)]
pub struct PublicPackage {
    pub url: String,
    pub type_slug: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub price: String,
    pub currency: String,
    pub duration_days: i32,
    pub destinations: Vec<String>,
    pub image_url: Option<String>,
    pub highlight: wayfarer_core::PackageHighlight,
}

impl From<Package> for PublicPackage {
    fn from(package: Package) -> Self {
        Self {
            url: package.path(),
            price: package.price().amount_string(),
            type_slug: package.type_slug,
            slug: package.slug,
            title: package.title,
            summary: package.summary,
            currency: package.currency,
            duration_days: package.duration_days,
            destinations: package.destinations,
            image_url: package.image_url,
            highlight: package.highlight,
        }
    }
}

/// `GET /api/public/packages?type=&limit=&offset=`
#[instrument(skip(state))]
pub async fn packages(
    State(state): State<AppState>,
    Query(query): Query<PackageListQuery>,
) -> Result<Json<Vec<PublicPackage>>> {
    let page = Page::new(
        query.limit.unwrap_or(DEFAULT_LIMIT),
        query.offset.unwrap_or(0),
    );
    let type_slug = query.type_slug.as_deref().filter(|t| !t.is_empty());

    let packages = PackageRepository::new(state.pool())
        .list_active(type_slug, page)
        .await?;

    Ok(Json(packages.into_iter().map(PublicPackage::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::sample_settings;

    #[test]
    fn site_config_exposes_branding_only() {
        let mut settings = sample_settings();
        settings.smtp_password = Some("secret".to_string());
        let response = SiteConfigResponse::from(&settings);

        assert!(response.active);
        assert_eq!(response.site_name, "Wayfarer Viagens");
        assert_eq!(response.social_links, vec!["https://instagram.com/wayfarer"]);

        let json = serde_json::to_string(&response).unwrap_or_default();
        assert!(!json.contains("secret"));
        assert!(!json.contains("smtp"));
    }
}

//! Data every public page template needs: branding, meta tags and the
//! JSON-LD blocks for the page's path.

use tracing::{instrument, warn};

use crate::error::{AppError, Result};
use crate::models::SiteSettings;
use crate::providers::SettingsProvider;
use crate::seo::json_ld_scripts;
use crate::state::AppState;

/// Shared page chrome rendered by `base.html`.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub site_name: String,
    pub logo_url: Option<String>,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub social_links: Vec<String>,
    /// Serialized JSON-LD documents, already safe to embed in `<script>`.
    pub json_ld: Vec<String>,
}

impl PageLayout {
    /// Build the layout for `path`.
    ///
    /// `title` and `description` fall back to the site defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a catalog lookup for the structured
    /// data fails.
    #[instrument(skip(state, title, description))]
    pub async fn build(
        state: &AppState,
        path: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self> {
        let settings = match state.settings().settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to load site settings for layout");
                None
            }
        };

        let documents = state
            .seo()
            .generate(path, state.settings(), state.catalog())
            .await?
            .unwrap_or_default();
        let json_ld =
            json_ld_scripts(&documents).map_err(|e| AppError::Internal(e.to_string()))?;

        let base_url = state.config().base_url.trim_end_matches('/');
        let canonical_url = format!("{base_url}{path}");

        Ok(Self::from_settings(
            settings.as_ref(),
            title,
            description,
            canonical_url,
            json_ld,
        ))
    }

    fn from_settings(
        settings: Option<&SiteSettings>,
        title: Option<String>,
        description: Option<String>,
        canonical_url: String,
        json_ld: Vec<String>,
    ) -> Self {
        let Some(settings) = settings else {
            return Self {
                title: title.unwrap_or_default(),
                description: description.unwrap_or_default(),
                canonical_url,
                json_ld,
                ..Self::default()
            };
        };

        let title = title.map_or_else(
            || settings.default_title.clone(),
            |title| format!("{title} | {}", settings.site_name),
        );

        Self {
            site_name: settings.site_name.clone(),
            logo_url: settings.logo_url.clone(),
            title,
            description: description.unwrap_or_else(|| settings.default_description.clone()),
            canonical_url,
            contact_email: settings.contact_email.clone(),
            contact_phone: settings.contact_phone.clone(),
            whatsapp_number: settings.whatsapp_number.clone(),
            social_links: settings.social_links(),
            json_ld,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::sample_settings;

    #[test]
    fn page_title_is_suffixed_with_site_name() {
        let settings = sample_settings();
        let layout = PageLayout::from_settings(
            Some(&settings),
            Some("Cruises".to_string()),
            None,
            "https://wayfarer.travel/packages/cruises".to_string(),
            Vec::new(),
        );

        assert_eq!(layout.title, "Cruises | Wayfarer Viagens");
        assert_eq!(layout.description, "Travel packages for every season");
        assert_eq!(layout.social_links, vec!["https://instagram.com/wayfarer"]);
    }

    #[test]
    fn default_title_without_page_title() {
        let settings = sample_settings();
        let layout = PageLayout::from_settings(
            Some(&settings),
            None,
            Some("Custom".to_string()),
            String::new(),
            Vec::new(),
        );

        assert_eq!(layout.title, "Wayfarer Viagens");
        assert_eq!(layout.description, "Custom");
    }

    #[test]
    fn missing_settings_leave_branding_empty() {
        let layout = PageLayout::from_settings(
            None,
            Some("About".to_string()),
            None,
            "https://wayfarer.travel/about".to_string(),
            Vec::new(),
        );

        assert_eq!(layout.title, "About");
        assert!(layout.site_name.is_empty());
        assert!(layout.logo_url.is_none());
    }
}

//! Site-wide settings (singleton row).
//!
//! Edited from the admin area; read on every request by the access gate
//! (activation flag) and the structured data generator (branding).

use secrecy::SecretString;
use serde::Serialize;

/// The `site.settings` row.
///
/// Implements `Debug` manually to redact the SMTP password.
#[derive(Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SiteSettings {
    /// Activation flag. When `false` anonymous visitors see the maintenance page.
    pub status: bool,
    pub site_name: String,
    pub default_title: String,
    pub default_description: String,
    pub logo_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub youtube_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub whatsapp_number: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<i32>,
    pub smtp_username: Option<String>,
    #[serde(skip_serializing)]
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    /// Where contact inquiries are delivered. Falls back to `contact_email`.
    pub contact_recipient: Option<String>,
}

impl std::fmt::Debug for SiteSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteSettings")
            .field("status", &self.status)
            .field("site_name", &self.site_name)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SiteSettings {
    /// Social profile URLs in display order, skipping unset ones.
    #[must_use]
    pub fn social_links(&self) -> Vec<String> {
        [
            &self.instagram_url,
            &self.facebook_url,
            &self.youtube_url,
            &self.tiktok_url,
        ]
        .into_iter()
        .flatten()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .collect()
    }

    /// Outbound mail configuration, if every required field is present.
    #[must_use]
    pub fn smtp(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.clone().filter(|h| !h.is_empty())?;
        let from_address = self.smtp_from.clone().filter(|f| !f.is_empty())?;
        let recipient = self
            .contact_recipient
            .clone()
            .or_else(|| self.contact_email.clone())
            .filter(|r| !r.is_empty())?;

        Some(SmtpSettings {
            host,
            port: self
                .smtp_port
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(587),
            username: self.smtp_username.clone().unwrap_or_default(),
            password: SecretString::from(self.smtp_password.clone().unwrap_or_default()),
            from_address,
            recipient,
        })
    }
}

/// SMTP relay settings for contact inquiries.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    pub recipient: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("recipient", &self.recipient)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn sample_settings() -> SiteSettings {
    SiteSettings {
        status: true,
        site_name: "Wayfarer Viagens".to_string(),
        default_title: "Wayfarer Viagens".to_string(),
        default_description: "Travel packages for every season".to_string(),
        logo_url: Some("https://cdn.wayfarer.travel/logo.png".to_string()),
        contact_email: Some("hello@wayfarer.travel".to_string()),
        contact_phone: Some("+55 11 4000-0000".to_string()),
        address: None,
        instagram_url: Some("https://instagram.com/wayfarer".to_string()),
        facebook_url: None,
        youtube_url: Some(String::new()),
        tiktok_url: None,
        whatsapp_number: None,
        smtp_host: None,
        smtp_port: None,
        smtp_username: None,
        smtp_password: None,
        smtp_from: None,
        contact_recipient: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_links_skip_blank_entries() {
        let settings = sample_settings();
        assert_eq!(
            settings.social_links(),
            vec!["https://instagram.com/wayfarer".to_string()]
        );
    }

    #[test]
    fn smtp_requires_host_sender_and_recipient() {
        let mut settings = sample_settings();
        assert!(settings.smtp().is_none());

        settings.smtp_host = Some("smtp.mail.test".to_string());
        settings.smtp_from = Some("site@wayfarer.travel".to_string());
        settings.smtp_port = Some(2525);
        let smtp = settings.smtp();
        assert_eq!(smtp.as_ref().map(|s| s.port), Some(2525));
        // Falls back to the public contact address.
        assert_eq!(
            smtp.map(|s| s.recipient).as_deref(),
            Some("hello@wayfarer.travel")
        );
    }

    #[test]
    fn debug_redacts_smtp_password() {
        let mut settings = sample_settings();
        settings.smtp_password = Some("hunter2-smtp".to_string());
        let debug = format!("{settings:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2-smtp"));
    }
}

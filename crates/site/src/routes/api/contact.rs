//! Contact form endpoint.
//!
//! Validates a visitor's inquiry and emails it to the agency through the SMTP
//! relay configured in site settings.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use wayfarer_core::Email;

use crate::error::{AppError, Result};
use crate::providers::SettingsProvider;
use crate::services::mail::{ContactInquiry, ContactMailer, MailError};
use crate::state::AppState;

const MAX_NAME_CHARS: usize = 120;
const MAX_PHONE_CHARS: usize = 40;
const MAX_MESSAGE_CHARS: usize = 5000;
const MAX_PACKAGE_CHARS: usize = 200;

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    /// Title of the package the visitor is asking about.
    #[serde(default)]
    pub package: Option<String>,
}

impl ContactForm {
    /// Trim and validate into an inquiry.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for the visitor when a field is invalid.
    pub fn validate(self) -> std::result::Result<ContactInquiry, &'static str> {
        let name = self.name.trim();
        let message = self.message.trim();

        if name.is_empty() || message.is_empty() {
            return Err("Name and message are required.");
        }
        if name.chars().count() > MAX_NAME_CHARS || message.chars().count() > MAX_MESSAGE_CHARS {
            return Err("Name or message is too long.");
        }

        let email =
            Email::parse(&self.email).map_err(|_| "Please enter a valid email address.")?;

        let phone = non_empty(self.phone);
        if phone.as_ref().is_some_and(|p| p.chars().count() > MAX_PHONE_CHARS) {
            return Err("Phone number is too long.");
        }

        let package = non_empty(self.package);
        if package.as_ref().is_some_and(|p| p.chars().count() > MAX_PACKAGE_CHARS) {
            return Err("Package name is too long.");
        }

        Ok(ContactInquiry {
            name: name.to_string(),
            email,
            phone,
            message: message.to_string(),
            package,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit a contact inquiry.
///
/// POST /api/contact
///
/// # Errors
///
/// Returns 503 if SMTP is not configured and 502 if delivery fails.
#[instrument(skip(state, form), fields(package = ?form.package))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse> {
    let inquiry = match form.validate() {
        Ok(inquiry) => inquiry,
        Err(message) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ContactResponse {
                    success: false,
                    message: Some(message.to_string()),
                }),
            ));
        }
    };

    let settings = state
        .settings()
        .settings()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or(MailError::NotConfigured)?;
    let smtp = settings.smtp().ok_or(MailError::NotConfigured)?;

    ContactMailer::new(&smtp)?
        .send_inquiry(&settings.site_name, &inquiry)
        .await?;

    info!(email_domain = inquiry.email.domain(), "Contact inquiry accepted");
    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: None,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "  Ana Souza ".to_string(),
            email: "Ana@Cliente.com.br".to_string(),
            phone: Some("   ".to_string()),
            message: "Is the December departure still open?".to_string(),
            package: Some("Caribbean Cruise".to_string()),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let inquiry = form().validate().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(inquiry.name, "Ana Souza");
        assert_eq!(inquiry.phone, None);
        assert_eq!(inquiry.package.as_deref(), Some("Caribbean Cruise"));
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut missing_name = form();
        missing_name.name = " ".to_string();
        assert!(missing_name.validate().is_err());

        let mut bad_email = form();
        bad_email.email = "not-an-email".to_string();
        assert_eq!(
            bad_email.validate().err(),
            Some("Please enter a valid email address.")
        );

        let mut long_message = form();
        long_message.message = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(long_message.validate().is_err());
    }
}

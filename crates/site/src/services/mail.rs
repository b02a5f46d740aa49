//! Contact inquiry email.
//!
//! SMTP settings live in the database (`site.settings`) and are edited from
//! the back office, so a transport is built per inquiry from the current row.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::info;

use wayfarer_core::Email;

use crate::models::SmtpSettings;

/// HTML body of a contact inquiry.
#[derive(Template)]
#[template(path = "email/inquiry.html")]
struct InquiryEmailHtml<'a> {
    site_name: &'a str,
    inquiry: &'a ContactInquiry,
}

/// Plain text body of a contact inquiry.
#[derive(Template)]
#[template(path = "email/inquiry.txt")]
struct InquiryEmailText<'a> {
    site_name: &'a str,
    inquiry: &'a ContactInquiry,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP host, sender or recipient missing from site settings.
    #[error("SMTP is not configured")]
    NotConfigured,

    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A visitor's booking inquiry from the contact form.
#[derive(Debug, Clone)]
pub struct ContactInquiry {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
    /// Title of the package the visitor asked about.
    pub package: Option<String>,
}

impl ContactInquiry {
    fn subject(&self, site_name: &str) -> String {
        match &self.package {
            Some(package) => format!("[{site_name}] Inquiry about {package}"),
            None => format!("[{site_name}] New contact from {}", self.name),
        }
    }
}

/// Delivers contact inquiries to the agency's inbox.
#[derive(Clone)]
pub struct ContactMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    recipient: String,
}

impl ContactMailer {
    /// Create a mailer from the SMTP settings.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port);

        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            mailer: builder.build(),
            from_address: settings.from_address.clone(),
            recipient: settings.recipient.clone(),
        })
    }

    /// Send an inquiry to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or delivered.
    pub async fn send_inquiry(
        &self,
        site_name: &str,
        inquiry: &ContactInquiry,
    ) -> Result<(), MailError> {
        let message =
            build_inquiry_message(&self.from_address, &self.recipient, site_name, inquiry)?;
        self.mailer.send(message).await?;

        info!(recipient = %self.recipient, package = ?inquiry.package, "Contact inquiry sent");
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

/// Build the multipart inquiry message. Replies go to the visitor.
///
/// # Errors
///
/// Returns error if an address is invalid or a template fails to render.
pub fn build_inquiry_message(
    from: &str,
    to: &str,
    site_name: &str,
    inquiry: &ContactInquiry,
) -> Result<Message, MailError> {
    let html = InquiryEmailHtml { site_name, inquiry }.render()?;
    let text = InquiryEmailText { site_name, inquiry }.render()?;

    let message = Message::builder()
        .from(mailbox(from)?)
        .reply_to(mailbox(inquiry.email.as_str())?)
        .to(mailbox(to)?)
        .subject(inquiry.subject(site_name))
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html),
                ),
        )?;

    Ok(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inquiry(package: Option<&str>) -> ContactInquiry {
        ContactInquiry {
            name: "Ana <Souza>".to_string(),
            email: Email::parse("ana@cliente.com.br").unwrap(),
            phone: Some("+55 21 99999-0000".to_string()),
            message: "Do you have dates in July?".to_string(),
            package: package.map(String::from),
        }
    }

    #[test]
    fn subject_mentions_the_package() {
        assert_eq!(
            inquiry(Some("Caribbean Cruise")).subject("Wayfarer"),
            "[Wayfarer] Inquiry about Caribbean Cruise"
        );
        assert_eq!(
            inquiry(None).subject("Wayfarer"),
            "[Wayfarer] New contact from Ana <Souza>"
        );
    }

    #[test]
    fn message_replies_to_the_visitor() {
        let message = build_inquiry_message(
            "site@wayfarer.travel",
            "sales@wayfarer.travel",
            "Wayfarer",
            &inquiry(Some("Caribbean Cruise")),
        )
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To: ana@cliente.com.br"));
        assert!(raw.contains("To: sales@wayfarer.travel"));
        assert!(raw.contains("Do you have dates in July?"));
        // The HTML part escapes visitor input.
        assert!(raw.contains("Ana &lt;Souza&gt;") || raw.contains("Ana &#60;Souza&#62;"));
    }

    #[test]
    fn invalid_sender_is_reported() {
        let result = build_inquiry_message(
            "not an address",
            "sales@wayfarer.travel",
            "Wayfarer",
            &inquiry(None),
        );
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }
}

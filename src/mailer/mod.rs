use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

const ATTACHMENT_NAME: &str = "ticket.pdf";

const BODY_TEXT: &str = "Please find your flight ticket attached to this email.";

const BODY_HTML: &str = r#"<div style="font-family: Arial, sans-serif; color: #333;">
  <h2>Your Flight Ticket</h2>
  <p>Thank you for booking with us. Your flight ticket is attached to this email.</p>
  <p>If you have any questions, please don't hesitate to contact us.</p>
  <br>
  <p style="color: #666;">Best regards,</p>
  <p style="color: #666;">MAZ Travel Team</p>
</div>"#;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay is not configured: {0}")]
    Config(&'static str),

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not assemble message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Stateless relay client. Each send is a single attempt with the
/// transport's default timeouts; there is no retry and no idempotency key,
/// so a manual re-attempt may deliver twice.
#[derive(Clone)]
pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Relays the rendered ticket as a PDF attachment to `recipient`.
    pub async fn send_ticket(
        &self,
        document: Vec<u8>,
        recipient: &str,
        subject: &str,
    ) -> Result<(), MailError> {
        let host = self
            .config
            .host
            .as_deref()
            .ok_or(MailError::Config("SMTP_HOST is not set"))?;
        let username = self
            .config
            .username
            .as_deref()
            .ok_or(MailError::Config("SMTP_USERNAME is not set"))?;
        let password = self
            .config
            .password
            .as_deref()
            .ok_or(MailError::Config("SMTP_PASSWORD is not set"))?;
        let from = self
            .config
            .from
            .as_deref()
            .ok_or(MailError::Config("SMTP_FROM is not set"))?;

        let message = Message::builder()
            .from(from.parse::<Mailbox>()?)
            .to(recipient.parse::<Mailbox>()?)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .multipart(MultiPart::alternative_plain_html(
                        BODY_TEXT.to_string(),
                        BODY_HTML.to_string(),
                    ))
                    .singlepart(
                        Attachment::new(ATTACHMENT_NAME.to_string())
                            .body(document, pdf_content_type()),
                    ),
            )?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(self.config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        let response = transport.send(message).await?;
        info!(code = %response.code(), to = %recipient, "ticket email relayed");
        Ok(())
    }
}

fn pdf_content_type() -> ContentType {
    ContentType::parse("application/pdf").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> SmtpConfig {
        SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            port: 587,
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
            from: Some("tickets@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_missing_host_is_a_config_error() {
        let mailer = Mailer::new(SmtpConfig {
            host: None,
            ..configured()
        });
        let result = mailer
            .send_ticket(b"%PDF".to_vec(), "pax@example.com", "Flight Ticket")
            .await;
        assert!(matches!(result, Err(MailError::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials_are_a_config_error() {
        let mailer = Mailer::new(SmtpConfig {
            username: None,
            ..configured()
        });
        let result = mailer
            .send_ticket(b"%PDF".to_vec(), "pax@example.com", "Flight Ticket")
            .await;
        assert!(matches!(result, Err(MailError::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_an_address_error() {
        let mailer = Mailer::new(configured());
        let result = mailer
            .send_ticket(b"%PDF".to_vec(), "not-an-address", "Flight Ticket")
            .await;
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    #[test]
    fn test_pdf_content_type_parses() {
        let _ = pdf_content_type();
    }
}

//! Alert email over SMTP.
//!
//! The relay transport is built once in [`EmailDelivery::new`] and reused for
//! every alert. Messages are plain text; subjects and bodies arrive already
//! rendered by the dispatcher.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

const DEFAULT_PORT: u16 = 587;
const DEFAULT_SENDER: &str = "noreply@revalert.local";

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP relay failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Invalid mailbox: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error("Could not assemble alert email: {0}")]
    Message(#[from] lettre::error::Error),
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    /// Sender mailbox shown to store owners.
    pub sender: String,
    /// Username and password, when the relay requires login.
    pub credentials: Option<(String, String)>,
}

impl EmailConfig {
    /// Read relay settings from `SMTP_HOST`, `SMTP_PORT`, `SMTP_FROM`,
    /// `SMTP_USER` and `SMTP_PASSWORD`.
    ///
    /// `None` when `SMTP_HOST` is unset. Credentials are used only when both
    /// user and password are present.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let sender = std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_SENDER.to_string());
        let credentials = std::env::var("SMTP_USER")
            .ok()
            .zip(std::env::var("SMTP_PASSWORD").ok());

        Some(Self {
            host,
            port,
            sender,
            credentials,
        })
    }
}

/// STARTTLS relay client for alert emails.
pub struct EmailDelivery {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);
        if let Some((user, password)) = config.credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            transport: builder.build(),
            sender: config.sender,
        })
    }

    fn compose(&self, to: &str, subject: &str, body: &str) -> Result<Message, EmailError> {
        let message = Message::builder()
            .from(self.sender.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        Ok(message)
    }

    /// Send one alert. A single attempt; the caller records any failure.
    pub async fn deliver(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = self.compose(to, subject, body)?;
        self.transport.send(message).await?;
        tracing::info!(to, subject, "Alert email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn delivery() -> EmailDelivery {
        EmailDelivery::new(EmailConfig {
            host: "smtp.example.com".to_string(),
            port: DEFAULT_PORT,
            sender: DEFAULT_SENDER.to_string(),
            credentials: Some(("alerts".to_string(), "secret".to_string())),
        })
        .unwrap()
    }

    #[test]
    fn unset_host_disables_email() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn compose_addresses_owner_from_sender() {
        let message = delivery()
            .compose("owner@example.com", "【Demo】星1の口コミを受信しました", "body")
            .unwrap();
        let envelope = message.envelope();

        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "owner@example.com");
        assert_eq!(
            envelope.from().map(ToString::to_string).as_deref(),
            Some(DEFAULT_SENDER)
        );
    }

    #[test]
    fn compose_rejects_malformed_recipient() {
        let err = delivery().compose("owner-at-example", "s", "b").unwrap_err();
        assert_matches!(err, EmailError::InvalidAddress(_));
        assert!(err.to_string().starts_with("Invalid mailbox"));
    }

    #[test]
    fn malformed_sender_is_reported_per_send() {
        let delivery = EmailDelivery::new(EmailConfig {
            host: "smtp.example.com".to_string(),
            port: 2525,
            sender: "alerts".to_string(),
            credentials: None,
        })
        .unwrap();
        assert_matches!(
            delivery.compose("owner@example.com", "s", "b"),
            Err(EmailError::InvalidAddress(_))
        );
    }
}

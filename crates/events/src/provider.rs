//! Transport seam between the dispatcher and real senders.
//!
//! [`NotificationProvider`] is what the dispatcher talks to. A provider call
//! is a single atomic attempt: retries and timeouts are the provider's own
//! business. Returning `Err` is how a provider reports a transport failure;
//! the dispatcher turns it into a failed outcome and carries on.

use async_trait::async_trait;
use revalert_core::channels::Channel;
use revalert_core::outcome::NotificationOutcome;

use crate::delivery::email::{EmailDelivery, EmailError};
use crate::delivery::sms::{SmsDelivery, SmsError};

/// Log previews are cut to this many characters.
const PREVIEW_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a failed provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Sms(#[from] SmsError),

    /// No transport is wired up for the channel.
    #[error("No {0} transport configured")]
    NotConfigured(Channel),

    /// The provider refused the message.
    #[error("{0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Sends alerts over email and SMS.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Send one email.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotificationOutcome, ProviderError>;

    /// Send one SMS.
    async fn send_sms(&self, to: &str, message: &str) -> Result<NotificationOutcome, ProviderError>;
}

// ---------------------------------------------------------------------------
// LoggingProvider
// ---------------------------------------------------------------------------

/// Placeholder provider that only logs and always reports success.
///
/// For local development and tests, where no SMTP server or SMS gateway is
/// configured. Never use it in production: alerts go nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingProvider;

#[async_trait]
impl NotificationProvider for LoggingProvider {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotificationOutcome, ProviderError> {
        tracing::info!(to, subject, body = %preview(body), "Email send (placeholder)");
        Ok(NotificationOutcome::sent(Channel::Email))
    }

    async fn send_sms(&self, to: &str, message: &str) -> Result<NotificationOutcome, ProviderError> {
        tracing::info!(to, message = %preview(message), "SMS send (placeholder)");
        Ok(NotificationOutcome::sent(Channel::Sms))
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().nth(PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

// ---------------------------------------------------------------------------
// TransportProvider
// ---------------------------------------------------------------------------

/// Real provider composed of an SMTP mailer and an SMS gateway client.
///
/// Either half may be missing; calls on a missing half fail with
/// [`ProviderError::NotConfigured`].
pub struct TransportProvider {
    email: Option<EmailDelivery>,
    sms: Option<SmsDelivery>,
}

impl TransportProvider {
    pub fn new(email: Option<EmailDelivery>, sms: Option<SmsDelivery>) -> Self {
        Self { email, sms }
    }

    /// Return `true` if neither transport is configured.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.sms.is_none()
    }
}

#[async_trait]
impl NotificationProvider for TransportProvider {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotificationOutcome, ProviderError> {
        let mailer = self
            .email
            .as_ref()
            .ok_or(ProviderError::NotConfigured(Channel::Email))?;
        mailer.deliver(to, subject, body).await?;
        Ok(NotificationOutcome::sent(Channel::Email))
    }

    async fn send_sms(&self, to: &str, message: &str) -> Result<NotificationOutcome, ProviderError> {
        let gateway = self
            .sms
            .as_ref()
            .ok_or(ProviderError::NotConfigured(Channel::Sms))?;
        gateway.deliver(to, message).await?;
        Ok(NotificationOutcome::sent(Channel::Sms))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

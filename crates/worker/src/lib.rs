//! Wiring for the review alert worker binary.

pub mod config;
pub mod feed;

use std::sync::Arc;

use revalert_events::{
    EmailConfig, EmailDelivery, EmailError, LoggingProvider, NotificationProvider, SmsDelivery,
    SmsError, SmsGatewayConfig, TransportProvider,
};

/// Why the worker could not assemble a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderSetupError {
    #[error("SMTP transport: {0}")]
    Email(#[from] EmailError),

    #[error("SMS gateway: {0}")]
    Sms(#[from] SmsError),

    #[error("No SMTP_HOST or SMS_GATEWAY_URL configured; set ALERTS_DRY_RUN=1 to only log alerts")]
    NoTransport,
}

/// Build the provider from configured transports.
///
/// With `dry_run` every alert is logged by [`LoggingProvider`] and nothing is
/// sent, whatever transports are configured. Without it at least one
/// transport is required.
pub fn build_provider(
    email: Option<EmailConfig>,
    sms: Option<SmsGatewayConfig>,
    dry_run: bool,
) -> Result<Arc<dyn NotificationProvider>, ProviderSetupError> {
    if dry_run {
        tracing::warn!("ALERTS_DRY_RUN is set, alerts will only be logged");
        return Ok(Arc::new(LoggingProvider));
    }

    let email = email.map(EmailDelivery::new).transpose()?;
    let sms = sms.map(SmsDelivery::new).transpose()?;
    let transport = TransportProvider::new(email, sms);
    if transport.is_empty() {
        return Err(ProviderSetupError::NoTransport);
    }
    Ok(Arc::new(transport))
}

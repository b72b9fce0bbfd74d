use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use revalert_core::channels::Channel;
use revalert_core::outcome::NotificationOutcome;
use revalert_events::{NotificationProvider, ProviderError};

/// One call made to [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Email { to: String, subject: String },
    Sms { to: String, message: String },
}

/// Provider that records every call and fails on request.
#[derive(Default)]
pub struct ScriptedProvider {
    pub fail_email: bool,
    pub fail_sms: bool,
    /// Pause inside each send, to keep a dispatch in flight.
    pub latency: Option<Duration>,
    pub log: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl NotificationProvider for ScriptedProvider {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        _body: &str,
    ) -> Result<NotificationOutcome, ProviderError> {
        self.record(Call::Email {
            to: to.to_string(),
            subject: subject.to_string(),
        })
        .await;
        if self.fail_email {
            return Err(ProviderError::Rejected("smtp unavailable".to_string()));
        }
        Ok(NotificationOutcome::sent(Channel::Email))
    }

    async fn send_sms(&self, to: &str, message: &str) -> Result<NotificationOutcome, ProviderError> {
        self.record(Call::Sms {
            to: to.to_string(),
            message: message.to_string(),
        })
        .await;
        if self.fail_sms {
            return Err(ProviderError::Rejected("gateway unavailable".to_string()));
        }
        Ok(NotificationOutcome::sent(Channel::Sms))
    }
}

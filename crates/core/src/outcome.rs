//! Per-channel dispatch results and the follow-up they imply for the caller.

use serde::{Deserialize, Serialize};

use crate::channels::Channel;

/// Result of one send attempt on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub channel: Channel,
    pub sent: bool,
    /// Why the send did not happen, when `sent` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotificationOutcome {
    /// A successful send.
    pub fn sent(channel: Channel) -> Self {
        Self {
            channel,
            sent: true,
            error: None,
        }
    }

    /// A send that did not happen.
    pub fn failed(channel: Channel, error: impl Into<String>) -> Self {
        Self {
            channel,
            sent: false,
            error: Some(error.into()),
        }
    }
}

/// State the caller must persist after a dispatch.
///
/// The dispatcher never writes state itself. Touching `last_notified_at` and
/// bumping the monthly SMS counter happen here, after the outcomes are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowUp {
    /// Set `last_notified_at = now`: any channel was attempted.
    pub touch_last_notified: bool,
    /// Add one to the monthly SMS counter: an SMS actually went out.
    pub increment_sms: bool,
}

impl FollowUp {
    pub fn from_outcomes(outcomes: &[NotificationOutcome]) -> Self {
        Self {
            touch_last_notified: !outcomes.is_empty(),
            increment_sms: outcomes
                .iter()
                .any(|o| o.channel == Channel::Sms && o.sent),
        }
    }
}

//! Delivery channels a review alert can go out on.
//!
//! The string forms must match the `channel` values written into outcome
//! logs and reported back to callers.

use serde::{Deserialize, Serialize};

/// Email notification delivered via SMTP.
pub const CHANNEL_EMAIL: &str = "email";

/// SMS notification delivered via the SMS gateway.
pub const CHANNEL_SMS: &str = "sms";

/// A notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => CHANNEL_EMAIL,
            Self::Sms => CHANNEL_SMS,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

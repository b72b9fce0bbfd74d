//! Per-store notification preferences.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::silent_hours::SilentHours;
use crate::types::Timestamp;

/// Lowest star rating a review can carry.
pub const MIN_RATING: u8 = 1;

/// Highest star rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// Notification preferences for one store.
///
/// Contact strings are stored as typed by the owner and are not guaranteed to
/// be valid; senders must check them right before sending. The `*_verified`
/// flags belong to a separate verification workflow and do not affect the
/// notification decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub email_address: String,
    pub phone_number: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    /// Ratings that trigger an alert.
    pub target_stars: BTreeSet<u8>,
    pub silent_hours: SilentHours,
    /// Most recent instant an alert was dispatched for this store.
    pub last_notified_at: Option<Timestamp>,
}

impl Default for NotificationConfig {
    /// Both channels off, alerting on 1 and 2 star reviews, silent overnight.
    fn default() -> Self {
        Self {
            email_enabled: false,
            sms_enabled: false,
            email_address: String::new(),
            phone_number: String::new(),
            email_verified: false,
            phone_verified: false,
            target_stars: BTreeSet::from([1, 2]),
            silent_hours: SilentHours::default(),
            last_notified_at: None,
        }
    }
}

impl NotificationConfig {
    /// Reject target stars outside `1..=5`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(star) = self
            .target_stars
            .iter()
            .find(|s| !(MIN_RATING..=MAX_RATING).contains(*s))
        {
            return Err(CoreError::Validation(format!(
                "Target star {star} is outside {MIN_RATING}..={MAX_RATING}"
            )));
        }
        Ok(())
    }

    /// Return `true` if at least one channel is switched on.
    pub fn any_channel_enabled(&self) -> bool {
        self.email_enabled || self.sms_enabled
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_targets_low_ratings() {
        let config = NotificationConfig::default();
        assert!(!config.any_channel_enabled());
        assert_eq!(config.target_stars, BTreeSet::from([1, 2]));
        assert!(config.last_notified_at.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_and_six() {
        let mut config = NotificationConfig::default();
        config.target_stars.insert(0);
        assert_matches!(config.validate(), Err(CoreError::Validation(_)));

        let mut config = NotificationConfig::default();
        config.target_stars.insert(6);
        assert_matches!(config.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duplicate_target_stars_collapse() {
        let config: NotificationConfig = serde_json::from_value(serde_json::json!({
            "email_enabled": true,
            "target_stars": [1, 1, 2, 2],
        }))
        .unwrap();
        assert_eq!(config.target_stars.len(), 2);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: NotificationConfig =
            serde_json::from_value(serde_json::json!({"sms_enabled": true})).unwrap();
        assert!(config.sms_enabled);
        assert_eq!(config.silent_hours, SilentHours::default());
        assert_eq!(config.target_stars, BTreeSet::from([1, 2]));
    }

    #[test]
    fn last_notified_at_parses_iso8601() {
        let config: NotificationConfig = serde_json::from_value(serde_json::json!({
            "last_notified_at": "2026-03-01T05:00:00+09:00",
        }))
        .unwrap();
        let at = config.last_notified_at.unwrap();
        assert_eq!(at.to_rfc3339(), "2026-02-28T20:00:00+00:00");
    }
}

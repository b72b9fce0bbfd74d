//! Review alert dispatch.
//!
//! [`dispatch`] runs the policy, renders the content once, and attempts each
//! eligible channel in a fixed order: email, then SMS, then the quota fallback
//! email. Every provider failure becomes a recorded outcome; nothing is
//! returned as an error and nothing is persisted here.

use chrono::{DateTime, FixedOffset};
use revalert_core::channels::Channel;
use revalert_core::config::NotificationConfig;
use revalert_core::content::{build_content, build_fallback_content, build_sms_message};
use revalert_core::outcome::NotificationOutcome;
use revalert_core::policy;
use revalert_core::quota::{can_send_sms, quota_exceeded_message, SmsUsage};
use revalert_core::review::ReviewEvent;
use revalert_core::validation::{is_valid_email, is_valid_phone};

use crate::provider::{NotificationProvider, ProviderError};

/// Return `true` if the email channel is on and has a usable address.
pub fn email_eligible(config: &NotificationConfig) -> bool {
    config.email_enabled
        && !config.email_address.is_empty()
        && is_valid_email(&config.email_address)
}

/// Return `true` if the SMS channel is on and has a usable number.
pub fn sms_eligible(config: &NotificationConfig) -> bool {
    config.sms_enabled && !config.phone_number.is_empty() && is_valid_phone(&config.phone_number)
}

/// Decide and send alerts for one review.
///
/// Returns one outcome per attempted send, ordered email, SMS, fallback email.
/// An empty list means the policy declined (or no channel had a usable
/// contact). The caller persists `last_notified_at` and the SMS counter based
/// on the outcomes; see [`FollowUp`](revalert_core::outcome::FollowUp).
pub async fn dispatch(
    review: &ReviewEvent,
    config: &NotificationConfig,
    sms_usage: &SmsUsage,
    provider: &dyn NotificationProvider,
    now: DateTime<FixedOffset>,
) -> Vec<NotificationOutcome> {
    if let Err(reason) = policy::evaluate(review.rating, config, now) {
        tracing::debug!(
            review_id = %review.review_id,
            rating = review.rating,
            ?reason,
            "Review alert suppressed"
        );
        return Vec::new();
    }

    let content = build_content(review);
    let mut outcomes = Vec::new();

    let send_email_to = email_eligible(config).then(|| config.email_address.trim());
    if config.email_enabled && send_email_to.is_none() {
        tracing::debug!(review_id = %review.review_id, "Email enabled without a valid address, skipping");
    }

    // Email.
    if let Some(to) = send_email_to {
        let result = provider.send_email(to, &content.subject, &content.body).await;
        outcomes.push(record(Channel::Email, result));
    }

    // SMS, gated by the monthly quota.
    if sms_eligible(config) {
        let to = config.phone_number.trim();

        if can_send_sms(sms_usage) {
            let message = build_sms_message(review);
            let result = provider.send_sms(to, &message).await;
            outcomes.push(record(Channel::Sms, result));
        } else {
            tracing::warn!(
                review_id = %review.review_id,
                limit = sms_usage.limit,
                sent = sms_usage.sent,
                "SMS quota exhausted"
            );
            outcomes.push(NotificationOutcome::failed(
                Channel::Sms,
                quota_exceeded_message(sms_usage.limit),
            ));

            if let Some(to) = send_email_to {
                let fallback = build_fallback_content(&content, review, sms_usage.limit);
                match provider.send_email(to, &fallback.subject, &fallback.body).await {
                    Ok(outcome) => outcomes.push(NotificationOutcome {
                        channel: Channel::Email,
                        ..outcome
                    }),
                    // Best effort: the SMS failure is already recorded.
                    Err(e) => {
                        tracing::warn!(error = %e, "Quota fallback email failed");
                    }
                }
            }
        }
    } else if config.sms_enabled {
        tracing::debug!(review_id = %review.review_id, "SMS enabled without a valid number, skipping");
    }

    outcomes
}

/// Turn a provider result into the outcome recorded for `channel`.
fn record(
    channel: Channel,
    result: Result<NotificationOutcome, ProviderError>,
) -> NotificationOutcome {
    match result {
        Ok(outcome) => NotificationOutcome { channel, ..outcome },
        Err(e) => {
            tracing::warn!(%channel, error = %e, "Alert send failed");
            NotificationOutcome::failed(channel, e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! End-to-end dispatch behaviour against a scripted provider.

mod common;

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use common::{Call, ScriptedProvider};
use revalert_core::channels::Channel;
use revalert_core::config::NotificationConfig;
use revalert_core::outcome::{FollowUp, NotificationOutcome};
use revalert_core::policy::should_notify;
use revalert_core::quota::SmsUsage;
use revalert_core::review::ReviewEvent;
use revalert_core::silent_hours::SilentHours;
use revalert_events::{dispatch, LoggingProvider};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 1, h, m, 0)
        .unwrap()
}

fn review(rating: u8) -> ReviewEvent {
    ReviewEvent {
        review_id: "review-1".to_string(),
        rating,
        reviewer_name: "Guest".to_string(),
        review_text: "The soup was cold.".to_string(),
        store_name: "Demo".to_string(),
        received_at: Utc.with_ymd_and_hms(2026, 3, 1, 4, 55, 0).unwrap(),
    }
}

fn email_only() -> NotificationConfig {
    NotificationConfig {
        email_enabled: true,
        sms_enabled: false,
        email_address: "a@b.com".to_string(),
        email_verified: true,
        target_stars: BTreeSet::from([1, 2]),
        silent_hours: SilentHours::parse("23:00", "08:00").unwrap(),
        last_notified_at: None,
        ..NotificationConfig::default()
    }
}

fn both_channels() -> NotificationConfig {
    NotificationConfig {
        sms_enabled: true,
        phone_number: "+819012345678".to_string(),
        ..email_only()
    }
}

fn quota_left() -> SmsUsage {
    SmsUsage::new(3, 10)
}

fn quota_spent() -> SmsUsage {
    SmsUsage {
        sent: 10,
        limit: 10,
        remaining: 0,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn end_to_end_email_only() {
    let provider = ScriptedProvider::default();
    let config = email_only();

    assert!(should_notify(1, &config, at(14, 0)));

    let outcomes = dispatch(&review(1), &config, &quota_left(), &provider, at(14, 0)).await;
    assert_eq!(outcomes, vec![NotificationOutcome::sent(Channel::Email)]);
    assert_eq!(
        provider.calls(),
        vec![Call::Email {
            to: "a@b.com".to_string(),
            subject: "【Demo】星1の口コミを受信しました".to_string(),
        }]
    );
}

#[tokio::test]
async fn both_channels_send_in_order() {
    let provider = ScriptedProvider::default();
    let outcomes = dispatch(&review(2), &both_channels(), &quota_left(), &provider, at(14, 0)).await;

    assert_eq!(
        outcomes,
        vec![
            NotificationOutcome::sent(Channel::Email),
            NotificationOutcome::sent(Channel::Sms),
        ]
    );
    assert_eq!(
        provider.calls()[1],
        Call::Sms {
            to: "+819012345678".to_string(),
            message: "【Demo】星2の口コミを受信。管理画面で確認してください。".to_string(),
        }
    );
}

#[tokio::test]
async fn quota_exhaustion_falls_back_to_email() {
    let provider = ScriptedProvider::default();
    let outcomes = dispatch(&review(1), &both_channels(), &quota_spent(), &provider, at(14, 0)).await;

    assert_eq!(
        outcomes,
        vec![
            NotificationOutcome::sent(Channel::Email),
            NotificationOutcome::failed(Channel::Sms, "quota exceeded (limit=10)"),
            NotificationOutcome::sent(Channel::Email),
        ]
    );

    let calls = provider.calls();
    assert_eq!(calls.len(), 2, "no SMS call once the quota is spent");
    assert_eq!(
        calls[1],
        Call::Email {
            to: "a@b.com".to_string(),
            subject: "【SMS枠切れ通知】Demo - 新しい口コミがあります".to_string(),
        }
    );
    assert!(!FollowUp::from_outcomes(&outcomes).increment_sms);
}

#[tokio::test]
async fn quota_exhaustion_without_email_records_only_sms_failure() {
    let provider = ScriptedProvider::default();
    let config = NotificationConfig {
        email_enabled: false,
        ..both_channels()
    };
    let outcomes = dispatch(&review(1), &config, &quota_spent(), &provider, at(14, 0)).await;

    assert_eq!(
        outcomes,
        vec![NotificationOutcome::failed(Channel::Sms, "quota exceeded (limit=10)")]
    );
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn failed_fallback_is_swallowed() {
    let provider = ScriptedProvider {
        fail_email: true,
        ..ScriptedProvider::default()
    };
    let outcomes = dispatch(&review(1), &both_channels(), &quota_spent(), &provider, at(14, 0)).await;

    // Primary email failure is recorded, the fallback failure is not.
    assert_eq!(
        outcomes,
        vec![
            NotificationOutcome::failed(Channel::Email, "smtp unavailable"),
            NotificationOutcome::failed(Channel::Sms, "quota exceeded (limit=10)"),
        ]
    );
    assert_eq!(provider.calls().len(), 2);
}

#[tokio::test]
async fn email_failure_does_not_stop_sms() {
    let provider = ScriptedProvider {
        fail_email: true,
        ..ScriptedProvider::default()
    };
    let outcomes = dispatch(&review(1), &both_channels(), &quota_left(), &provider, at(14, 0)).await;

    assert_eq!(
        outcomes,
        vec![
            NotificationOutcome::failed(Channel::Email, "smtp unavailable"),
            NotificationOutcome::sent(Channel::Sms),
        ]
    );

    let follow_up = FollowUp::from_outcomes(&outcomes);
    assert!(follow_up.touch_last_notified);
    assert!(follow_up.increment_sms);
}

#[tokio::test]
async fn sms_failure_is_recorded() {
    let provider = ScriptedProvider {
        fail_sms: true,
        ..ScriptedProvider::default()
    };
    let outcomes = dispatch(&review(1), &both_channels(), &quota_left(), &provider, at(14, 0)).await;

    assert_eq!(
        outcomes,
        vec![
            NotificationOutcome::sent(Channel::Email),
            NotificationOutcome::failed(Channel::Sms, "gateway unavailable"),
        ]
    );
    assert!(!FollowUp::from_outcomes(&outcomes).increment_sms);
}

#[tokio::test]
async fn declined_policy_makes_no_calls() {
    let provider = ScriptedProvider::default();

    // Untargeted rating.
    let outcomes = dispatch(&review(5), &both_channels(), &quota_left(), &provider, at(14, 0)).await;
    assert!(outcomes.is_empty());

    // Silent hours.
    let outcomes = dispatch(&review(1), &both_channels(), &quota_left(), &provider, at(23, 30)).await;
    assert!(outcomes.is_empty());

    // Cooldown.
    let config = NotificationConfig {
        last_notified_at: Some(at(13, 58).with_timezone(&Utc)),
        ..both_channels()
    };
    let outcomes = dispatch(&review(1), &config, &quota_left(), &provider, at(14, 0)).await;
    assert!(outcomes.is_empty());

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn malformed_contacts_are_skipped_silently() {
    let provider = ScriptedProvider::default();
    let config = NotificationConfig {
        email_address: "not-an-email".to_string(),
        phone_number: "12345".to_string(),
        ..both_channels()
    };
    let outcomes = dispatch(&review(1), &config, &quota_left(), &provider, at(14, 0)).await;

    assert!(outcomes.is_empty());
    assert!(provider.calls().is_empty());
    assert!(!FollowUp::from_outcomes(&outcomes).touch_last_notified);
}

#[tokio::test]
async fn repeated_dispatch_with_same_inputs_is_identical() {
    let provider = ScriptedProvider::default();
    let config = both_channels();

    let first = dispatch(&review(1), &config, &quota_left(), &provider, at(14, 0)).await;
    let second = dispatch(&review(1), &config, &quota_left(), &provider, at(14, 0)).await;

    assert_eq!(first, second);
    assert_eq!(provider.calls().len(), 4);
}

#[tokio::test]
async fn placeholder_provider_reports_success() {
    let outcomes = dispatch(
        &review(1),
        &both_channels(),
        &quota_left(),
        &LoggingProvider,
        at(14, 0),
    )
    .await;
    assert!(outcomes.iter().all(|o| o.sent));
    assert_eq!(outcomes.len(), 2);
}

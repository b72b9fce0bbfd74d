//! Monthly SMS quota.
//!
//! The guard itself is trivial; the interesting behaviour is in how the
//! dispatcher reacts to a blocked quota (email fallback). The usage snapshot is
//! read-only here. Incrementing the persistent counter after a successful
//! send is the caller's job.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// SMS allowance used when a store has neither a plan limit nor an override.
pub const DEFAULT_SMS_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Billing plan tiers with their monthly SMS allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    #[default]
    Basic,
    Premium,
    Enterprise,
}

impl PlanType {
    /// Monthly SMS allowance for the plan. `Free` cannot send SMS at all.
    pub fn sms_monthly_limit(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Basic => 10,
            Self::Premium => 20,
            Self::Enterprise => 50,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }

    /// Parse the lowercase plan name stored alongside store settings.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "free" => Ok(Self::Free),
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(CoreError::Validation(format!("Unknown plan type: {other}"))),
        }
    }
}

/// Resolve the effective monthly limit. A per-store override always wins.
pub fn effective_sms_limit(plan: PlanType, limit_override: Option<u32>) -> u32 {
    limit_override.unwrap_or_else(|| plan.sms_monthly_limit())
}

/// Billing-period key for the usage counter, e.g. `"2026-02"`.
pub fn usage_month(date: impl Datelike) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

// ---------------------------------------------------------------------------
// Usage snapshot
// ---------------------------------------------------------------------------

/// Point-in-time SMS usage for the current billing month.
///
/// `remaining` must equal `max(0, limit - sent)`; use [`SmsUsage::new`] to
/// derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsUsage {
    /// Messages already counted this period.
    pub sent: u32,
    /// Monthly cap. `0` disables the channel entirely.
    pub limit: u32,
    /// Messages still allowed this period.
    pub remaining: u32,
}

impl SmsUsage {
    pub fn new(sent: u32, limit: u32) -> Self {
        Self {
            sent,
            limit,
            remaining: limit.saturating_sub(sent),
        }
    }
}

/// Outcome of a quota check, with a human-readable reason when blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaCheck {
    pub allowed: bool,
    pub usage: SmsUsage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Return `true` if the SMS channel has allowance left this month.
pub fn can_send_sms(usage: &SmsUsage) -> bool {
    usage.remaining > 0
}

/// Messages still allowed this month.
pub fn remaining_sms_count(usage: &SmsUsage) -> u32 {
    usage.remaining
}

/// Error text recorded on an SMS outcome blocked by quota.
pub fn quota_exceeded_message(limit: u32) -> String {
    format!("quota exceeded (limit={limit})")
}

/// Check the quota and explain a refusal.
pub fn check_quota(usage: SmsUsage) -> QuotaCheck {
    if can_send_sms(&usage) {
        return QuotaCheck {
            allowed: true,
            usage,
            reason: None,
        };
    }
    QuotaCheck {
        allowed: false,
        usage,
        reason: Some(quota_exceeded_message(usage.limit)),
    }
}

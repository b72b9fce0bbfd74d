//! Monthly SMS usage model.

use revalert_core::quota::SmsUsage;
use revalert_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `store_usage` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreUsage {
    pub id: DbId,
    pub store_id: DbId,
    /// Billing month, `YYYY-MM`.
    pub usage_month: String,
    pub sms_sent_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoreUsage {
    /// Snapshot the counter against the store's effective limit.
    pub fn snapshot(&self, limit: u32) -> SmsUsage {
        SmsUsage::new(sent_count(self.sms_sent_count), limit)
    }
}

/// SMS usage for display alongside plan settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsUsageSummary {
    pub sent: u32,
    pub limit: u32,
    pub remaining: u32,
    pub usage_month: String,
}

impl SmsUsageSummary {
    pub fn new(sms_sent_count: i32, limit: u32, usage_month: impl Into<String>) -> Self {
        let usage = SmsUsage::new(sent_count(sms_sent_count), limit);
        Self {
            sent: usage.sent,
            limit: usage.limit,
            remaining: usage.remaining,
            usage_month: usage_month.into(),
        }
    }
}

/// The column has a `>= 0` check; clamp anyway rather than wrap.
fn sent_count(raw: i32) -> u32 {
    u32::try_from(raw).unwrap_or(0)
}

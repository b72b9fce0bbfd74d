//! Repository for the `store_usage` table.

use revalert_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::store_usage::{SmsUsageSummary, StoreUsage};

/// Column list for `store_usage` queries.
const COLUMNS: &str = "id, store_id, usage_month, sms_sent_count, created_at, updated_at";

/// Reads and bumps the monthly SMS counter.
pub struct StoreUsageRepo;

impl StoreUsageRepo {
    /// Get the usage row for a month, creating it at zero if absent.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so concurrent first reads of a month still see one row.
    pub async fn get_or_create<'e>(
        executor: impl PgExecutor<'e>,
        store_id: DbId,
        usage_month: &str,
    ) -> Result<StoreUsage, sqlx::Error> {
        let query = format!(
            "INSERT INTO store_usage (store_id, usage_month) \
             VALUES ($1, $2) \
             ON CONFLICT (store_id, usage_month) DO UPDATE SET \
                updated_at = store_usage.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoreUsage>(&query)
            .bind(store_id)
            .bind(usage_month)
            .fetch_one(executor)
            .await
    }

    /// Atomically add one sent SMS to the month's counter.
    ///
    /// Returns the new count.
    pub async fn increment_sms_count<'e>(
        executor: impl PgExecutor<'e>,
        store_id: DbId,
        usage_month: &str,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO store_usage (store_id, usage_month, sms_sent_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (store_id, usage_month) DO UPDATE SET \
                sms_sent_count = store_usage.sms_sent_count + 1, \
                updated_at = NOW() \
             RETURNING sms_sent_count",
        )
        .bind(store_id)
        .bind(usage_month)
        .fetch_one(executor)
        .await
    }

    /// Usage summary for a month. A missing row reads as nothing sent.
    pub async fn summary(
        pool: &PgPool,
        store_id: DbId,
        usage_month: &str,
        limit: u32,
    ) -> Result<SmsUsageSummary, sqlx::Error> {
        let sent: Option<i32> = sqlx::query_scalar(
            "SELECT sms_sent_count FROM store_usage \
             WHERE store_id = $1 AND usage_month = $2",
        )
        .bind(store_id)
        .bind(usage_month)
        .fetch_optional(pool)
        .await?;

        Ok(SmsUsageSummary::new(sent.unwrap_or(0), limit, usage_month))
    }
}

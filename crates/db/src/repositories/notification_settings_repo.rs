//! Repository for the `store_notification_settings` table.

use revalert_core::config::NotificationConfig;
use revalert_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::notification_settings::StoreNotificationSettings;

/// Column list for `store_notification_settings` queries.
const COLUMNS: &str = "id, store_id, email_enabled, sms_enabled, email_address, phone_number, \
    email_verified, phone_verified, target_stars, silent_start, silent_end, last_notified_at, \
    plan, sms_limit_override, time_zone, created_at, updated_at";

/// Reads and writes per-store notification settings.
pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    /// Get a store's settings.
    pub async fn get(
        pool: &PgPool,
        store_id: DbId,
    ) -> Result<Option<StoreNotificationSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM store_notification_settings WHERE store_id = $1");
        sqlx::query_as::<_, StoreNotificationSettings>(&query)
            .bind(store_id)
            .fetch_optional(pool)
            .await
    }

    /// Get a store's settings and lock the row until the transaction ends.
    ///
    /// Holding this lock across dispatch serializes concurrent reviews for
    /// the same store, which keeps the cooldown and quota checks consistent.
    pub async fn get_for_update(
        conn: &mut PgConnection,
        store_id: DbId,
    ) -> Result<Option<StoreNotificationSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM store_notification_settings \
             WHERE store_id = $1 \
             FOR UPDATE"
        );
        sqlx::query_as::<_, StoreNotificationSettings>(&query)
            .bind(store_id)
            .fetch_optional(conn)
            .await
    }

    /// Insert or update the owner-editable part of a store's settings.
    ///
    /// Plan, SMS override, time zone and `last_notified_at` are left alone on
    /// update; they are owned by billing and by the alert router.
    pub async fn upsert(
        pool: &PgPool,
        store_id: DbId,
        config: &NotificationConfig,
    ) -> Result<StoreNotificationSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO store_notification_settings \
                (store_id, email_enabled, sms_enabled, email_address, phone_number, \
                 email_verified, phone_verified, target_stars, silent_start, silent_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (store_id) DO UPDATE SET \
                email_enabled = EXCLUDED.email_enabled, \
                sms_enabled = EXCLUDED.sms_enabled, \
                email_address = EXCLUDED.email_address, \
                phone_number = EXCLUDED.phone_number, \
                email_verified = EXCLUDED.email_verified, \
                phone_verified = EXCLUDED.phone_verified, \
                target_stars = EXCLUDED.target_stars, \
                silent_start = EXCLUDED.silent_start, \
                silent_end = EXCLUDED.silent_end, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        let target_stars: Vec<i16> = config.target_stars.iter().map(|s| i16::from(*s)).collect();
        sqlx::query_as::<_, StoreNotificationSettings>(&query)
            .bind(store_id)
            .bind(config.email_enabled)
            .bind(config.sms_enabled)
            .bind(&config.email_address)
            .bind(&config.phone_number)
            .bind(config.email_verified)
            .bind(config.phone_verified)
            .bind(&target_stars)
            .bind(config.silent_hours.start.format("%H:%M").to_string())
            .bind(config.silent_hours.end.format("%H:%M").to_string())
            .fetch_one(pool)
            .await
    }

    /// Record that an alert was dispatched for the store at `at`.
    pub async fn mark_notified<'e>(
        executor: impl PgExecutor<'e>,
        store_id: DbId,
        at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE store_notification_settings \
             SET last_notified_at = $2, updated_at = NOW() \
             WHERE store_id = $1",
        )
        .bind(store_id)
        .bind(at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

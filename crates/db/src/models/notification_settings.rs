//! Store notification settings model.

use std::collections::BTreeSet;

use revalert_core::config::NotificationConfig;
use revalert_core::error::CoreError;
use revalert_core::quota::{effective_sms_limit, PlanType};
use revalert_core::silent_hours::SilentHours;
use revalert_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `store_notification_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreNotificationSettings {
    pub id: DbId,
    pub store_id: DbId,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub email_address: String,
    pub phone_number: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub target_stars: Vec<i16>,
    pub silent_start: String,
    pub silent_end: String,
    pub last_notified_at: Option<Timestamp>,
    pub plan: String,
    pub sms_limit_override: Option<i32>,
    /// IANA zone name used to evaluate silent hours, e.g. `Asia/Tokyo`.
    pub time_zone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoreNotificationSettings {
    /// Convert the row into a validated [`NotificationConfig`].
    pub fn to_config(&self) -> Result<NotificationConfig, CoreError> {
        let target_stars = self
            .target_stars
            .iter()
            .map(|s| {
                u8::try_from(*s).map_err(|_| {
                    CoreError::Validation(format!("Target star {s} is not a valid rating"))
                })
            })
            .collect::<Result<BTreeSet<u8>, _>>()?;

        let config = NotificationConfig {
            email_enabled: self.email_enabled,
            sms_enabled: self.sms_enabled,
            email_address: self.email_address.clone(),
            phone_number: self.phone_number.clone(),
            email_verified: self.email_verified,
            phone_verified: self.phone_verified,
            target_stars,
            silent_hours: SilentHours::parse(&self.silent_start, &self.silent_end)?,
            last_notified_at: self.last_notified_at,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn plan_type(&self) -> Result<PlanType, CoreError> {
        PlanType::parse(&self.plan)
    }

    /// Effective monthly SMS limit: the override if set, else the plan's.
    pub fn sms_limit(&self) -> Result<u32, CoreError> {
        let limit_override = self
            .sms_limit_override
            .map(|l| {
                u32::try_from(l).map_err(|_| {
                    CoreError::Validation(format!("SMS limit override {l} is negative"))
                })
            })
            .transpose()?;
        Ok(effective_sms_limit(self.plan_type()?, limit_override))
    }
}

//! Review-to-alert routing.
//!
//! [`ReviewAlertRouter`] consumes the review queue and, for each review, loads
//! the store's settings and SMS usage, dispatches, then persists the
//! follow-up. The whole sequence runs in one transaction that holds a row lock
//! on the store's settings, so two reviews for the same store never read the
//! same cooldown or quota snapshot.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use revalert_core::error::CoreError;
use revalert_core::outcome::{FollowUp, NotificationOutcome};
use revalert_core::quota::usage_month;
use revalert_core::types::{DbId, Timestamp};
use revalert_db::repositories::{NotificationSettingsRepo, StoreUsageRepo};
use revalert_db::DbPool;
use sqlx::{Postgres, Transaction};
use tokio_util::sync::CancellationToken;

use crate::bus::{ReviewReceived, ReviewStream};
use crate::dispatcher::dispatch;
use crate::provider::NotificationProvider;

/// Error type for a review that could not be routed.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored settings failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Sends already happened but `last_notified_at` or the SMS counter could
    /// not be written. `outcomes` is what went out.
    #[error("Alerts sent but follow-up not persisted: {source}")]
    FollowUp {
        source: sqlx::Error,
        outcomes: Vec<NotificationOutcome>,
    },
}

/// Routes incoming reviews to store alerts.
pub struct ReviewAlertRouter {
    pool: DbPool,
    provider: Arc<dyn NotificationProvider>,
}

impl ReviewAlertRouter {
    /// Create a new router with the given database pool and provider.
    pub fn new(pool: DbPool, provider: Arc<dyn NotificationProvider>) -> Self {
        Self { pool, provider }
    }

    /// Run the main routing loop.
    ///
    /// Exits once every publisher is gone and the queue is drained, or when
    /// `cancel` fires. Reviews are handled one at a time, in arrival order.
    pub async fn run(self, mut reviews: ReviewStream, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Review alert router cancelled");
                    break;
                }
                received = reviews.recv() => match received {
                    Some(event) => {
                        if let Err(e) = self.route(&event).await {
                            tracing::error!(
                                error = %e,
                                store_id = event.store_id,
                                review_id = %event.review.review_id,
                                "Failed to route review"
                            );
                        }
                    }
                    None => {
                        tracing::info!("Review bus closed, alert router shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Dispatch alerts for one review at the current time.
    pub async fn route(
        &self,
        event: &ReviewReceived,
    ) -> Result<Vec<NotificationOutcome>, RouteError> {
        self.route_at(event, Utc::now()).await
    }

    /// Dispatch alerts for one review as of `at`, and persist the follow-up.
    ///
    /// Stores without a settings row are skipped.
    pub async fn route_at(
        &self,
        event: &ReviewReceived,
        at: Timestamp,
    ) -> Result<Vec<NotificationOutcome>, RouteError> {
        let store_id = event.store_id;
        let mut tx = self.pool.begin().await?;

        let Some(settings) = NotificationSettingsRepo::get_for_update(&mut *tx, store_id).await?
        else {
            tracing::debug!(store_id, "No notification settings for store, skipping");
            return Ok(Vec::new());
        };

        let config = settings.to_config()?;
        let time_zone: Tz = settings.time_zone.parse().map_err(|_| {
            CoreError::Validation(format!("Unknown time zone: {}", settings.time_zone))
        })?;
        let now = at.with_timezone(&time_zone).fixed_offset();
        let month = usage_month(now.date_naive());

        let usage = StoreUsageRepo::get_or_create(&mut *tx, store_id, &month).await?;
        let sms_usage = usage.snapshot(settings.sms_limit()?);

        let outcomes = dispatch(
            &event.review,
            &config,
            &sms_usage,
            self.provider.as_ref(),
            now,
        )
        .await;

        let follow_up = FollowUp::from_outcomes(&outcomes);
        if let Err(source) = persist_follow_up(tx, store_id, &month, follow_up, at).await {
            tracing::error!(
                store_id,
                review_id = %event.review.review_id,
                ?outcomes,
                error = %source,
                "Alerts sent but follow-up not persisted, reconcile SMS usage"
            );
            return Err(RouteError::FollowUp { source, outcomes });
        }

        if !outcomes.is_empty() {
            let failed = outcomes.iter().filter(|o| !o.sent).count();
            tracing::info!(
                store_id,
                review_id = %event.review.review_id,
                attempted = outcomes.len(),
                failed,
                "Review alert dispatched"
            );
        }

        Ok(outcomes)
    }
}

/// Write the post-dispatch state and release the store's row lock.
async fn persist_follow_up(
    mut tx: Transaction<'_, Postgres>,
    store_id: DbId,
    month: &str,
    follow_up: FollowUp,
    at: Timestamp,
) -> Result<(), sqlx::Error> {
    if follow_up.touch_last_notified {
        NotificationSettingsRepo::mark_notified(&mut *tx, store_id, at).await?;
    }
    if follow_up.increment_sms {
        let count = StoreUsageRepo::increment_sms_count(&mut *tx, store_id, month).await?;
        tracing::debug!(store_id, month, count, "SMS usage incremented");
    }
    tx.commit().await
}

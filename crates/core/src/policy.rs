//! Go/no-go decision for a single review.
//!
//! Pure logic, no I/O. Checks run in a fixed order and stop at the first
//! failing gate so each gate can be observed on its own in tests.

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::NotificationConfig;
use crate::cooldown::can_notify;
use crate::silent_hours::is_silent_hour;

/// Why a review does not produce an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Neither email nor SMS is switched on.
    NoChannelEnabled,
    /// The rating is not one of the store's target stars.
    RatingNotTargeted,
    /// Local time is inside the store's silent window.
    SilentHours,
    /// The previous alert is still inside the cooldown window.
    Cooldown,
}

/// Evaluate every gate and report the first one that blocks.
///
/// `now` must already be in the store's local zone; silent hours read its
/// wall-clock time, the cooldown compares instants.
pub fn evaluate(
    rating: u8,
    config: &NotificationConfig,
    now: DateTime<FixedOffset>,
) -> Result<(), Suppression> {
    if !config.any_channel_enabled() {
        return Err(Suppression::NoChannelEnabled);
    }

    if !config.target_stars.contains(&rating) {
        return Err(Suppression::RatingNotTargeted);
    }

    if is_silent_hour(&config.silent_hours, now.time()) {
        return Err(Suppression::SilentHours);
    }

    if !can_notify(config.last_notified_at, now.with_timezone(&Utc)) {
        return Err(Suppression::Cooldown);
    }

    Ok(())
}

/// Return `true` if a review with `rating` should produce an alert now.
pub fn should_notify(rating: u8, config: &NotificationConfig, now: DateTime<FixedOffset>) -> bool {
    evaluate(rating, config, now).is_ok()
}

//! Per-store notification cooldown.
//!
//! Pure logic. The caller owns `last_notified_at` and writes it back after a
//! dispatch that produced at least one outcome.

use std::time::Duration;

use crate::types::Timestamp;

/// Minimum interval between two alerts for the same store.
pub const NOTIFY_COOLDOWN: Duration = Duration::from_secs(300); // 5 minutes

/// Return `true` if enough time has passed since the last alert.
///
/// The window is store-global, not per review: two different low-rated reviews
/// two minutes apart yield a single alert. Exactly at the boundary the guard
/// still blocks. A `last_notified_at` in the future counts as inside the window.
pub fn can_notify(last_notified_at: Option<Timestamp>, now: Timestamp) -> bool {
    let Some(last) = last_notified_at else {
        return true;
    };
    let cooldown = chrono::Duration::from_std(NOTIFY_COOLDOWN).expect("valid duration");
    now.signed_duration_since(last) > cooldown
}

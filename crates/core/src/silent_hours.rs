//! Time-of-day suppression window.
//!
//! Pure logic. The caller passes the current wall-clock time already in the
//! tenant's local zone; no zone conversion happens here.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Wire format for window boundaries.
const TIME_FORMAT: &str = "%H:%M";

/// A half-open `[start, end)` time-of-day interval that may wrap midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilentHours {
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm", deserialize_with = "deserialize_hhmm")]
    pub end: NaiveTime,
}

impl SilentHours {
    /// Parse a window from two `"HH:MM"` 24-hour strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Ok(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }
}

impl Default for SilentHours {
    /// Overnight window, 23:00 to 08:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(23, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
        }
    }
}

/// Parse a single `"HH:MM"` boundary.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "Silent hour boundary must be HH:MM in 24-hour time (got {value:?})"
        ))
    })
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
}

fn deserialize_hhmm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_hhmm(&raw).map_err(serde::de::Error::custom)
}

/// Minutes since midnight, ignoring seconds.
fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Return `true` if `now` falls inside the silent window.
///
/// - `start < end`: silent iff `start <= now < end`.
/// - `start > end`: the window wraps midnight; silent iff `now >= start` or
///   `now < end`.
/// - `start == end`: zero-width, never silent.
pub fn is_silent_hour(window: &SilentHours, now: NaiveTime) -> bool {
    let current = minutes_of_day(now);
    let start = minutes_of_day(window.start);
    let end = minutes_of_day(window.end);

    if start > end {
        return current >= start || current < end;
    }

    current >= start && current < end
}

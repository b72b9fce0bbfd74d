//! Review alert decision engine.
//!
//! Pure logic, no I/O. Callers supply a review, a store's notification
//! config, and a usage snapshot; this crate decides whether an alert should go
//! out and what it says. Sending lives in `revalert-events`.
//!
//! - [`validation`]: contact address shape checks.
//! - [`silent_hours`]: time-of-day suppression window.
//! - [`cooldown`]: store-global duplicate suppression.
//! - [`quota`]: monthly SMS allowance.
//! - [`policy`]: combines the gates into one decision.
//! - [`content`]: alert subject/body and SMS text.

pub mod channels;
pub mod config;
pub mod content;
pub mod cooldown;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod quota;
pub mod review;
pub mod silent_hours;
pub mod types;
pub mod validation;

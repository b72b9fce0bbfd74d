//! Concrete transports behind [`TransportProvider`](crate::provider::TransportProvider).
//!
//! Each transport makes exactly one attempt per call. Retry policy, if any,
//! belongs to the caller.

pub mod email;
pub mod sms;

//! Review alert delivery.
//!
//! This crate turns decisions from `revalert-core` into sends:
//!
//! - [`NotificationProvider`]: the transport seam the dispatcher calls.
//! - [`dispatch`]: policy, content, per-channel sends with quota fallback.
//! - [`delivery`]: SMTP email and HTTP SMS gateway transports.
//! - [`ReviewBus`]: bounded in-process queue of incoming reviews.
//! - [`ReviewAlertRouter`]: background consumer that dispatches and persists
//!   the follow-up per store.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod provider;
pub mod router;

pub use bus::{BusClosed, ReviewBus, ReviewReceived, ReviewStream};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use delivery::sms::{SmsDelivery, SmsError, SmsGatewayConfig};
pub use dispatcher::dispatch;
pub use provider::{LoggingProvider, NotificationProvider, ProviderError, TransportProvider};
pub use router::{ReviewAlertRouter, RouteError};

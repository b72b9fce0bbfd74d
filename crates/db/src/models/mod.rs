pub mod notification_settings;
pub mod store_usage;

pub mod notification_settings_repo;
pub mod store_usage_repo;

pub use notification_settings_repo::NotificationSettingsRepo;
pub use store_usage_repo::StoreUsageRepo;

use revalert_events::bus::DEFAULT_CAPACITY;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum reviews queued ahead of the router.
    pub review_bus_capacity: usize,
    /// Log alerts instead of sending them.
    pub alerts_dry_run: bool,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `DATABASE_URL`        | —       |
    /// | `REVIEW_BUS_CAPACITY` | `1024`  |
    /// | `ALERTS_DRY_RUN`      | `false` |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let review_bus_capacity: usize = std::env::var("REVIEW_BUS_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_CAPACITY.to_string())
            .parse()
            .expect("REVIEW_BUS_CAPACITY must be a valid usize");

        let alerts_dry_run = std::env::var("ALERTS_DRY_RUN")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Self {
            database_url,
            review_bus_capacity,
            alerts_dry_run,
        }
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable a flag.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

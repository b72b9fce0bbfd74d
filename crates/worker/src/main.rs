use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revalert_events::{EmailConfig, ReviewAlertRouter, ReviewBus, SmsGatewayConfig};
use revalert_worker::config::WorkerConfig;
use revalert_worker::{build_provider, feed};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revalert_worker=debug,revalert_events=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();

    // --- Database ---
    let pool = revalert_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    revalert_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    revalert_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Provider ---
    let provider = build_provider(
        EmailConfig::from_env(),
        SmsGatewayConfig::from_env(),
        config.alerts_dry_run,
    )
    .expect("Failed to configure alert transports");

    // --- Review bus + router ---
    let (bus, reviews) = ReviewBus::new(config.review_bus_capacity);
    let cancel = CancellationToken::new();
    let router = ReviewAlertRouter::new(pool.clone(), provider);
    let mut router_handle = tokio::spawn(router.run(reviews, cancel.clone()));
    tracing::info!("Review alert router started");

    // --- Feed ---
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match feed::parse_line(&line) {
                Ok(Some(event)) => {
                    if let Err(e) = bus.publish(event).await {
                        tracing::error!(error = %e, "Review alert router stopped early");
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping malformed review line"),
            },
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read review feed");
                break;
            }
        }
    }

    // Dropping the bus closes the queue; the router drains what is queued
    // and exits. Ctrl-C stops it after the review in flight.
    drop(bus);
    tokio::select! {
        _ = &mut router_handle => {}
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            router_handle.await.ok();
        }
    }

    pool.close().await;
    tracing::info!("Worker stopped");
}

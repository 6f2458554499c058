use booking_service::config::BookingConfig;
use booking_service::services::init_metrics;
use booking_service::startup::Application;
use booking_service::SERVICE_NAME;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = BookingConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(SERVICE_NAME, &config.log_level, config.otlp_endpoint.as_deref())
        .map_err(|e| std::io::Error::other(format!("Tracing initialization error: {}", e)))?;

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    tracing::info!(backend = %config.store.backend, "Starting {}", SERVICE_NAME);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    let result = app.run_until_stopped().await;
    shutdown_tracing();
    result
}

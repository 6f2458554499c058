//! Application startup and lifecycle management.
//!
//! Builds the store, binds the listener and serves the booking router until a
//! shutdown signal arrives, then closes the store.

use crate::config::{BookingConfig, StoreBackend};
use crate::handlers;
use crate::services::{BookingStore, InMemoryBookingStore, MongoBookingStore};
use axum::{
    http::Method,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/submit-form", post(handlers::submit_booking))
        .route("/admin/bookings", get(handlers::list_bookings))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer())
}

/// Any origin, no credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// Open the configured store. A MongoDB that does not answer the first ping
/// is logged and the service still starts; `/ready` reports it.
pub async fn open_store(config: &BookingConfig) -> Result<Arc<dyn BookingStore>, AppError> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory booking store; data is lost on restart");
            Ok(Arc::new(InMemoryBookingStore::new()))
        }
        StoreBackend::Mongo => {
            let uri = config.mongodb.uri.as_deref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("MONGO_URI is required but not set"))
            })?;
            let store = MongoBookingStore::connect(uri, config.mongodb.database.as_deref()).await?;

            match store.health_check().await {
                Ok(()) => tracing::info!("Connected to MongoDB"),
                Err(e) => tracing::warn!(error = %e, "MongoDB not reachable at startup"),
            }

            Ok(Arc::new(store))
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the store named by `config`.
    pub async fn build(config: BookingConfig) -> Result<Self, AppError> {
        let store = open_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Build the application around an already constructed store.
    pub async fn build_with_store(
        config: BookingConfig,
        store: Arc<dyn BookingStore>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Booking service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, then shut the store down.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let store = self.state.store.clone();
        let router = build_router(self.state);

        let result = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        store.shutdown().await;
        tracing::info!("Booking service stopped");

        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

//! Commuter Server - Main entry point

use anyhow::Result;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use commuter_common::logging::{init_logging, LogConfig};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

use commuter_server::{
    catalog::RouteCatalog,
    config::Config,
    features::{self, AppState},
    gateway::{AfricasTalkingGateway, NotificationGateway, SimulatedGateway},
    middleware,
    store::{ReportStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("commuter-server".to_string())
        .filter_directives("commuter_server=debug,tower_http=debug,axum=trace".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    info!("Starting Commuter Server");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Pick the outbound SMS transport; without an API key the simulated
    // gateway logs messages instead of delivering them.
    let gateway: Arc<dyn NotificationGateway> =
        match AfricasTalkingGateway::from_config(&config.sms) {
            Some(gateway) => {
                info!("Africa's Talking SMS gateway configured");
                Arc::new(gateway)
            },
            None => {
                info!("No SMS API key configured, outbound SMS will be simulated");
                Arc::new(SimulatedGateway)
            },
        };

    // Create application state
    let state = AppState {
        catalog: Arc::new(RouteCatalog::nairobi()),
        reports: Arc::new(ReportStore::new()),
        sessions: Arc::new(SessionStore::new(Duration::from_secs(config.session.ttl_secs))),
        gateway,
    };
    info!(
        routes = state.catalog.len(),
        session_ttl_secs = config.session.ttl_secs,
        "Catalog and stores initialized"
    );

    // Build the application router
    let app = create_router(state, &config);

    // Create socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "Nairobi Commuter Info",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}

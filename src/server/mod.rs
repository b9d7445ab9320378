//! HTTP surface of the relay.
//!
//! Routes:
//! - `GET /liveness` and `GET /readiness` for orchestrator probes
//! - `POST /dummy` echoes whatever JSON it gets
//! - `POST /grafana8-webhook` turns a Grafana alert into a Jira issue

pub mod handlers;

use crate::api::jira::HEALTH_CHECK_TIMEOUT;
use crate::config::settings::SettingsSource;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared, read-only router state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: SettingsSource,
    pub health_timeout: Duration,
}

impl AppState {
    pub fn new(settings: SettingsSource) -> Self {
        Self {
            settings,
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/liveness", get(handlers::liveness))
        .route("/readiness", get(handlers::readiness));

    let webhook_routes = Router::new()
        .route("/dummy", post(handlers::dummy_webhook))
        .route("/grafana8-webhook", post(handlers::grafana8_webhook));

    Router::new()
        .merge(health_routes)
        .merge(webhook_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves until CTRL+C or SIGTERM.
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let actual_addr = listener
        .local_addr()
        .context("Failed to read listener address")?;

    info!(addr = %actual_addr, "Relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received CTRL+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

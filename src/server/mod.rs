//! HTTP prediction service
//!
//! Exposes `/info`, `/health` and `/predict` over a shared, read-only
//! [`InferenceEngine`].

pub mod error;
pub mod routes;
pub mod validated;

pub use error::ApiError;
pub use validated::ValidatedJson;

use crate::config::AppConfig;
use crate::models::inference::InferenceEngine;
use crate::types::ModelInfo;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InferenceEngine>,
    pub info: ModelInfo,
}

impl AppState {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self {
            engine,
            info: ModelInfo::current(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/info", get(routes::info))
        .route("/health", get(routes::health))
        .route("/predict", post(routes::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &AppConfig, engine: Arc<InferenceEngine>) -> Result<()> {
    let addr = config.server.bind_addr();
    let app = build_router(AppState::new(engine));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Prediction service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Prediction service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
    info!("Shutdown signal received");
}

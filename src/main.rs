//! Breast Cancer Diagnosis Service - Main Entry Point
//!
//! Loads the trained pipeline artifact and serves predictions over HTTP.

use anyhow::Result;
use diagnosis_service::{
    config::AppConfig,
    logging::init_tracing,
    models::inference::InferenceEngine,
    server,
    types::{MODEL_NAME, MODEL_VERSION},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!("Starting Breast Cancer Diagnosis Service");
    info!(
        model = MODEL_NAME,
        version = MODEL_VERSION,
        artifact = %config.model.artifact_path,
        "Configuration loaded"
    );

    // The service cannot answer anything without a model
    let engine = Arc::new(InferenceEngine::new(&config)?);
    info!(
        "Inference engine ready with {} estimators: {:?}",
        engine.model_names().len(),
        engine.model_names()
    );
    if let Some(trained_at) = engine.trained_at() {
        info!(trained_at = %trained_at, "Loaded model fitted");
    }

    server::serve(&config, engine).await
}

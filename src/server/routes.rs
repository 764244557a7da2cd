//! Request handlers

use super::error::ApiError;
use super::validated::ValidatedJson;
use super::AppState;
use crate::feature_extractor::FeatureExtractor;
use crate::types::{BreastSample, ModelInfo, PredictionResponse};
use axum::extract::State;
use axum::Json;
use tracing::debug;

pub async fn info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.info.clone())
}

/// Liveness check, always `["ok"]`
pub async fn health() -> Json<[&'static str; 1]> {
    Json(["ok"])
}

/// Classify one sample with the loaded ensemble
pub async fn predict(
    State(state): State<AppState>,
    ValidatedJson(sample): ValidatedJson<BreastSample>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let features = FeatureExtractor::new().extract(&sample);
    let result = state.engine.predict(&features)?;

    debug!(
        label = %result.diagnosis,
        votes = ?result.model_votes,
        "Prediction served"
    );

    Ok(Json(result.to_response()))
}

//! Inference engine wrapping the loaded pipeline

use crate::config::AppConfig;
use crate::error::ModelError;
use crate::feature_extractor::FeatureExtractor;
use crate::models::loader::ModelLoader;
use crate::models::pipeline::Pipeline;
use crate::types::prediction::{Diagnosis, PredictionResponse};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Result of model inference
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Ensemble decision
    pub diagnosis: Diagnosis,
    /// Individual estimator votes
    pub model_votes: HashMap<String, u8>,
}

impl PredictionResult {
    /// Convert the prediction into the `/predict` response body
    pub fn to_response(&self) -> PredictionResponse {
        PredictionResponse::from(self.diagnosis)
    }
}

/// Read-only holder of the fitted pipeline, shared across requests
pub struct InferenceEngine {
    pipeline: Pipeline,
}

impl InferenceEngine {
    /// Load the pipeline artifact named in configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::new(FeatureExtractor::new().feature_names());
        let pipeline = loader
            .load(&config.model.artifact_path)
            .with_context(|| {
                format!(
                    "Failed to load model artifact from {}",
                    config.model.artifact_path
                )
            })?;

        let engine = Self::from_pipeline(pipeline);
        info!(
            estimators = ?engine.model_names(),
            features = engine.feature_count(),
            "Inference engine initialized"
        );
        Ok(engine)
    }

    /// Wrap an already-fitted pipeline
    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Get the number of input features
    pub fn feature_count(&self) -> usize {
        self.pipeline.feature_names().len()
    }

    /// Get estimator names in vote order
    pub fn model_names(&self) -> Vec<String> {
        self.pipeline.estimator_names()
    }

    /// When the loaded pipeline was fitted
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.pipeline.trained_at()
    }

    /// Run inference on one feature row
    pub fn predict(&self, features: &[f64]) -> Result<PredictionResult, ModelError> {
        let (class, votes) = self.pipeline.predict_with_votes(features)?;
        let diagnosis = Diagnosis::from_class(class);

        debug!(
            diagnosis = %diagnosis,
            votes = ?votes,
            "Ensemble inference complete"
        );

        Ok(PredictionResult {
            diagnosis,
            model_votes: votes.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pipeline::EstimatorSettings;
    use ndarray::{array, Array2};

    fn engine() -> InferenceEngine {
        let mut pipeline = Pipeline::new(EstimatorSettings::default());
        let benign = [0.03, 0.02, 1.5, 18.0, 20.0, 500.0];
        let malignant = [0.25, 0.12, 6.0, 120.0, 30.0, 1800.0];
        let x = Array2::from_shape_fn((8, 6), |(i, j)| {
            let base = if i < 4 { benign[j] } else { malignant[j] };
            base * (1.0 + 0.05 * i as f64)
        });
        let y = array![0, 0, 0, 0, 1, 1, 1, 1];
        pipeline.fit(x.view(), y.view()).unwrap();
        InferenceEngine::from_pipeline(pipeline)
    }

    #[test]
    fn test_prediction_result() {
        let engine = engine();
        let result = engine
            .predict(&[0.3001, 0.1471, 8.589, 153.4, 17.33, 2019.0])
            .unwrap();

        assert_eq!(result.diagnosis, Diagnosis::Malignant);
        assert_eq!(result.model_votes.len(), 3);
        assert_eq!(
            result.to_response(),
            PredictionResponse {
                label: Diagnosis::Malignant,
                prediction: 1
            }
        );
    }

    #[test]
    fn test_benign_sample() {
        let engine = engine();
        let result = engine.predict(&[0.02, 0.015, 1.2, 15.0, 19.0, 450.0]).unwrap();
        assert_eq!(result.diagnosis, Diagnosis::Benign);
    }

    #[test]
    fn test_missing_artifact_fails_startup() {
        let mut config = AppConfig::default();
        config.model.artifact_path = "does/not/exist.dat.gz".to_string();
        assert!(InferenceEngine::new(&config).is_err());
    }
}

//! Feature extraction for diagnosis model inference.
//!
//! Converts a request sample into the feature row the pipeline was fitted on.
//! The column order here is the single source of truth shared by the
//! dataset loader, the trainer and the service.

use crate::types::sample::BreastSample;

/// Number of model input features
pub const FEATURE_COUNT: usize = 6;

/// Feature names in pipeline column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "concavity_mean",
    "concave_points_mean",
    "perimeter_se",
    "area_se",
    "texture_worst",
    "area_worst",
];

/// Feature extractor that transforms samples into model input rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature row for a sample, in `FEATURE_NAMES` order.
    pub fn extract(&self, sample: &BreastSample) -> [f64; FEATURE_COUNT] {
        [
            sample.concavity_mean,
            sample.concave_points_mean,
            sample.perimeter_se,
            sample.area_se,
            sample.texture_worst,
            sample.area_worst,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names as owned strings, as stored in the artifact.
    pub fn feature_names(&self) -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }
}

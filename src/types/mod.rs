//! Type definitions for the diagnosis service

pub mod prediction;
pub mod sample;

pub use prediction::{Diagnosis, ModelInfo, PredictionResponse, MODEL_NAME, MODEL_VERSION};
pub use sample::BreastSample;

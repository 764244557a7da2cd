//! Breast Cancer Diagnosis Service Library
//!
//! An ensemble classifier (logistic regression, CART and an RBF support
//! vector machine under a hard vote) over six tumour measurements, with an
//! offline trainer and an HTTP prediction service.

pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod models;
pub mod server;
pub mod training;
pub mod types;

pub use config::AppConfig;
pub use dataset::Dataset;
pub use error::{DatasetError, ModelError, TrainingError};
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use models::pipeline::Pipeline;
pub use training::{Trainer, TrainingReport};
pub use types::{BreastSample, Diagnosis, PredictionResponse};

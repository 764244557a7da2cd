//! Typed errors for dataset loading and the model library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading and preparing the training dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' not found in dataset header")]
    MissingColumn(String),

    #[error("row {row}: unknown diagnosis label '{value}' (expected B or M)")]
    InvalidLabel { row: usize, value: String },

    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset has no rows")]
    Empty,

    #[error("{rows}x{columns} feature matrix does not fit {labels} labels and the fixed feature set")]
    Shape {
        rows: usize,
        columns: usize,
        labels: usize,
    },

    #[error("cannot split {rows} rows with test_size {test_size}")]
    InvalidSplit { rows: usize, test_size: f64 },
}

/// Errors raised by fitting, predicting with, or persisting a pipeline
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("{rows} feature rows but {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("feature column {0} has no observed values to impute from")]
    NoObservedValues(usize),

    #[error("training labels contain a single class; a binary classifier needs both")]
    SingleClass,

    #[error("voting ensemble has no estimators")]
    NoEstimators,

    #[error("{0} must be fitted before use")]
    NotFitted(&'static str),

    #[error("{estimator} failed to fit: {message}")]
    Fit {
        estimator: &'static str,
        message: String,
    },

    #[error("artifact features {found:?} do not match expected {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode artifact: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode artifact: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors raised by the offline training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

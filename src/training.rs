//! Offline training: load the CSV, split, fit, score and persist the pipeline

use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::TrainingError;
use crate::models::pipeline::{EstimatorSettings, Pipeline};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// Mean accuracy on the held-out split, in [0, 1]
    pub accuracy: f64,
    pub artifact_path: PathBuf,
}

impl TrainingReport {
    /// Accuracy as a percentage rounded to two decimals
    pub fn accuracy_percent(&self) -> f64 {
        (self.accuracy * 10_000.0).round() / 100.0
    }
}

pub struct Trainer {
    config: TrainingConfig,
    artifact_path: PathBuf,
}

impl Trainer {
    pub fn new(config: TrainingConfig, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            artifact_path: artifact_path.into(),
        }
    }

    /// Run the whole flow against the configured dataset
    pub fn run(&self) -> Result<TrainingReport, TrainingError> {
        let dataset = Dataset::from_csv_path(&self.config.dataset_path)?;
        self.fit_dataset(&dataset)
    }

    /// Split `dataset`, fit on the training part, score on the rest and save
    pub fn fit_dataset(&self, dataset: &Dataset) -> Result<TrainingReport, TrainingError> {
        let (train, test) = dataset.train_test_split(self.config.test_size, self.config.seed)?;

        let mut pipeline = Pipeline::new(EstimatorSettings::from(&self.config));
        pipeline.fit(train.features().view(), train.labels().view())?;
        let accuracy = pipeline.score(test.features().view(), test.labels().view())?;
        info!(
            train = train.len(),
            test = test.len(),
            accuracy = accuracy,
            "Pipeline fitted and scored"
        );

        pipeline.save(&self.artifact_path)?;
        info!(
            path = %self.artifact_path.display(),
            "Model artifact written"
        );

        Ok(TrainingReport {
            train_rows: train.len(),
            test_rows: test.len(),
            accuracy,
            artifact_path: self.artifact_path.clone(),
        })
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}

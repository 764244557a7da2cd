//! Offline trainer
//!
//! Fits the imputer -> scaler -> voting ensemble pipeline on the configured
//! CSV dataset and writes the compressed artifact the service loads.

use anyhow::{Context, Result};
use diagnosis_service::{config::AppConfig, logging::init_tracing, training::Trainer};
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!(
        dataset = %config.training.dataset_path,
        test_size = config.training.test_size,
        seed = config.training.seed,
        "Starting training run"
    );

    let trainer = Trainer::new(config.training.clone(), &config.model.artifact_path);
    let report = trainer.run().with_context(|| {
        format!(
            "Training on {} failed",
            config.training.dataset_path
        )
    })?;

    info!(
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        "Accuracy: {:.2}%",
        report.accuracy_percent()
    );
    info!(path = %report.artifact_path.display(), "Done");

    Ok(())
}

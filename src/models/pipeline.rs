//! Imputer -> scaler -> voting ensemble pipeline

use super::ensemble::{Estimator, NamedEstimator, VotingClassifier};
use super::loader::save_pipeline;
use super::logistic::LogisticClassifier;
use super::preprocessing::{MeanImputer, MinMaxScaler};
use super::svm::SupportVectorClassifier;
use super::tree::DecisionTreeClassifier;
use super::{check_width, Classifier, Transformer};
use crate::config::TrainingConfig;
use crate::error::ModelError;
use crate::feature_extractor::FEATURE_NAMES;
use chrono::{DateTime, Utc};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Hyperparameters of the three base estimators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSettings {
    pub logistic_c: f64,
    pub logistic_max_iter: usize,
    pub svm_c: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            logistic_c: 1.0,
            logistic_max_iter: 100,
            svm_c: 1.0,
        }
    }
}

impl From<&TrainingConfig> for EstimatorSettings {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            logistic_c: config.logistic_c,
            logistic_max_iter: config.max_iter,
            svm_c: config.svm_c,
        }
    }
}

/// The fitted model artifact: preprocessing plus the ensemble, together with
/// the ordered feature names it was fitted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    feature_names: Vec<String>,
    imputer: MeanImputer,
    scaler: MinMaxScaler,
    model: VotingClassifier,
    trained_at: Option<DateTime<Utc>>,
}

impl Pipeline {
    /// Unfitted pipeline over the service feature set
    pub fn new(settings: EstimatorSettings) -> Self {
        let names = FEATURE_NAMES.iter().map(|name| name.to_string()).collect();
        Self::with_feature_names(names, settings)
    }

    /// Unfitted pipeline over an arbitrary, ordered feature set
    pub fn with_feature_names(feature_names: Vec<String>, settings: EstimatorSettings) -> Self {
        let model = VotingClassifier::new(vec![
            NamedEstimator::new(
                "logistic",
                Estimator::Logistic(LogisticClassifier::new(
                    settings.logistic_c,
                    settings.logistic_max_iter,
                )),
            ),
            NamedEstimator::new("cart", Estimator::DecisionTree(DecisionTreeClassifier::new())),
            NamedEstimator::new(
                "svm",
                Estimator::Svm(SupportVectorClassifier::new(settings.svm_c)),
            ),
        ]);

        Self {
            feature_names,
            imputer: MeanImputer::new(),
            scaler: MinMaxScaler::new(),
            model,
            trained_at: None,
        }
    }

    /// Fit imputer, scaler and ensemble in sequence
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        check_width(self.feature_names.len(), x.ncols())?;

        let imputed = self.imputer.fit_transform(x)?;
        let scaled = self.scaler.fit_transform(imputed.view())?;
        self.model.fit(scaled.view(), y)?;
        self.trained_at = Some(Utc::now());

        info!(
            rows = x.nrows(),
            estimators = ?self.model.estimator_names(),
            "Pipeline fitted"
        );
        Ok(())
    }

    fn preprocess(&self, x: ArrayView2<'_, f64>) -> Result<ndarray::Array2<f64>, ModelError> {
        if self.trained_at.is_none() {
            return Err(ModelError::NotFitted("Pipeline"));
        }
        check_width(self.feature_names.len(), x.ncols())?;
        let imputed = self.imputer.transform(x)?;
        self.scaler.transform(imputed.view())
    }

    /// Predict a class for every row
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        let scaled = self.preprocess(x)?;
        self.model.predict(scaled.view())
    }

    /// Predict a single row, returning the ensemble class and each estimator's vote
    pub fn predict_with_votes(&self, row: &[f64]) -> Result<(u8, Vec<(String, u8)>), ModelError> {
        let x = ArrayView1::from(row).insert_axis(Axis(0));
        let scaled = self.preprocess(x)?;
        let votes = self.model.votes(scaled.row(0))?;
        Ok((self.model.decide(&votes), votes))
    }

    /// Predict a single row
    pub fn predict_one(&self, row: &[f64]) -> Result<u8, ModelError> {
        self.predict_with_votes(row).map(|(class, _)| class)
    }

    /// Mean accuracy over a labelled set, in [0, 1]
    pub fn score(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<f64, ModelError> {
        if x.nrows() != y.len() {
            return Err(ModelError::LabelCountMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if y.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }

    /// Write the fitted pipeline as a gzip-compressed artifact
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        if !self.is_fitted() {
            return Err(ModelError::NotFitted("Pipeline"));
        }
        save_pipeline(self, path)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn estimator_names(&self) -> Vec<String> {
        self.model.estimator_names()
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    pub fn is_fitted(&self) -> bool {
        self.trained_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn two_feature_pipeline() -> Pipeline {
        Pipeline::with_feature_names(
            vec!["a".to_string(), "b".to_string()],
            EstimatorSettings::default(),
        )
    }

    fn raw_training_set() -> (Array2<f64>, Array1<u8>) {
        // unscaled magnitudes with one missing cell per class
        let x = array![
            [10.0, 200.0],
            [20.0, f64::NAN],
            [15.0, 250.0],
            [25.0, 150.0],
            [5.0, 50.0],
            [80.0, 900.0],
            [f64::NAN, 800.0],
            [85.0, 750.0],
            [75.0, 850.0],
            [95.0, 950.0],
        ];
        let y = array![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn test_fit_predict_score() {
        let (x, y) = raw_training_set();
        let mut pipeline = two_feature_pipeline();
        pipeline.fit(x.view(), y.view()).unwrap();

        assert!(pipeline.is_fitted());
        assert_eq!(pipeline.score(x.view(), y.view()).unwrap(), 1.0);
        assert_eq!(pipeline.predict_one(&[90.0, 900.0]).unwrap(), 1);
        assert_eq!(pipeline.predict_one(&[12.0, 120.0]).unwrap(), 0);
    }

    #[test]
    fn test_votes_are_reported_per_estimator() {
        let (x, y) = raw_training_set();
        let mut pipeline = two_feature_pipeline();
        pipeline.fit(x.view(), y.view()).unwrap();

        let (class, votes) = pipeline.predict_with_votes(&[90.0, 900.0]).unwrap();
        assert_eq!(class, 1);
        assert_eq!(votes.len(), 3);
        assert_eq!(pipeline.estimator_names(), vec!["logistic", "cart", "svm"]);
    }

    #[test]
    fn test_missing_values_are_imputed_at_predict_time() {
        let (x, y) = raw_training_set();
        let mut pipeline = two_feature_pipeline();
        pipeline.fit(x.view(), y.view()).unwrap();
        assert!(pipeline.predict_one(&[90.0, f64::NAN]).is_ok());
    }

    #[test]
    fn test_unfitted_pipeline_rejects_predict() {
        let pipeline = two_feature_pipeline();
        assert!(matches!(
            pipeline.predict_one(&[1.0, 2.0]),
            Err(ModelError::NotFitted("Pipeline"))
        ));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let (x, y) = raw_training_set();
        let mut pipeline = two_feature_pipeline();
        pipeline.fit(x.view(), y.view()).unwrap();
        assert!(matches!(
            pipeline.predict_one(&[1.0]),
            Err(ModelError::ShapeMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_save_requires_fitted_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.dat.gz");
        assert!(matches!(
            two_feature_pipeline().save(&path),
            Err(ModelError::NotFitted("Pipeline"))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_default_feature_set() {
        let pipeline = Pipeline::new(EstimatorSettings::default());
        assert_eq!(pipeline.feature_names().len(), 6);
        assert_eq!(pipeline.feature_names()[0], "concavity_mean");
    }
}

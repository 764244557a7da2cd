//! Hard-voting ensemble over named base estimators

use super::aggregator::hard_vote;
use super::logistic::LogisticClassifier;
use super::svm::SupportVectorClassifier;
use super::tree::DecisionTreeClassifier;
use super::Classifier;
use crate::error::ModelError;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Any base estimator the ensemble can hold
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Logistic(LogisticClassifier),
    DecisionTree(DecisionTreeClassifier),
    Svm(SupportVectorClassifier),
}

impl Classifier for Estimator {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        match self {
            Estimator::Logistic(m) => m.fit(x, y),
            Estimator::DecisionTree(m) => m.fit(x, y),
            Estimator::Svm(m) => m.fit(x, y),
        }
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        match self {
            Estimator::Logistic(m) => m.predict(x),
            Estimator::DecisionTree(m) => m.predict(x),
            Estimator::Svm(m) => m.predict(x),
        }
    }
}

/// An estimator with the name its votes are reported under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEstimator {
    pub name: String,
    pub estimator: Estimator,
}

impl NamedEstimator {
    pub fn new(name: &str, estimator: Estimator) -> Self {
        Self {
            name: name.to_string(),
            estimator,
        }
    }
}

/// Classifier that fits every estimator on the same data and predicts by
/// majority vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingClassifier {
    estimators: Vec<NamedEstimator>,
}

impl VotingClassifier {
    pub fn new(estimators: Vec<NamedEstimator>) -> Self {
        Self { estimators }
    }

    pub fn estimator_names(&self) -> Vec<String> {
        self.estimators.iter().map(|e| e.name.clone()).collect()
    }

    pub fn estimators(&self) -> &[NamedEstimator] {
        &self.estimators
    }

    /// Each estimator's class for `row`, in registration order
    pub fn votes(&self, row: ArrayView1<'_, f64>) -> Result<Vec<(String, u8)>, ModelError> {
        self.estimators
            .iter()
            .map(|e| {
                e.estimator
                    .predict_row(row)
                    .map(|class| (e.name.clone(), class))
            })
            .collect()
    }

    /// Majority class for a set of votes
    pub fn decide(&self, votes: &[(String, u8)]) -> u8 {
        hard_vote(votes)
    }
}

impl Classifier for VotingClassifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        if self.estimators.is_empty() {
            return Err(ModelError::NoEstimators);
        }
        for named in &mut self.estimators {
            named.estimator.fit(x, y)?;
            debug!(estimator = %named.name, "Estimator fitted");
        }
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        let columns = self
            .estimators
            .iter()
            .map(|e| e.estimator.predict(x))
            .collect::<Result<Vec<_>, _>>()?;

        let mut predictions = Array1::zeros(x.nrows());
        for (i, prediction) in predictions.iter_mut().enumerate() {
            let votes: Vec<(&str, u8)> = self
                .estimators
                .iter()
                .zip(&columns)
                .map(|(e, column)| (e.name.as_str(), column[i]))
                .collect();
            *prediction = hard_vote(&votes);
        }
        Ok(predictions)
    }
}

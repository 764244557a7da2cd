//! L2-regularised logistic regression backed by `linfa-logistic`

use super::{check_training_set, check_width, class_dataset, to_binary, Classifier};
use crate::error::ModelError;
use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Binary logistic regression.
///
/// `c` is the inverse regularization strength; linfa's penalty is set to
/// `1 / c`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    c: f64,
    max_iter: u64,
    n_features: usize,
    fitted: Option<FittedLogisticRegression<f64, usize>>,
}

impl LogisticClassifier {
    pub fn new(c: f64, max_iter: usize) -> Self {
        Self {
            c,
            max_iter: max_iter as u64,
            n_features: 0,
            fitted: None,
        }
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(1.0, 100)
    }
}

impl Classifier for LogisticClassifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        check_training_set(x, y)?;

        let model = LogisticRegression::default()
            .alpha(1.0 / self.c)
            .max_iterations(self.max_iter)
            .fit(&class_dataset(x, y))
            .map_err(|e| ModelError::Fit {
                estimator: "logistic",
                message: e.to_string(),
            })?;

        debug!(
            intercept = model.intercept(),
            "Logistic regression fitted"
        );
        self.n_features = x.ncols();
        self.fitted = Some(model);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        let model = self
            .fitted
            .as_ref()
            .ok_or(ModelError::NotFitted("LogisticClassifier"))?;
        check_width(self.n_features, x.ncols())?;

        let classes: Array1<usize> = model.predict(&x);
        Ok(to_binary(&classes))
    }
}

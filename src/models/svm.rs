//! C-support vector classifier with an RBF kernel, backed by `linfa-svm`

use super::{check_training_set, check_width, Classifier};
use crate::error::ModelError;
use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_svm::Svm;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Binary RBF support vector classifier with `gamma = 1 / (n_features * Var(X))`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportVectorClassifier {
    c: f64,
    n_features: usize,
    fitted: Option<Svm<f64, bool>>,
}

impl SupportVectorClassifier {
    pub fn new(c: f64) -> Self {
        Self {
            c,
            n_features: 0,
            fitted: None,
        }
    }
}

impl Default for SupportVectorClassifier {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// `gamma = "scale"`; falls back to 1 on constant input
fn scale_gamma(x: ArrayView2<'_, f64>) -> f64 {
    let count = x.len() as f64;
    let mean = x.sum() / count;
    let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
    if variance > 0.0 {
        1.0 / (x.ncols() as f64 * variance)
    } else {
        1.0
    }
}

impl Classifier for SupportVectorClassifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        check_training_set(x, y)?;

        let gamma = scale_gamma(x);
        let dataset = DatasetBase::new(x.to_owned(), y.mapv(|label| label == 1));

        // linfa's gaussian kernel is exp(-|a - b|^2 / eps)
        let model = Svm::<f64, bool>::params()
            .pos_neg_weights(self.c, self.c)
            .gaussian_kernel(1.0 / gamma)
            .fit(&dataset)
            .map_err(|e| ModelError::Fit {
                estimator: "svm",
                message: e.to_string(),
            })?;

        debug!(
            gamma = gamma,
            support_vectors = model.nsupport(),
            "SVM fitted"
        );
        self.n_features = x.ncols();
        self.fitted = Some(model);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        let model = self
            .fitted
            .as_ref()
            .ok_or(ModelError::NotFitted("SupportVectorClassifier"))?;
        check_width(self.n_features, x.ncols())?;

        let classes: Array1<bool> = model.predict(&x);
        Ok(classes.mapv(u8::from))
    }
}

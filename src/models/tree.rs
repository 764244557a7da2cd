//! CART decision tree classifier backed by `linfa-trees`

use super::{check_training_set, check_width, class_dataset, to_binary, Classifier};
use crate::error::ModelError;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Binary decision tree on Gini impurity, grown until leaves are pure or
/// cannot be split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    n_features: usize,
    fitted: Option<DecisionTree<f64, usize>>,
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError> {
        check_training_set(x, y)?;

        let tree = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(None)
            .min_weight_split(2.0)
            .min_weight_leaf(1.0)
            .fit(&class_dataset(x, y))
            .map_err(|e| ModelError::Fit {
                estimator: "cart",
                message: e.to_string(),
            })?;

        debug!(
            depth = tree.max_depth(),
            leaves = tree.num_leaves(),
            "Decision tree grown"
        );
        self.n_features = x.ncols();
        self.fitted = Some(tree);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError> {
        let tree = self
            .fitted
            .as_ref()
            .ok_or(ModelError::NotFitted("DecisionTreeClassifier"))?;
        check_width(self.n_features, x.ncols())?;

        let classes: Array1<usize> = tree.predict(&x);
        Ok(to_binary(&classes))
    }
}

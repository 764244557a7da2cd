//! Model library: preprocessing steps, base classifiers, the voting ensemble,
//! the fitted pipeline and its artifact loader.

pub mod aggregator;
pub mod ensemble;
pub mod inference;
pub mod loader;
pub mod logistic;
pub mod pipeline;
pub mod preprocessing;
pub mod svm;
pub mod tree;

pub use aggregator::hard_vote;
pub use ensemble::{Estimator, NamedEstimator, VotingClassifier};
pub use inference::InferenceEngine;
pub use loader::ModelLoader;
pub use logistic::LogisticClassifier;
pub use pipeline::{EstimatorSettings, Pipeline};
pub use preprocessing::{MeanImputer, MinMaxScaler};
pub use svm::SupportVectorClassifier;
pub use tree::DecisionTreeClassifier;

use crate::error::ModelError;
use linfa::DatasetBase;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// A fitted column-wise transformation such as imputation or scaling
pub trait Transformer {
    /// Learn per-column statistics from training data
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<(), ModelError>;

    /// Apply the learned statistics to new data
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError>;

    fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// A binary classifier over classes 0 and 1
pub trait Classifier {
    fn fit(&mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, u8>) -> Result<(), ModelError>;

    /// Predict the class of every row
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<u8>, ModelError>;

    /// Predict the class of a single feature row
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> Result<u8, ModelError> {
        let predictions = self.predict(row.insert_axis(Axis(0)))?;
        predictions
            .get(0)
            .copied()
            .ok_or(ModelError::ShapeMismatch {
                expected: 1,
                actual: 0,
            })
    }
}

/// Shared precondition of every classifier fit
pub(crate) fn check_training_set(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, u8>,
) -> Result<(), ModelError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(ModelError::EmptyTrainingSet);
    }
    if x.nrows() != y.len() {
        return Err(ModelError::LabelCountMismatch {
            rows: x.nrows(),
            labels: y.len(),
        });
    }
    let positives = y.iter().filter(|&&label| label == 1).count();
    if positives == 0 || positives == y.len() {
        return Err(ModelError::SingleClass);
    }
    Ok(())
}

/// Row width check used at predict time
pub(crate) fn check_width(expected: usize, actual: usize) -> Result<(), ModelError> {
    if expected != actual {
        return Err(ModelError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Training set in linfa's layout with classes as `usize`
pub(crate) fn class_dataset(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, u8>,
) -> DatasetBase<Array2<f64>, Array1<usize>> {
    DatasetBase::new(x.to_owned(), y.mapv(usize::from))
}

/// Map linfa class predictions back onto 0/1
pub(crate) fn to_binary(classes: &Array1<usize>) -> Array1<u8> {
    classes.mapv(|class| u8::from(class == 1))
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_single_class_rejected() {
        let x = array![[1.0], [2.0]];
        let y = array![1u8, 1];
        assert!(matches!(
            check_training_set(x.view(), y.view()),
            Err(ModelError::SingleClass)
        ));
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let x = array![[1.0], [2.0]];
        let y = array![0u8];
        assert!(matches!(
            check_training_set(x.view(), y.view()),
            Err(ModelError::LabelCountMismatch { rows: 2, labels: 1 })
        ));
    }
}

//! Missing-value imputation and min-max scaling

use super::{check_width, Transformer};
use crate::error::ModelError;
use linfa::traits::{Fit, Transformer as _};
use linfa::DatasetBase;
use linfa_preprocessing::linear_scaling::LinearScaler;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Replaces missing (NaN) cells with the training mean of their column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeanImputer {
    statistics: Option<Array1<f64>>,
}

impl MeanImputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-column fill values learned by `fit`
    pub fn statistics(&self) -> Option<&Array1<f64>> {
        self.statistics.as_ref()
    }
}

impl Transformer for MeanImputer {
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<(), ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }

        let mut means = Array1::zeros(x.ncols());
        for (j, column) in x.axis_iter(Axis(1)).enumerate() {
            let (sum, count) = column
                .iter()
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));
            if count == 0 {
                return Err(ModelError::NoObservedValues(j));
            }
            means[j] = sum / count as f64;
        }

        self.statistics = Some(means);
        Ok(())
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        let means = self
            .statistics
            .as_ref()
            .ok_or(ModelError::NotFitted("MeanImputer"))?;
        check_width(means.len(), x.ncols())?;

        let mut out = x.to_owned();
        for (mut column, &mean) in out.axis_iter_mut(Axis(1)).zip(means.iter()) {
            column.mapv_inplace(|v| if v.is_nan() { mean } else { v });
        }
        Ok(out)
    }
}

/// Scales each column to the (0, 1) range seen during training, using
/// linfa's min-max `LinearScaler`.
///
/// Values outside the training range are not clipped. Expects imputed
/// input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxScaler {
    n_features: usize,
    fitted: Option<LinearScaler<f64>>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transformer for MinMaxScaler {
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<(), ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }

        let scaler = LinearScaler::<f64>::min_max()
            .fit(&DatasetBase::from(x.to_owned()))
            .map_err(|e| ModelError::Fit {
                estimator: "min_max_scaler",
                message: e.to_string(),
            })?;

        self.n_features = x.ncols();
        self.fitted = Some(scaler);
        Ok(())
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        let scaler = self
            .fitted
            .as_ref()
            .ok_or(ModelError::NotFitted("MinMaxScaler"))?;
        check_width(self.n_features, x.ncols())?;

        Ok(scaler.transform(x.to_owned()))
    }
}

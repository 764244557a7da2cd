//! Request payload for a single diagnosis

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Six cell-nucleus measurements describing one sample.
///
/// Every field is required and must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct BreastSample {
    /// Mean severity of concave portions of the contour
    #[validate(range(exclusive_min = 0.0))]
    pub concavity_mean: f64,

    /// Mean number of concave portions of the contour
    #[validate(range(exclusive_min = 0.0))]
    pub concave_points_mean: f64,

    /// Standard error of the perimeter
    #[validate(range(exclusive_min = 0.0))]
    pub perimeter_se: f64,

    /// Standard error of the area
    #[validate(range(exclusive_min = 0.0))]
    pub area_se: f64,

    /// Worst (largest mean of three) texture
    #[validate(range(exclusive_min = 0.0))]
    pub texture_worst: f64,

    /// Worst (largest mean of three) area
    #[validate(range(exclusive_min = 0.0))]
    pub area_worst: f64,
}

impl BreastSample {
    /// Example payload documented for the `/predict` route
    pub fn example() -> Self {
        Self {
            concavity_mean: 0.3001,
            concave_points_mean: 0.1471,
            perimeter_se: 8.589,
            area_se: 153.4,
            texture_worst: 17.33,
            area_worst: 2019.0,
        }
    }
}

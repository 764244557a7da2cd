//! Shared fixtures for integration tests
#![allow(dead_code)]

use diagnosis_service::feature_extractor::FEATURE_NAMES;
use diagnosis_service::models::pipeline::EstimatorSettings;
use diagnosis_service::{Dataset, InferenceEngine, Pipeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Per-feature sampling ranges in `FEATURE_NAMES` order
const BENIGN_RANGES: [(f64, f64); 6] = [
    (0.005, 0.08),
    (0.002, 0.045),
    (0.75, 4.0),
    (6.0, 50.0),
    (12.0, 30.0),
    (185.0, 800.0),
];

const MALIGNANT_RANGES: [(f64, f64); 6] = [
    (0.1, 0.42),
    (0.05, 0.2),
    (4.5, 20.0),
    (55.0, 500.0),
    (17.0, 45.0),
    (900.0, 4000.0),
];

/// Well separated two-class dataset in the training CSV layout.
///
/// Every fourth malignant row has an empty `area_se` cell so the imputer
/// is exercised.
pub fn synthetic_csv(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut csv = format!("id,diagnosis,radius_mean,{}\n", FEATURE_NAMES.join(","));

    for id in 0..rows {
        let malignant = id % 3 == 0;
        let (label, ranges) = if malignant {
            ("M", &MALIGNANT_RANGES)
        } else {
            ("B", &BENIGN_RANGES)
        };

        let _ = write!(csv, "{},{},{:.3}", 842_302 + id, label, rng.gen_range(6.0..28.0));
        for (j, &(low, high)) in ranges.iter().enumerate() {
            let value: f64 = rng.gen_range(low..high);
            if malignant && j == 3 && id % 4 == 0 {
                csv.push(',');
            } else {
                let _ = write!(csv, ",{value:.5}");
            }
        }
        csv.push('\n');
    }
    csv
}

/// Write `synthetic_csv` into `dir` and return its path
pub fn write_csv(dir: &Path, rows: usize, seed: u64) -> PathBuf {
    let path = dir.join("breast_cancer.csv");
    std::fs::write(&path, synthetic_csv(rows, seed)).unwrap();
    path
}

/// Pipeline fitted on the full synthetic dataset
pub fn fitted_pipeline() -> Pipeline {
    let dataset = Dataset::from_reader(synthetic_csv(150, 7).as_bytes()).unwrap();
    let mut pipeline = Pipeline::new(EstimatorSettings::default());
    pipeline
        .fit(dataset.features().view(), dataset.labels().view())
        .unwrap();
    pipeline
}

/// Engine shared by all tests in one binary
pub fn engine() -> Arc<InferenceEngine> {
    static ENGINE: OnceLock<Arc<InferenceEngine>> = OnceLock::new();
    ENGINE
        .get_or_init(|| Arc::new(InferenceEngine::from_pipeline(fitted_pipeline())))
        .clone()
}

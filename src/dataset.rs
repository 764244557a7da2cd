//! Training dataset loading and train/test splitting.
//!
//! The CSV must carry an `id` column, a `diagnosis` column holding `B` or `M`,
//! and every column named in [`FEATURE_NAMES`]. Extra columns are ignored.

use crate::error::DatasetError;
use crate::feature_extractor::{FEATURE_COUNT, FEATURE_NAMES};
use crate::types::prediction::Diagnosis;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Identifier column, required but dropped
pub const ID_COLUMN: &str = "id";
/// Label column
pub const LABEL_COLUMN: &str = "diagnosis";

/// Feature matrix with encoded labels
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<u8>,
}

impl Dataset {
    /// Build a dataset from an already-encoded matrix and label vector
    pub fn new(features: Array2<f64>, labels: Array1<u8>) -> Result<Self, DatasetError> {
        if features.nrows() == 0 {
            return Err(DatasetError::Empty);
        }
        if features.nrows() != labels.len() || features.ncols() != FEATURE_COUNT {
            return Err(DatasetError::Shape {
                rows: features.nrows(),
                columns: features.ncols(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    /// Read a dataset from a CSV file on disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Reading dataset");
        Self::from_reader(file)
    }

    /// Read a dataset from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        // `id` is dropped, but a file without it is not the expected schema
        column_index(ID_COLUMN)?;
        let label_idx = column_index(LABEL_COLUMN)?;
        let feature_idx = FEATURE_NAMES
            .iter()
            .map(|name| column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows: Vec<[f64; FEATURE_COUNT]> = Vec::new();
        let mut labels: Vec<u8> = Vec::new();

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;

            let raw_label = record.get(label_idx).unwrap_or_default();
            let diagnosis: Diagnosis =
                raw_label
                    .parse()
                    .map_err(|value| DatasetError::InvalidLabel { row, value })?;

            let mut features = [0.0; FEATURE_COUNT];
            for (slot, (&idx, name)) in features
                .iter_mut()
                .zip(feature_idx.iter().zip(FEATURE_NAMES))
            {
                let cell = record.get(idx).unwrap_or_default();
                *slot = parse_cell(cell).ok_or_else(|| DatasetError::InvalidValue {
                    row,
                    column: name.to_string(),
                    value: cell.to_string(),
                })?;
            }

            rows.push(features);
            labels.push(diagnosis.class());
        }

        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        let features = Array2::from_shape_fn((rows.len(), FEATURE_COUNT), |(i, j)| rows[i][j]);
        let dataset = Self {
            features,
            labels: Array1::from(labels),
        };

        let (benign, malignant) = dataset.class_counts();
        info!(
            rows = dataset.len(),
            benign = benign,
            malignant = malignant,
            missing = dataset.missing_count(),
            "Dataset loaded"
        );

        Ok(dataset)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature matrix, one row per sample, columns in `FEATURE_NAMES` order
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    /// Encoded labels (B -> 0, M -> 1)
    pub fn labels(&self) -> &Array1<u8> {
        &self.labels
    }

    /// (benign, malignant) row counts
    pub fn class_counts(&self) -> (usize, usize) {
        let malignant = self.labels.iter().filter(|&&y| y == 1).count();
        (self.len() - malignant, malignant)
    }

    /// Number of missing feature cells
    pub fn missing_count(&self) -> usize {
        self.features.iter().filter(|v| v.is_nan()).count()
    }

    /// Shuffle with a seeded RNG and hold out `ceil(len * test_size)` rows.
    ///
    /// Returns `(train, test)`. The same seed over the same data always
    /// yields the same partition.
    pub fn train_test_split(
        &self,
        test_size: f64,
        seed: u64,
    ) -> Result<(Dataset, Dataset), DatasetError> {
        let rows = self.len();
        let n_test = (rows as f64 * test_size).ceil() as usize;
        if !(test_size > 0.0 && test_size < 1.0) || n_test == 0 || n_test >= rows {
            return Err(DatasetError::InvalidSplit { rows, test_size });
        }

        let mut indices: Vec<usize> = (0..rows).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        debug!(
            train = train_idx.len(),
            test = test_idx.len(),
            seed = seed,
            "Split dataset"
        );

        Ok((self.select(train_idx), self.select(test_idx)))
    }

    fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }
}

/// Empty cells and NaN markers become missing values for the imputer
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "id,diagnosis,radius_mean,concavity_mean,concave_points_mean,perimeter_se,area_se,texture_worst,area_worst";

    fn csv_with_rows(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_reads_and_encodes_labels() {
        let text = csv_with_rows(&[
            "842302,M,17.99,0.3001,0.1471,8.589,153.4,17.33,2019.0",
            "8510426,B,13.54,0.0664,0.04781,2.058,23.56,19.26,711.2",
        ]);
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels().to_vec(), vec![1, 0]);
        assert_eq!(dataset.features()[[0, 0]], 0.3001);
        assert_eq!(dataset.features()[[1, 5]], 711.2);
        assert_eq!(dataset.class_counts(), (1, 1));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let text = csv_with_rows(&["1,B,13.0,,0.04,2.0,23.5,19.2,711.2"]);
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert!(dataset.features()[[0, 0]].is_nan());
        assert_eq!(dataset.missing_count(), 1);
    }

    #[test]
    fn test_missing_feature_column_is_fatal() {
        let text = "id,diagnosis,concavity_mean\n1,B,0.1";
        match Dataset::from_reader(text.as_bytes()) {
            Err(DatasetError::MissingColumn(column)) => assert_eq!(column, "concave_points_mean"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_id_column_is_fatal() {
        let text = "diagnosis,concavity_mean,concave_points_mean,perimeter_se,area_se,texture_worst,area_worst\nB,1,1,1,1,1,1";
        assert!(matches!(
            Dataset::from_reader(text.as_bytes()),
            Err(DatasetError::MissingColumn(column)) if column == "id"
        ));
    }

    #[test]
    fn test_unknown_label_is_fatal() {
        let text = csv_with_rows(&["1,X,13.0,0.1,0.04,2.0,23.5,19.2,711.2"]);
        assert!(matches!(
            Dataset::from_reader(text.as_bytes()),
            Err(DatasetError::InvalidLabel { row: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_feature_is_fatal() {
        let text = csv_with_rows(&["1,B,13.0,abc,0.04,2.0,23.5,19.2,711.2"]);
        assert!(matches!(
            Dataset::from_reader(text.as_bytes()),
            Err(DatasetError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            Dataset::from_reader(HEADER.as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_split_sizes_and_determinism() {
        let rows: Vec<String> = (0..10)
            .map(|i| format!("{i},{},1,{i}.5,1,1,1,1,1", if i % 2 == 0 { "B" } else { "M" }))
            .collect();
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let dataset = Dataset::from_reader(csv_with_rows(&refs).as_bytes()).unwrap();

        let (train, test) = dataset.train_test_split(0.2, 42).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train_again, test_again) = dataset.train_test_split(0.2, 42).unwrap();
        assert_eq!(train.features(), train_again.features());
        assert_eq!(test.labels(), test_again.labels());
    }

    #[test]
    fn test_split_rejects_degenerate_sizes() {
        let text = csv_with_rows(&["1,B,1,1,1,1,1,1,1"]);
        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert!(dataset.train_test_split(0.2, 42).is_err());
    }
}

//! Pipeline artifact persistence: gzip-compressed JSON

use super::pipeline::Pipeline;
use crate::error::ModelError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Loader for pipeline artifacts
pub struct ModelLoader {
    /// Feature order the caller will feed the pipeline
    expected_features: Vec<String>,
}

impl ModelLoader {
    /// Create a loader that checks artifacts against `expected_features`
    pub fn new(expected_features: Vec<String>) -> Self {
        Self { expected_features }
    }

    /// Load a pipeline artifact from file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Pipeline, ModelError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading pipeline artifact");

        let file = File::open(path)?;
        let pipeline = self.load_from_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            estimators = ?pipeline.estimator_names(),
            trained_at = ?pipeline.trained_at(),
            "Pipeline loaded successfully"
        );
        Ok(pipeline)
    }

    /// Decode a gzip-compressed artifact from any reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Pipeline, ModelError> {
        let pipeline: Pipeline =
            serde_json::from_reader(GzDecoder::new(reader)).map_err(ModelError::Decode)?;

        if pipeline.feature_names() != self.expected_features.as_slice() {
            return Err(ModelError::FeatureMismatch {
                expected: self.expected_features.clone(),
                found: pipeline.feature_names().to_vec(),
            });
        }
        if !pipeline.is_fitted() {
            return Err(ModelError::NotFitted("Pipeline"));
        }
        Ok(pipeline)
    }
}

/// Write a pipeline artifact, creating parent directories as needed
pub fn save_pipeline<P: AsRef<Path>>(pipeline: &Pipeline, path: P) -> Result<(), ModelError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_pipeline(pipeline, BufWriter::new(file))?.flush()?;

    info!(path = %path.display(), "Pipeline artifact written");
    Ok(())
}

/// Encode a pipeline into any writer, returning the writer once the gzip
/// stream is finished
pub fn write_pipeline<W: Write>(pipeline: &Pipeline, writer: W) -> Result<W, ModelError> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    serde_json::to_writer(&mut encoder, pipeline).map_err(ModelError::Encode)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pipeline::EstimatorSettings;
    use ndarray::array;

    fn fitted_pipeline() -> Pipeline {
        let mut pipeline = Pipeline::with_feature_names(
            vec!["a".to_string(), "b".to_string()],
            EstimatorSettings::default(),
        );
        let x = array![
            [0.1, 0.2],
            [0.2, 0.1],
            [0.15, 0.25],
            [0.8, 0.9],
            [0.9, 0.8],
            [0.85, 0.75]
        ];
        let y = array![0, 0, 0, 1, 1, 1];
        pipeline.fit(x.view(), y.view()).unwrap();
        pipeline
    }

    #[test]
    fn test_file_round_trip_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/model.dat.gz");
        let pipeline = fitted_pipeline();
        save_pipeline(&pipeline, &path).unwrap();

        let loader = ModelLoader::new(vec!["a".to_string(), "b".to_string()]);
        let loaded = loader.load(&path).unwrap();

        for row in [[0.12, 0.3], [0.5, 0.5], [0.95, 0.7]] {
            assert_eq!(
                pipeline.predict_with_votes(&row).unwrap(),
                loaded.predict_with_votes(&row).unwrap()
            );
        }
        assert_eq!(pipeline.trained_at(), loaded.trained_at());
    }

    #[test]
    fn test_artifact_is_gzip() {
        let bytes = write_pipeline(&fitted_pipeline(), Vec::new()).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_feature_mismatch_rejected() {
        let bytes = write_pipeline(&fitted_pipeline(), Vec::new()).unwrap();
        let loader = ModelLoader::new(vec!["b".to_string(), "a".to_string()]);
        assert!(matches!(
            loader.load_from_reader(bytes.as_slice()),
            Err(ModelError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_unfitted_artifact_rejected() {
        let pipeline = Pipeline::with_feature_names(vec!["a".to_string()], EstimatorSettings::default());
        let bytes = write_pipeline(&pipeline, Vec::new()).unwrap();
        let loader = ModelLoader::new(vec!["a".to_string()]);
        assert!(matches!(
            loader.load_from_reader(bytes.as_slice()),
            Err(ModelError::NotFitted(_))
        ));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let loader = ModelLoader::new(Vec::new());
        assert!(loader.load_from_reader(&b"not a gzip stream"[..]).is_err());
    }

    #[test]
    fn test_tampered_tree_is_decode_error() {
        let bytes = write_pipeline(&fitted_pipeline(), Vec::new()).unwrap();
        let mut json: serde_json::Value =
            serde_json::from_reader(GzDecoder::new(bytes.as_slice())).unwrap();
        assert_eq!(json["model"]["estimators"][1]["estimator"]["kind"], "decision_tree");
        json["model"]["estimators"][1]["estimator"]["fitted"] = serde_json::json!({"bogus": true});

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        serde_json::to_writer(&mut encoder, &json).unwrap();
        let tampered = encoder.finish().unwrap();

        let loader = ModelLoader::new(vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(
            loader.load_from_reader(tampered.as_slice()),
            Err(ModelError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = ModelLoader::new(Vec::new());
        assert!(matches!(
            loader.load("does/not/exist.dat.gz"),
            Err(ModelError::Io(_))
        ));
    }
}

//! Configuration management for the diagnosis service and trainer

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Prefix for environment overrides, e.g. `DIAGNOSIS__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "DIAGNOSIS";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the fitted model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path of the gzip-compressed pipeline artifact
    pub artifact_path: String,
}

/// Offline training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// CSV dataset location
    pub dataset_path: String,
    /// Fraction of rows held out for the accuracy report
    pub test_size: f64,
    /// Seed for the train/test shuffle
    pub seed: u64,
    /// Inverse regularization strength of the logistic regression
    #[serde(default = "default_c")]
    pub logistic_c: f64,
    /// Solver iterations for the logistic regression
    #[serde(default = "default_logistic_max_iter")]
    pub max_iter: usize,
    /// Box constraint of the support vector classifier
    #[serde(default = "default_c")]
    pub svm_c: f64,
}

fn default_c() -> f64 {
    1.0
}

fn default_logistic_max_iter() -> usize {
    100
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json)
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Load configuration from defaults, `config/config.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration layering defaults, an optional file and the environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults =
            Config::try_from(&AppConfig::default()).context("Failed to encode default configuration")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the trainer or server cannot work with
    pub fn validate(&self) -> Result<()> {
        let test_size = self.training.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            bail!("training.test_size must be in (0, 1), got {test_size}");
        }
        if self.training.logistic_c <= 0.0 || self.training.svm_c <= 0.0 {
            bail!("training regularization constants must be positive");
        }
        if self.model.artifact_path.is_empty() {
            bail!("model.artifact_path must not be empty");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                artifact_path: "model/model_binary.dat.gz".to_string(),
            },
            training: TrainingConfig {
                dataset_path: "data/breast_cancer.csv".to_string(),
                test_size: 0.2,
                seed: 42,
                logistic_c: default_c(),
                max_iter: default_logistic_max_iter(),
                svm_c: default_c(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

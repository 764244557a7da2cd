//! Diagnosis labels and response bodies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric class of a benign diagnosis
pub const BENIGN_CLASS: u8 = 0;
/// Numeric class of a malignant diagnosis
pub const MALIGNANT_CLASS: u8 = 1;

/// Model name reported on `/info`
pub const MODEL_NAME: &str = "Breast Cancer Wisconsin (Diagnostic)";
/// Model version reported on `/info`
pub const MODEL_VERSION: &str = "v1.0.0";

/// Binary diagnosis, encoded B -> 0 and M -> 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "B")]
    Benign,
    #[serde(rename = "M")]
    Malignant,
}

impl Diagnosis {
    /// Map a model class back to a diagnosis. Any non-zero class is malignant.
    pub fn from_class(class: u8) -> Self {
        if class == MALIGNANT_CLASS {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    /// Integer encoding used by the model
    pub fn class(self) -> u8 {
        match self {
            Diagnosis::Benign => BENIGN_CLASS,
            Diagnosis::Malignant => MALIGNANT_CLASS,
        }
    }

    /// Single-letter dataset label
    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::Benign => "B",
            Diagnosis::Malignant => "M",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Diagnosis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "B" => Ok(Diagnosis::Benign),
            "M" => Ok(Diagnosis::Malignant),
            other => Err(other.to_string()),
        }
    }
}

/// Body returned by `/predict`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub label: Diagnosis,
    pub prediction: u8,
}

impl From<Diagnosis> for PredictionResponse {
    fn from(diagnosis: Diagnosis) -> Self {
        Self {
            label: diagnosis,
            prediction: diagnosis.class(),
        }
    }
}

/// Body returned by `/info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
}

impl ModelInfo {
    /// Identity of the model this build serves
    pub fn current() -> Self {
        Self {
            name: MODEL_NAME.to_string(),
            version: MODEL_VERSION.to_string(),
        }
    }
}

//! Versioned model records.
//!
//! [`SoftmaxRegressionRecord`] is the persistence surface of a trained
//! model: an explicit named-field record carrying `{parameters, num_classes,
//! lambda, fit_intercept}` plus a format version, encoded as JSON. Decoding
//! rejects unknown versions instead of guessing.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::regression::SoftmaxRegression;

/// Current record format version.
pub const FORMAT_VERSION: u32 = 1;

/// Errors from encoding or decoding model records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("unsupported record version {got}, current version is {current}")]
    UnsupportedVersion { got: u32, current: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable snapshot of a [`SoftmaxRegression`] model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegressionRecord {
    pub version: u32,
    pub parameters: Array2<f64>,
    pub num_classes: usize,
    pub lambda: f64,
    pub fit_intercept: bool,
}

impl SoftmaxRegressionRecord {
    /// Snapshot a model at the current format version.
    pub fn from_model(model: &SoftmaxRegression) -> Self {
        Self {
            version: FORMAT_VERSION,
            parameters: model.parameters().clone(),
            num_classes: model.num_classes(),
            lambda: model.lambda(),
            fit_intercept: model.fit_intercept(),
        }
    }

    /// Rebuild the model this record was taken from.
    pub fn into_model(self) -> SoftmaxRegression {
        SoftmaxRegression::from_parts(
            self.parameters,
            self.num_classes,
            self.lambda,
            self.fit_intercept,
        )
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON, rejecting records written at a different format
    /// version.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: Self = serde_json::from_str(json)?;
        if record.version != FORMAT_VERSION {
            return Err(RecordError::UnsupportedVersion {
                got: record.version,
                current: FORMAT_VERSION,
            });
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn record_captures_all_model_fields() {
        let model = SoftmaxRegression::from_parts(array![[0.1, 0.2], [0.3, 0.4]], 2, 0.05, false);
        let record = SoftmaxRegressionRecord::from_model(&model);

        assert_eq!(record.version, FORMAT_VERSION);
        assert_eq!(record.parameters, *model.parameters());
        assert_eq!(record.num_classes, 2);
        assert_eq!(record.lambda, 0.05);
        assert!(!record.fit_intercept);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let model = SoftmaxRegression::from_parts(array![[0.0]], 1, 0.0, false);
        let mut record = SoftmaxRegressionRecord::from_model(&model);
        record.version = 99;

        let json = record.to_json().unwrap();
        assert!(matches!(
            SoftmaxRegressionRecord::from_json(&json),
            Err(RecordError::UnsupportedVersion { got: 99, .. })
        ));
    }
}

//! Pre-trained stroke classifier
//!
//! The artifact is a fitted preprocessing + logistic regression pipeline
//! persisted as JSON:
//!
//! ```text
//! {
//!   "numeric":      [{"column": "age", "mean": 43.2, "scale": 22.6}, ...],
//!   "categorical":  [{"column": "gender", "categories": ["Female", "Male"],
//!                     "handle_unknown": "ignore"}, ...],
//!   "coefficients": [...],
//!   "intercept":    -4.4
//! }
//! ```
//!
//! The encoded feature vector is the standardized numeric columns followed by
//! one one-hot block per categorical column, both in artifact order.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::record::{FieldValue, ValidatedRecord};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClassifierError {
    #[error("failed to load model artifact {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("model expects {expected} coefficients, artifact has {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("column '{0}' is missing from the input row")]
    MissingColumn(String),

    #[error("column '{column}' expects a {expected} value")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("found unknown category {value} in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("model produced a non-finite probability")]
    NonFinite,

    #[error("model produced probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Anything able to score a single validated record
///
/// Returns `[P(class = 0), P(class = 1)]`.
pub trait StrokeClassifier: Send + Sync {
    fn predict_proba(&self, row: &ValidatedRecord) -> Result<[f64; 2], ClassifierError>;
}

#[derive(Debug, Clone, Deserialize)]
struct NumericColumn {
    column: String,
    mean: f64,
    scale: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum CategoryLabel {
    Code(i64),
    Text(String),
}

impl CategoryLabel {
    fn matches(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (CategoryLabel::Code(a), FieldValue::Code(b)) => a == b,
            (CategoryLabel::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum HandleUnknown {
    #[default]
    Ignore,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
struct CategoricalColumn {
    column: String,
    categories: Vec<CategoryLabel>,
    #[serde(default)]
    handle_unknown: HandleUnknown,
}

/// Standard scaler + one-hot encoder + logistic regression
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticPipeline {
    #[serde(default)]
    numeric: Vec<NumericColumn>,
    #[serde(default)]
    categorical: Vec<CategoricalColumn>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticPipeline {
    /// Load and check a pipeline artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ClassifierError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pipeline = Self::from_json(&contents).map_err(|e| match e {
            ClassifierError::Load { reason, .. } => ClassifierError::Load {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        tracing::info!(
            path = %path.display(),
            numeric = pipeline.numeric.len(),
            categorical = pipeline.categorical.len(),
            features = pipeline.coefficients.len(),
            "Loaded classifier artifact"
        );

        Ok(pipeline)
    }

    /// Parse and check a pipeline artifact from its JSON text
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let pipeline: Self = serde_json::from_str(json).map_err(|e| ClassifierError::Load {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        pipeline.check()?;
        Ok(pipeline)
    }

    /// Width of the encoded feature vector
    pub fn feature_count(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    fn check(&self) -> Result<(), ClassifierError> {
        let expected = self.feature_count();
        if self.coefficients.len() != expected {
            return Err(ClassifierError::Shape {
                expected,
                actual: self.coefficients.len(),
            });
        }

        for column in &self.numeric {
            if column.scale == 0.0 || !column.scale.is_finite() || !column.mean.is_finite() {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "column '{}' has unusable scaling (mean {}, scale {})",
                    column.column, column.mean, column.scale
                )));
            }
        }

        if self.coefficients.iter().any(|c| !c.is_finite()) || !self.intercept.is_finite() {
            return Err(ClassifierError::InvalidArtifact(
                "coefficients must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Encode a record into the model's feature space
    fn encode(&self, row: &ValidatedRecord) -> Result<Vec<f64>, ClassifierError> {
        let mut features = Vec::with_capacity(self.coefficients.len());

        for column in &self.numeric {
            let raw = match lookup(row, &column.column)? {
                FieldValue::Number(x) => *x,
                FieldValue::Code(code) => *code as f64,
                FieldValue::Text(_) => {
                    return Err(ClassifierError::ColumnType {
                        column: column.column.clone(),
                        expected: "numeric",
                    });
                }
            };
            features.push((raw - column.mean) / column.scale);
        }

        for column in &self.categorical {
            let value = lookup(row, &column.column)?;
            if let FieldValue::Number(_) = value {
                return Err(ClassifierError::ColumnType {
                    column: column.column.clone(),
                    expected: "categorical",
                });
            }

            let hit = column.categories.iter().position(|c| c.matches(value));
            if hit.is_none() && column.handle_unknown == HandleUnknown::Error {
                return Err(ClassifierError::UnknownCategory {
                    column: column.column.clone(),
                    value: value.to_string(),
                });
            }

            // Unknown categories encode as an all-zero block
            features.extend((0..column.categories.len()).map(|i| {
                if Some(i) == hit { 1.0 } else { 0.0 }
            }));
        }

        Ok(features)
    }
}

fn lookup<'a>(row: &'a ValidatedRecord, column: &str) -> Result<&'a FieldValue, ClassifierError> {
    row.get(column)
        .ok_or_else(|| ClassifierError::MissingColumn(column.to_string()))
}

/// Logistic function, stable for large magnitudes
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl StrokeClassifier for LogisticPipeline {
    fn predict_proba(&self, row: &ValidatedRecord) -> Result<[f64; 2], ClassifierError> {
        let features = self.encode(row)?;
        if features.len() != self.coefficients.len() {
            return Err(ClassifierError::Shape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let logit = self.intercept
            + features
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();

        let positive = sigmoid(logit);
        if !positive.is_finite() {
            return Err(ClassifierError::NonFinite);
        }

        Ok([1.0 - positive, positive])
    }
}

//! Stroke-risk prediction service
//!
//! Validates a submitted record and scores it with the loaded classifier.

use std::sync::Arc;

use crate::model::record::RawRecord;
use crate::service::classifier::{ClassifierError, StrokeClassifier};
use crate::service::validation::{ValidationError, validate};

/// Index of the positive (stroke) class in the classifier output
const POSITIVE_CLASS: usize = 1;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Inference failed: {0}")]
    Inference(#[from] ClassifierError),
}

/// Serves positive-class probabilities from a read-only classifier
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn StrokeClassifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn StrokeClassifier>) -> Self {
        Self { classifier }
    }

    /// Validate `record` and return the probability of a stroke
    pub fn predict(&self, record: &RawRecord) -> Result<f64, PredictionError> {
        let validated = validate(record)?;
        tracing::debug!(record = ?validated, "Record validated");

        let probas = self.classifier.predict_proba(&validated)?;
        let probability = probas[POSITIVE_CLASS];

        if !(0.0..=1.0).contains(&probability) {
            return Err(ClassifierError::ProbabilityOutOfRange(probability).into());
        }

        tracing::debug!(probability, "Prediction computed");
        Ok(probability)
    }
}

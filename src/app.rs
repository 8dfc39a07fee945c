//! Application state and service initialization
//!
//! The classifier artifact is loaded exactly once here, before the server
//! starts accepting requests, and is shared read-only by every worker.

use std::sync::Arc;

use crate::model::Config;
use crate::service::classifier::ClassifierError;
use crate::service::{LogisticPipeline, PredictionService, StrokeClassifier};

/// Application state shared by all HTTP workers
pub struct AppState {
    pub config: Config,
    pub prediction_service: PredictionService,
}

impl AppState {
    /// Load the classifier artifact and build the services
    pub fn new(config: Config) -> Result<Self, AppError> {
        let classifier: Arc<dyn StrokeClassifier> =
            Arc::new(LogisticPipeline::load(&config.model_path)?);

        Ok(Self {
            config,
            prediction_service: PredictionService::new(classifier),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// The classifier artifact could not be loaded
    #[error("Model initialization failed: {0}")]
    ModelLoad(#[from] ClassifierError),
}

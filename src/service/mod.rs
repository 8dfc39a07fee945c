pub mod classifier;
pub mod prediction;
pub mod validation;

pub use classifier::{LogisticPipeline, StrokeClassifier};
pub use prediction::PredictionService;

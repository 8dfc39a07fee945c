pub mod config;
pub mod record;
pub mod schema;

pub use config::Config;
pub use record::{PatientRecord, PingResponse, PredictionResponse, RawRecord};

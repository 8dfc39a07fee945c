//! Patient records as received from clients and after validation

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Untyped record exactly as submitted by a client
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Normalized value of a single validated field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric-range field, coerced to floating point
    Number(f64),
    /// Text category, kept as submitted
    Text(String),
    /// Integer-coded category, kept as an integer
    Code(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "'{}'", s),
            FieldValue::Code(code) => write!(f, "{}", code),
        }
    }
}

/// Schema-conformant record ready for inference
///
/// Holds exactly one value per schema field, in declared order. Only the
/// validator constructs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ValidatedRecord {
    pub(crate) fn from_fields(fields: Vec<(&'static str, FieldValue)>) -> Self {
        Self { fields }
    }

    /// Value of a column, if present
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Columns and values in declared order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }
}

/// Request body of `POST /predict`, as published in the OpenAPI document.
///
/// The handler itself accepts an untyped [`RawRecord`] so that missing,
/// extra and mistyped fields are reported by the validator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[allow(dead_code)] // OpenAPI request schema only
#[schema(example = json!({
    "gender": "Male",
    "age": 67,
    "ever_married": "Yes",
    "work_type": "Private",
    "Residence_type": "Urban",
    "avg_glucose_level": 228.69,
    "bmi": 36.6,
    "smoking_status": "formerly smoked",
    "hypertension": 0,
    "heart_disease": 1
}))]
pub struct PatientRecord {
    /// One of `Male`, `Female`, `Other`
    pub gender: String,
    /// Age in years, within [0, 120]
    pub age: f64,
    /// One of `Yes`, `No`
    pub ever_married: String,
    /// One of `Private`, `Self-employed`, `Govt_job`, `children`, `Never_worked`
    pub work_type: String,
    /// One of `Urban`, `Rural`
    #[serde(rename = "Residence_type")]
    pub residence_type: String,
    /// Average glucose level in mg/dL, within [0, 400]
    pub avg_glucose_level: f64,
    /// Body mass index, within [10, 100]
    pub bmi: f64,
    /// One of `formerly smoked`, `never smoked`, `smokes`
    pub smoking_status: String,
    /// 0 or 1
    pub hypertension: i64,
    /// 0 or 1
    pub heart_disease: i64,
}

/// Successful prediction response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    /// Probability of the positive (stroke) class, within [0, 1]
    pub stroke_probability: f64,
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub status: String,
}

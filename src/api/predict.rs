//! Prediction endpoint

use actix_web::{HttpResponse, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{PatientRecord, PredictionResponse, RawRecord};
use crate::service::PredictionService;

/// Predict the probability of a stroke for one patient record
///
/// The record must contain exactly the ten schema fields. Validation
/// failures name the offending field and the expected constraint.
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PatientRecord,
    responses(
        (status = 200, description = "Prediction computed", body = PredictionResponse),
        (status = 400, description = "Record failed validation", body = ErrorResponse),
        (status = 500, description = "Inference failed", body = ErrorResponse)
    ),
    tag = "prediction"
)]
#[post("/predict")]
pub async fn predict(
    service: web::Data<PredictionService>,
    payload: web::Json<RawRecord>,
) -> Result<HttpResponse, ApiError> {
    let stroke_probability = service.predict(&payload)?;

    Ok(HttpResponse::Ok().json(PredictionResponse { stroke_probability }))
}

/// Rejects bodies that are not a JSON object with a 400
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(predict);
}

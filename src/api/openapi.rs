//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{PatientRecord, PingResponse, PredictionResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stroke Predictor",
        description = "Stroke-risk probabilities from a pre-trained classifier"
    ),
    paths(
        crate::api::home::home,
        crate::api::health::ping,
        crate::api::predict::predict
    ),
    components(schemas(PatientRecord, PredictionResponse, PingResponse, ErrorResponse)),
    tags(
        (name = "prediction", description = "Stroke-risk inference"),
        (name = "health", description = "Liveness checks"),
        (name = "ui", description = "Browser form")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

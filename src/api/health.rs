//! Liveness endpoint

use actix_web::{HttpResponse, Responder, get, web};

use crate::model::PingResponse;

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Service is alive", body = PingResponse)
    ),
    tag = "health"
)]
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(PingResponse {
        status: "ok".to_string(),
    })
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ping);
}

//! Static landing page

use actix_web::{HttpResponse, get, http::header::ContentType, web};

use crate::api::error::ApiError;
use crate::model::Config;

/// Serve the HTML form page verbatim from disk
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML landing page", body = String, content_type = "text/html"),
        (status = 500, description = "Page could not be read", body = crate::api::error::ErrorResponse)
    ),
    tag = "ui"
)]
#[get("/")]
pub async fn home(config: web::Data<Config>) -> Result<HttpResponse, ApiError> {
    let page = tokio::fs::read_to_string(&config.index_path)
        .await
        .map_err(|e| {
            ApiError::Internal(format!(
                "failed to read {}: {}",
                config.index_path.display(),
                e
            ))
        })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page))
}

/// Configure landing page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
}

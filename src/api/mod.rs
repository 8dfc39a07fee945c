pub mod error;
pub mod health;
pub mod home;
pub mod openapi;
pub mod predict;

use actix_web::web;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home::configure)
        .configure(health::configure)
        .configure(predict::configure)
        .configure(openapi::configure);
}

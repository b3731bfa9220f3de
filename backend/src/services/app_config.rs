//! # Runtime configuration endpoint
//!
//! Serves the [`AppConfig`] the launcher was started with, so the same frontend
//! bundle can be pointed at a different parsing service without a rebuild.

use actix_web::{web, HttpResponse};
use common::config::{AppConfig, APP_CONFIG_PATH};

/// Registers `GET /app-config.json`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(APP_CONFIG_PATH, web::get().to(process));
}

async fn process(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(config.get_ref())
}

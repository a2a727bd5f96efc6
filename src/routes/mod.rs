use actix_web::{web, HttpResponse};

use crate::models::catalog::ApiEnvelope;
use crate::services::catalog_service::CatalogError;

pub mod admin;
pub mod health;
pub mod trip;

/// Mounts every `/api` route. Shared by the server and the integration tests.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| async { "OK" }))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .configure(admin::config)
                .service(
                    web::scope("/trips")
                        .route("", web::get().to(trip::get_all))
                        .route("/", web::get().to(trip::get_all))
                        .route("/{id}", web::get().to(trip::get_by_id)),
                ),
        );
}

/// Maps a catalog failure onto the response the UI sees. The catalog is an
/// upstream, so its failures are reported as 502 rather than 500.
pub fn catalog_error_response(context: &str, err: &CatalogError) -> HttpResponse {
    match err {
        CatalogError::NotFound(_) => HttpResponse::NotFound().json(ApiEnvelope::error(err.to_string())),
        _ => {
            log::error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(ApiEnvelope::error(context))
        }
    }
}

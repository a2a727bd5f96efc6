use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let catalog = match data.catalog.ping().await {
        Ok(status) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Catalog responded with {}", status)),
        },
        Err(err) => {
            log::warn!("Catalog health check failed: {}", err);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(err.to_string()),
            }
        }
    };

    let status = if catalog.status == "ok" { "ok" } else { "degraded" };
    let mut services = HashMap::new();
    services.insert("catalog".to_string(), catalog);

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: data.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

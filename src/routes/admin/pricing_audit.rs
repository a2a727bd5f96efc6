use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::middleware::auth_context::AdminSession;
use crate::models::catalog::ApiEnvelope;
use crate::routes::catalog_error_response;
use crate::services::price_format::NumberLocale;
use crate::services::pricing_service::{NormalizeOptions, PricingAudit, PricingService};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PricingAuditReport {
    pub total: usize,
    pub unresolved: usize,
    /// Trips whose shown price would change under the other fallback policy.
    pub policy_sensitive: usize,
    pub trips: Vec<PricingAudit>,
}

/*
    /api/admin/pricing-audit
*/
pub async fn get_all(user: AdminSession, data: web::Data<AppState>) -> impl Responder {
    let raw = match data.catalog.list_trips().await {
        Ok(raw) => raw,
        Err(err) => return catalog_error_response("Failed to retrieve trips for audit", &err),
    };

    // Back-office figures use Western grouping regardless of the storefront locale.
    let options = NormalizeOptions {
        locale: NumberLocale::Western,
        ..data.pricing
    };
    let trips: Vec<PricingAudit> = raw
        .iter()
        .map(|trip| PricingService::audit(trip, &options))
        .collect();

    let report = PricingAuditReport {
        total: trips.len(),
        unresolved: trips
            .iter()
            .filter(|audit| !audit.price_resolved)
            .count(),
        policy_sensitive: trips
            .iter()
            .filter(|audit| audit.fallback_changes_price)
            .count(),
        trips,
    };

    log::info!(
        "Pricing audit for {}: {} trips, {} unresolved",
        user.0.email,
        report.total,
        report.unresolved
    );
    HttpResponse::Ok().json(ApiEnvelope::ok(report))
}

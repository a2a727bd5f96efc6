use actix_web::{web, HttpResponse, Responder};

use crate::models::catalog::ApiEnvelope;
use crate::models::filter::{TripFilter, TripQuery};
use crate::routes::catalog_error_response;
use crate::services::pricing_service::PricingService;
use crate::services::trip_filter_service::TripFilterService;
use crate::state::AppState;

/*
    /api/trips?min_price=&max_price=&duration=&categories=&destination=&trip_type=&search=&sort=
*/
pub async fn get_all(data: web::Data<AppState>, query: web::Query<TripQuery>) -> impl Responder {
    let raw = match data.catalog.list_trips().await {
        Ok(raw) => raw,
        Err(err) => return catalog_error_response("Failed to retrieve trips", &err),
    };

    let query = query.into_inner();
    let filter = TripFilter::from(&query);
    let trips = PricingService::normalize_all(raw, &data.pricing);
    let trips = TripFilterService::apply(trips, &filter, query.sort.unwrap_or_default());
    let meta = TripFilterService::meta(&trips);

    HttpResponse::Ok().json(ApiEnvelope::ok(trips).with_meta(meta))
}

/*
    /api/trips/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let id = path.into_inner();

    match data.catalog.get_trip(&id).await {
        Ok(raw) => HttpResponse::Ok().json(ApiEnvelope::ok(PricingService::normalize_with(
            raw,
            &data.pricing,
        ))),
        Err(err) => catalog_error_response("Failed to retrieve trip", &err),
    }
}

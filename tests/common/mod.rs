#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use trip_catalog_api::config::AppConfig;
use trip_catalog_api::middleware::auth::Claims;
use trip_catalog_api::routes;
use trip_catalog_api::state::AppState;

pub const API_KEY: &str = "test-catalog-key";
pub const JWT_SECRET: &str = "test-jwt-secret";

/// A catalog listing with one record of every pricing shape, plus one record
/// that is not a trip at all.
pub fn sample_listing() -> Value {
    json!({
        "success": true,
        "data": [
            {
                "_id": "spiti", "title": "Spiti Valley Circuit", "slug": "spiti-valley-circuit",
                "days": 8, "nights": 7, "rating": 4.8,
                "category_id": ["adventure", "trek"], "destination_id": "himachal",
                "hero_image": "https://cdn.example.com/spiti.jpg",
                "itinerary": [{ "day": 1, "title": "Manali to Kaza" }],
                "pricing_model": "fixed_departure",
                "pricing": { "fixed_departure": [{
                    "from_date": "2026-06-01", "title": "June batch",
                    "costingPackages": [
                        { "title": "Triple sharing", "base_price": 28000, "final_price": 25000, "discount": 3000 },
                        { "title": "Double sharing", "base_price": 31000, "final_price": 29000, "discount": 2000 }
                    ]
                }] }
            },
            {
                "_id": "kerala", "title": "Kerala Backwaters", "days": 5, "rating": 4.5,
                "category_id": [{ "_id": "family", "name": "Family" }],
                "destination_id": { "_id": "kerala", "name": "Kerala" },
                "pricing": { "customized": { "base_price": 20000, "final_price": 18500, "discount": 0, "pricing_type": "per_person" } }
            },
            {
                "_id": "ladakh", "title": "Ladakh Bike Expedition", "days": 12,
                "category_id": ["adventure"], "destination_id": "ladakh",
                "pricing": { "fixed_departure": [{ "costingPackages": [{ "final_price": 42000 }] }] }
            },
            {
                "_id": "goa", "title": "Goa Getaway", "days": 3, "rating": 4.5,
                "category_id": [], "destination_id": null,
                "pricing": {}
            },
            {
                "_id": "rajasthan", "title": "Royal Rajasthan", "days": 9, "rating": 4.9,
                "category_id": ["heritage"], "destination_id": "rajasthan",
                "pricing": { "customized": { "final_price": 1250000, "discount": 50000 } }
            },
            {
                "_id": "andaman", "title": "Andaman Islands", "days": 6, "rating": 4.0,
                "category_id": ["beach"], "destination_id": "andaman",
                "pricing_model": "fixed",
                "pricing": {
                    "fixed_departure": [{ "from_date": "2026-12-20", "costingPackages": [] }],
                    "customized": { "final_price": 60000, "discount": 5000 }
                }
            },
            "corrupt-record"
        ]
    })
}

async fn list_trips(req: HttpRequest, listing: web::Data<Value>) -> impl Responder {
    if !has_api_key(&req) {
        return HttpResponse::Unauthorized().json(json!({ "success": false, "message": "bad key" }));
    }
    HttpResponse::Ok().json(listing.get_ref())
}

async fn get_trip(
    req: HttpRequest,
    path: web::Path<String>,
    listing: web::Data<Value>,
) -> impl Responder {
    if !has_api_key(&req) {
        return HttpResponse::Unauthorized().json(json!({ "success": false, "message": "bad key" }));
    }
    let id = path.into_inner();
    let found = listing["data"]
        .as_array()
        .and_then(|trips| trips.iter().find(|trip| trip["_id"] == id.as_str()));

    match found {
        Some(trip) => HttpResponse::Ok().json(json!({ "data": trip })),
        None => HttpResponse::NotFound().json(json!({ "success": false, "message": "Trip not found" })),
    }
}

fn has_api_key(req: &HttpRequest) -> bool {
    req.headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        == Some(API_KEY)
}

/// Starts a catalog API on a free local port serving `listing` and returns
/// its base URL.
pub fn spawn_fake_catalog(listing: Value) -> String {
    let listing = web::Data::new(listing);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(listing.clone())
            .route("/v1/trips/", web::get().to(list_trips))
            .route("/v1/trips/{id}", web::get().to(get_trip))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake catalog");

    let port = server.addrs()[0].port();
    actix_rt::spawn(server.run());
    format!("http://127.0.0.1:{}/v1", port)
}

/// A base URL nothing listens on.
pub fn unreachable_catalog() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to reserve port");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}/v1", port)
}

pub fn test_config(base_url: &str, api_key: &str) -> AppConfig {
    AppConfig::from_lookup(|key: &str| match key {
        "CATALOG_API_URL" => Some(base_url.to_string()),
        "CATALOG_API_KEY" => Some(api_key.to_string()),
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "CATALOG_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .expect("Test config must be valid")
}

pub fn test_state(base_url: &str) -> AppState {
    AppState::from_config(&test_config(base_url, API_KEY)).expect("Failed to build state")
}

pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(routes::config)
}

pub fn token_for(role: &str, secret: &str, valid_for: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: format!("{}@example-travel.in", role),
        exp: (now + valid_for).timestamp() as usize,
        iat: now.timestamp() as usize,
        user_id: format!("{}-1", role),
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

pub fn admin_token() -> String {
    token_for("admin", JWT_SECRET, Duration::hours(1))
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|trips| {
            trips
                .iter()
                .filter_map(|trip| trip["_id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

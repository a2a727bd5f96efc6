use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_catalog_api::{config::AppConfig, routes, state::AppState};

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|err| {
        log::error!("Invalid configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    })?;

    let state = AppState::from_config(&config).map_err(|err| {
        log::error!("Failed to build catalog client: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err)
    })?;

    log::info!(
        "Serving catalog {} with {} grouping and {:?} pricing",
        config.catalog.base_url,
        config.pricing.locale,
        config.pricing.policy
    );
    log::info!("Binding to {}:{}", config.host, config.port);

    let data = web::Data::new(state);
    let allowed_origin = config.cors_allowed_origin.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(allowed_origin.as_deref()))
            .app_data(data.clone())
            .configure(routes::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

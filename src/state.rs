use crate::config::AppConfig;
use crate::services::catalog_service::{CatalogClient, CatalogError};
use crate::services::pricing_service::NormalizeOptions;

/// Shared, read-only state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub pricing: NormalizeOptions,
    pub jwt_secret: String,
    pub environment: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(AppState {
            catalog: CatalogClient::new(&config.catalog)?,
            pricing: config.pricing,
            jwt_secret: config.jwt_secret.clone(),
            environment: config.environment.clone(),
        })
    }
}

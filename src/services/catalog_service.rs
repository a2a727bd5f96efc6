use std::error::Error;
use std::fmt;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::CatalogConfig;
use crate::models::catalog::ApiEnvelope;
use crate::models::trip::RawTrip;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug)]
pub enum CatalogError {
    HttpError(reqwest::Error),
    StatusError(StatusCode),
    Unsuccessful(String),
    NotFound(String),
    DecodeError(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::HttpError(err) => write!(f, "HTTP error: {}", err),
            CatalogError::StatusError(status) => {
                write!(f, "Catalog responded with status {}", status)
            }
            CatalogError::Unsuccessful(msg) => write!(f, "Catalog reported failure: {}", msg),
            CatalogError::NotFound(id) => write!(f, "Trip not found: {}", id),
            CatalogError::DecodeError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for CatalogError {}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::HttpError(err)
    }
}

/// Client for the remote trip catalog.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `GET /trips/`. Records that cannot be read as a trip are skipped.
    pub async fn list_trips(&self) -> Result<Vec<RawTrip>, CatalogError> {
        let url = self.endpoint("trips/")?;
        let envelope: ApiEnvelope<Vec<Value>> = self.fetch(url).await?;

        if !envelope.success {
            return Err(CatalogError::Unsuccessful(
                envelope
                    .message
                    .unwrap_or_else(|| "listing returned success: false".to_string()),
            ));
        }

        let records = envelope.data.unwrap_or_default();
        let total = records.len();
        let trips: Vec<RawTrip> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(trip) => Some(trip),
                Err(err) => {
                    log::warn!("Skipping catalog record {}: {}", index, err);
                    None
                }
            })
            .collect();

        log::debug!("Catalog returned {} trips ({} usable)", total, trips.len());
        Ok(trips)
    }

    /// `GET /trips/{id}`.
    pub async fn get_trip(&self, id: &str) -> Result<RawTrip, CatalogError> {
        let mut url = self.endpoint("trips/")?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::DecodeError("catalog URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push(id);

        let envelope: ApiEnvelope<RawTrip> = match self.fetch(url).await {
            Err(CatalogError::StatusError(status)) if status == StatusCode::NOT_FOUND => {
                return Err(CatalogError::NotFound(id.to_string()))
            }
            other => other?,
        };

        if !envelope.success {
            return Err(CatalogError::Unsuccessful(
                envelope
                    .message
                    .unwrap_or_else(|| format!("trip {} returned success: false", id)),
            ));
        }

        envelope
            .data
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Reachability probe for the health endpoint.
    pub async fn ping(&self) -> Result<StatusCode, CatalogError> {
        let url = self.endpoint("trips/")?;
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(CatalogError::StatusError(status))
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|err| CatalogError::DecodeError(format!("Invalid catalog path {}: {}", path, err)))
    }

    async fn fetch<T>(&self, url: Url) -> Result<ApiEnvelope<T>, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        log::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::StatusError(status));
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| CatalogError::DecodeError(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_base_url;
    use std::time::Duration;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: parse_base_url(base).unwrap(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let catalog = client("https://api.example.com/v1");
        assert_eq!(
            catalog.endpoint("trips/").unwrap().as_str(),
            "https://api.example.com/v1/trips/"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::NotFound("abc".to_string()).to_string(),
            "Trip not found: abc"
        );
        assert_eq!(
            CatalogError::StatusError(StatusCode::BAD_GATEWAY).to_string(),
            "Catalog responded with status 502 Bad Gateway"
        );
    }
}

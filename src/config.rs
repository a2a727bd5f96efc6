use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::services::price_format::NumberLocale;
use crate::services::pricing_service::{NormalizeOptions, PricingPolicy};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const CATALOG_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub catalog: CatalogConfig,
    pub jwt_secret: String,
    pub cors_allowed_origin: Option<String>,
    /// Formatting and fallback used for storefront listings.
    pub pricing: NormalizeOptions,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                reason: format!("{} is not a port number", raw),
            })?,
            None => PORT,
        };

        let timeout_secs = match get("CATALOG_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "CATALOG_TIMEOUT_SECS",
                reason: format!("{} is not a number of seconds", raw),
            })?,
            None => CATALOG_TIMEOUT_SECS,
        };

        let base_url = parse_base_url(&require("CATALOG_API_URL")?)?;

        let locale = match get("PRICE_LOCALE") {
            Some(raw) => raw.parse::<NumberLocale>().map_err(|reason| ConfigError::Invalid {
                key: "PRICE_LOCALE",
                reason,
            })?,
            None => NumberLocale::default(),
        };

        let policy = match get("PRICING_FALLBACK") {
            Some(raw) => raw.parse::<PricingPolicy>().map_err(|reason| ConfigError::Invalid {
                key: "PRICING_FALLBACK",
                reason,
            })?,
            None => PricingPolicy::default(),
        };

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| HOST.to_string()),
            port,
            environment: get("RUST_ENV").unwrap_or_else(|| "development".to_string()),
            catalog: CatalogConfig {
                base_url,
                api_key: require("CATALOG_API_KEY")?,
                timeout: Duration::from_secs(timeout_secs),
            },
            jwt_secret: require("JWT_SECRET")?,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
            pricing: NormalizeOptions { locale, policy },
        })
    }
}

/// Parses the catalog base URL so that relative joins stay under its path.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&with_slash).map_err(|err| ConfigError::Invalid {
        key: "CATALOG_API_URL",
        reason: err.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key: "CATALOG_API_URL",
            reason: format!("unsupported scheme {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("CATALOG_API_URL", "https://api.example.com/v1"),
        ("CATALOG_API_KEY", "catalog-key"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.catalog.base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.pricing, NormalizeOptions::default());
        assert_eq!(config.cors_allowed_origin, None);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9090"),
            ("PRICE_LOCALE", "en-US"),
            ("PRICING_FALLBACK", "customized"),
            ("CATALOG_TIMEOUT_SECS", "3"),
            ("CORS_ALLOWED_ORIGIN", "https://www.example-travel.in"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.pricing.locale, NumberLocale::Western);
        assert_eq!(config.pricing.policy, PricingPolicy::FallbackToCustomized);
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert_eq!(
            config.cors_allowed_origin.as_deref(),
            Some("https://www.example-travel.in")
        );
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("CATALOG_API_URL", "ftp://api.example.com");
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err.to_string(), "CATALOG_API_URL is invalid: unsupported scheme ftp");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        for (key, value) in REQUIRED {
            env::set_var(key, value);
        }
        env::set_var("PRICE_LOCALE", "   ");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.catalog.api_key, "catalog-key");
        assert_eq!(config.pricing.locale, NumberLocale::Indian);

        for (key, _) in REQUIRED {
            env::remove_var(key);
        }
        env::remove_var("PRICE_LOCALE");
    }
}

use serde::{Deserialize, Serialize};

/// `{ success, data }` body used by the catalog API and by this service.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListingMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Price span of a listing, over trips whose price resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListingMeta {
    pub total: usize,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        ApiEnvelope {
            success: true,
            data: Some(data),
            meta: None,
            message: None,
        }
    }

    pub fn with_meta(mut self, meta: ListingMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl ApiEnvelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiEnvelope {
            success: false,
            data: None,
            meta: None,
            message: Some(message.into()),
        }
    }
}

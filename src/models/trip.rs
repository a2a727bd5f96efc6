use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnError};

/// Keys added by normalization. They are stripped from a record's fields
/// before the derived values are written again.
pub const DERIVED_FIELDS: [&str; 4] = [
    "is_fixed_departure",
    "final_price",
    "final_price_display",
    "discount",
];

/// One selectable price tier inside a fixed departure.
#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CostPackage {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub title: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub discount: Option<f64>,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DepartureOption {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub from_date: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub title: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    #[serde(rename = "costingPackages", default)]
    pub costing_packages: Vec<CostPackage>,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CustomPricing {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub pricing_type: Option<String>,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Pricing {
    #[serde_as(deserialize_as = "DefaultOnError<Option<Vec<DefaultOnError>>>")]
    #[serde(default)]
    pub fixed_departure: Option<Vec<DepartureOption>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub customized: Option<CustomPricing>,
}

/// A trip record as served by the catalog API.
///
/// The catalog is loosely structured: any field may be missing, null, or of an
/// unexpected type. The record is kept exactly as received in `fields`, which
/// is what gets serialized. The typed fields are a read-only view over it,
/// decoded leniently: a wrong type reads as absent but stays in `fields`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(from = "Map<String, Value>")]
pub struct RawTrip {
    #[serde(skip)]
    pub mongo_id: Option<String>,
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip)]
    pub title: Option<String>,
    #[serde(skip)]
    pub slug: Option<String>,
    #[serde(skip)]
    pub days: Option<u32>,
    #[serde(skip)]
    pub nights: Option<u32>,
    #[serde(skip)]
    pub rating: Option<f64>,
    #[serde(skip)]
    pub pricing_model: Option<String>,
    #[serde(skip)]
    pub fixed_departure: Option<Vec<Value>>,
    #[serde(skip)]
    pub pricing: Option<Pricing>,
    #[serde(skip)]
    pub category_id: Option<Value>,
    #[serde(skip)]
    pub destination_id: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<Map<String, Value>> for RawTrip {
    fn from(fields: Map<String, Value>) -> Self {
        RawTrip {
            mongo_id: fields.get("_id").and_then(reference_id),
            id: fields.get("id").and_then(reference_id),
            title: lenient(&fields, "title"),
            slug: lenient(&fields, "slug"),
            days: lenient(&fields, "days"),
            nights: lenient(&fields, "nights"),
            rating: lenient(&fields, "rating"),
            pricing_model: lenient(&fields, "pricing_model"),
            fixed_departure: lenient(&fields, "fixed_departure"),
            pricing: lenient(&fields, "pricing"),
            category_id: fields.get("category_id").filter(|value| !value.is_null()).cloned(),
            destination_id: fields.get("destination_id").filter(|value| !value.is_null()).cloned(),
            fields,
        }
    }
}

fn lenient<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    fields.get(key).and_then(|value| T::deserialize(value).ok())
}

impl RawTrip {
    /// `_id` when present, otherwise `id`.
    pub fn identifier(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }

    /// Category ids, whether the catalog sent bare ids or populated objects.
    pub fn category_ids(&self) -> Vec<String> {
        match &self.category_id {
            Some(Value::Array(items)) => items.iter().filter_map(reference_id).collect(),
            Some(other) => reference_id(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn destination(&self) -> Option<String> {
        self.destination_id.as_ref().and_then(reference_id)
    }

    pub fn departures(&self) -> &[DepartureOption] {
        self.pricing
            .as_ref()
            .and_then(|pricing| pricing.fixed_departure.as_deref())
            .unwrap_or_default()
    }

    pub fn customized(&self) -> Option<&CustomPricing> {
        self.pricing.as_ref().and_then(|pricing| pricing.customized.as_ref())
    }
}

fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        Value::Object(populated) => populated
            .get("_id")
            .or_else(|| populated.get("id"))
            .or_else(|| populated.get("$oid"))
            .and_then(reference_id),
        _ => None,
    }
}

/// A trip with its commercial type and display price resolved.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NormalizedTrip {
    #[serde(flatten)]
    pub trip: RawTrip,
    pub is_fixed_departure: bool,
    pub final_price: f64,
    pub final_price_display: String,
    pub discount: f64,
}

impl NormalizedTrip {
    pub fn has_price(&self) -> bool {
        self.final_price > 0.0
    }
}

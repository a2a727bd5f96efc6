use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
    Extended,
}

impl DurationBucket {
    /// Inclusive day range covered by the bucket; `None` means open-ended.
    pub fn day_range(&self) -> (u32, Option<u32>) {
        match self {
            DurationBucket::Short => (1, Some(3)),
            DurationBucket::Medium => (4, Some(7)),
            DurationBucket::Long => (8, Some(12)),
            DurationBucket::Extended => (13, None),
        }
    }

    pub fn contains(&self, days: u32) -> bool {
        let (min, max) = self.day_range();
        days >= min && max.map_or(true, |max| days <= max)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    FixedDeparture,
    Customized,
}

impl TripType {
    pub fn matches(&self, is_fixed_departure: bool) -> bool {
        match self {
            TripType::FixedDeparture => is_fixed_departure,
            TripType::Customized => !is_fixed_departure,
        }
    }
}

/// Listing order. `Popular` and `HighestRated` currently share the rating key
/// but stay separate so popularity can move to its own metric.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popular,
    PriceAsc,
    PriceDesc,
    #[serde(rename = "rating")]
    HighestRated,
}

/// Query string accepted by `GET /api/trips`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TripQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub duration: Option<DurationBucket>,
    /// Comma separated category ids.
    pub categories: Option<String>,
    pub destination: Option<String>,
    pub trip_type: Option<TripType>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
}

/// Selection applied to a normalized listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub duration: Option<DurationBucket>,
    pub categories: Vec<String>,
    pub destination: Option<String>,
    pub trip_type: Option<TripType>,
    pub search: Option<String>,
}

impl From<&TripQuery> for TripFilter {
    fn from(query: &TripQuery) -> Self {
        let categories = query
            .categories
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        TripFilter {
            min_price: query.min_price,
            max_price: query.max_price,
            duration: query.duration,
            categories,
            destination: non_blank(query.destination.as_deref()),
            trip_type: query.trip_type,
            search: non_blank(query.search.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert!(DurationBucket::Short.contains(1));
        assert!(DurationBucket::Short.contains(3));
        assert!(!DurationBucket::Short.contains(4));
        assert!(DurationBucket::Medium.contains(4));
        assert!(DurationBucket::Medium.contains(7));
        assert!(DurationBucket::Long.contains(12));
        assert!(!DurationBucket::Long.contains(13));
        assert!(DurationBucket::Extended.contains(30));
        assert!(!DurationBucket::Short.contains(0));
    }

    #[test]
    fn test_filter_from_query() {
        let query = TripQuery {
            categories: Some(" trek, ,family ".to_string()),
            destination: Some("  ".to_string()),
            search: Some(" spiti ".to_string()),
            ..TripQuery::default()
        };
        let filter = TripFilter::from(&query);

        assert_eq!(filter.categories, vec!["trek", "family"]);
        assert_eq!(filter.destination, None);
        assert_eq!(filter.search.as_deref(), Some("spiti"));
    }

    #[test]
    fn test_sort_key_names() {
        let parsed: SortKey = serde_json::from_str("\"rating\"").unwrap();
        assert_eq!(parsed, SortKey::HighestRated);
        let parsed: SortKey = serde_json::from_str("\"price_desc\"").unwrap();
        assert_eq!(parsed, SortKey::PriceDesc);
        assert_eq!(SortKey::default(), SortKey::Popular);
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::RegexBuilder;

use crate::models::catalog::ListingMeta;
use crate::models::filter::{SortKey, TripFilter};
use crate::models::trip::NormalizedTrip;

pub struct TripFilterService;

impl TripFilterService {
    pub fn apply(trips: Vec<NormalizedTrip>, filter: &TripFilter, sort: SortKey) -> Vec<NormalizedTrip> {
        let title_pattern = filter.search.as_deref().and_then(|search| {
            RegexBuilder::new(&regex::escape(search))
                .case_insensitive(true)
                .build()
                .ok()
        });
        let categories: HashSet<&str> = filter.categories.iter().map(String::as_str).collect();

        let mut selected: Vec<NormalizedTrip> = trips
            .into_iter()
            .filter(|trip| Self::within_price(trip, filter))
            .filter(|trip| match filter.duration {
                Some(bucket) => trip.trip.days.is_some_and(|days| bucket.contains(days)),
                None => true,
            })
            .filter(|trip| {
                categories.is_empty()
                    || trip
                        .trip
                        .category_ids()
                        .iter()
                        .any(|id| categories.contains(id.as_str()))
            })
            .filter(|trip| match &filter.destination {
                Some(destination) => trip.trip.destination().as_ref() == Some(destination),
                None => true,
            })
            .filter(|trip| match filter.trip_type {
                Some(trip_type) => trip_type.matches(trip.is_fixed_departure),
                None => true,
            })
            .filter(|trip| match &title_pattern {
                Some(pattern) => trip
                    .trip
                    .title
                    .as_deref()
                    .is_some_and(|title| pattern.is_match(title)),
                None => true,
            })
            .collect();

        Self::sort(&mut selected, sort);
        selected
    }

    /// Inclusive on both bounds; unresolved prices count as 0.
    fn within_price(trip: &NormalizedTrip, filter: &TripFilter) -> bool {
        filter.min_price.map_or(true, |min| trip.final_price >= min)
            && filter.max_price.map_or(true, |max| trip.final_price <= max)
    }

    /// Stable sort. Trips without a rating go after rated ones.
    pub fn sort(trips: &mut [NormalizedTrip], key: SortKey) {
        match key {
            SortKey::Popular => trips.sort_by(|a, b| descending(popularity_key(a), popularity_key(b))),
            SortKey::HighestRated => trips.sort_by(|a, b| descending(a.trip.rating, b.trip.rating)),
            SortKey::PriceAsc => trips.sort_by(|a, b| a.final_price.total_cmp(&b.final_price)),
            SortKey::PriceDesc => trips.sort_by(|a, b| b.final_price.total_cmp(&a.final_price)),
        }
    }

    pub fn meta(trips: &[NormalizedTrip]) -> ListingMeta {
        let prices = trips.iter().filter(|trip| trip.has_price()).map(|trip| trip.final_price);

        ListingMeta {
            total: trips.len(),
            min_price: prices.clone().reduce(f64::min),
            max_price: prices.reduce(f64::max),
        }
    }
}

/// Ranking signal for the "popular" order. The catalog exposes no booking or
/// view counter to the listing, so this is the rating for now.
pub fn popularity_key(trip: &NormalizedTrip) -> Option<f64> {
    trip.trip.rating
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

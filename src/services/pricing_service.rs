use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::trip::{CostPackage, CustomPricing, NormalizedTrip, RawTrip, DERIVED_FIELDS};
use crate::services::price_format::{display_price, NumberLocale};

/// What to do when a fixed-departure trip has no usable package price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Price strictly from the branch the trip is classified into.
    #[default]
    Strict,
    /// Fall back to the customized price (and its discount) when the fixed
    /// departure package price is missing or zero.
    FallbackToCustomized,
}

impl FromStr for PricingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(PricingPolicy::Strict),
            "customized" | "fallback_to_customized" => Ok(PricingPolicy::FallbackToCustomized),
            other => Err(format!("unsupported pricing fallback: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    pub locale: NumberLocale,
    pub policy: PricingPolicy,
}

/// Which pricing block a quote was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    FixedDeparture,
    Customized,
    Unresolved,
}

/// A price and discount taken from one pricing block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub final_price: f64,
    pub discount: f64,
    pub source: PriceSource,
}

impl PriceQuote {
    pub fn unresolved() -> Self {
        PriceQuote {
            final_price: 0.0,
            discount: 0.0,
            source: PriceSource::Unresolved,
        }
    }

    /// The discount only counts when the price it belongs to resolved.
    fn from_amounts(final_price: Option<f64>, discount: Option<f64>, source: PriceSource) -> Self {
        match final_price.filter(|price| price.is_finite() && *price > 0.0) {
            Some(final_price) => PriceQuote {
                final_price,
                discount: discount
                    .filter(|amount| amount.is_finite() && *amount > 0.0)
                    .unwrap_or(0.0),
                source,
            },
            None => Self::unresolved(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.source != PriceSource::Unresolved
    }
}

pub struct PricingService;

impl PricingService {
    /// Normalize with the storefront defaults: Indian grouping, strict branch.
    pub fn normalize(raw: RawTrip) -> NormalizedTrip {
        Self::normalize_with(raw, &NormalizeOptions::default())
    }

    pub fn normalize_with(mut raw: RawTrip, options: &NormalizeOptions) -> NormalizedTrip {
        let is_fixed_departure = Self::is_fixed_departure(&raw);
        let quote = Self::resolve_price(&raw, is_fixed_departure, options.policy);

        for key in DERIVED_FIELDS {
            raw.fields.remove(key);
        }

        NormalizedTrip {
            trip: raw,
            is_fixed_departure,
            final_price: quote.final_price,
            final_price_display: display_price(quote.final_price, options.locale),
            discount: quote.discount,
        }
    }

    pub fn normalize_all(raw: Vec<RawTrip>, options: &NormalizeOptions) -> Vec<NormalizedTrip> {
        raw.into_iter()
            .map(|trip| Self::normalize_with(trip, options))
            .collect()
    }

    /// A trip is a fixed departure when its pricing model says so or when it
    /// lists any departure at all, priced or not.
    pub fn is_fixed_departure(raw: &RawTrip) -> bool {
        let model_is_fixed = matches!(
            raw.pricing_model.as_deref(),
            Some("fixed_departure") | Some("fixed")
        );
        let lists_departures = raw
            .fixed_departure
            .as_ref()
            .is_some_and(|departures| !departures.is_empty());

        model_is_fixed || lists_departures || !raw.departures().is_empty()
    }

    /// Reads price and discount from the block matching the classification.
    pub fn resolve_price(raw: &RawTrip, is_fixed_departure: bool, policy: PricingPolicy) -> PriceQuote {
        if !is_fixed_departure {
            return Self::customized_quote(raw.customized());
        }

        let quote = Self::package_quote(Self::first_package(raw));
        match policy {
            PricingPolicy::FallbackToCustomized if !quote.is_resolved() => {
                Self::customized_quote(raw.customized())
            }
            _ => quote,
        }
    }

    /// First costing package of the first departure; no other selection.
    pub fn first_package(raw: &RawTrip) -> Option<&CostPackage> {
        raw.departures()
            .first()
            .and_then(|departure| departure.costing_packages.first())
    }

    fn package_quote(package: Option<&CostPackage>) -> PriceQuote {
        match package {
            Some(package) => PriceQuote::from_amounts(
                package.final_price,
                package.discount,
                PriceSource::FixedDeparture,
            ),
            None => PriceQuote::unresolved(),
        }
    }

    fn customized_quote(pricing: Option<&CustomPricing>) -> PriceQuote {
        match pricing {
            Some(pricing) => PriceQuote::from_amounts(
                pricing.final_price,
                pricing.discount,
                PriceSource::Customized,
            ),
            None => PriceQuote::unresolved(),
        }
    }
}

/// How one trip prices under each fallback policy, for the back office.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PricingAudit {
    pub id: Option<String>,
    pub title: Option<String>,
    pub pricing_model: Option<String>,
    pub is_fixed_departure: bool,
    pub departures: usize,
    pub source: PriceSource,
    pub price_resolved: bool,
    pub final_price: f64,
    pub final_price_display: String,
    pub discount: f64,
    /// Whether the other fallback policy would show a different price.
    pub fallback_changes_price: bool,
    /// Price the other policy would show, when it differs.
    pub alternative_price: Option<f64>,
}

impl PricingService {
    pub fn audit(raw: &RawTrip, options: &NormalizeOptions) -> PricingAudit {
        let is_fixed_departure = Self::is_fixed_departure(raw);
        let quote = Self::resolve_price(raw, is_fixed_departure, options.policy);
        let alternative = match options.policy {
            PricingPolicy::Strict => PricingPolicy::FallbackToCustomized,
            PricingPolicy::FallbackToCustomized => PricingPolicy::Strict,
        };
        let other = Self::resolve_price(raw, is_fixed_departure, alternative);
        let fallback_changes_price = other.final_price != quote.final_price;

        PricingAudit {
            id: raw.identifier().map(str::to_string),
            title: raw.title.clone(),
            pricing_model: raw.pricing_model.clone(),
            is_fixed_departure,
            departures: raw.departures().len(),
            source: quote.source,
            price_resolved: quote.is_resolved(),
            final_price: quote.final_price,
            final_price_display: display_price(quote.final_price, options.locale),
            discount: quote.discount,
            fallback_changes_price,
            alternative_price: fallback_changes_price.then_some(other.final_price),
        }
    }
}

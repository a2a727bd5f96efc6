use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display string for a price that could not be resolved.
pub const PRICE_UNAVAILABLE: &str = "N/A";

/// Digit grouping convention for displayed prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `12,00,000`: last three digits, then pairs.
    #[default]
    #[serde(rename = "en-IN")]
    Indian,
    /// `1,200,000`: groups of three.
    #[serde(rename = "en-US")]
    Western,
}

impl NumberLocale {
    fn group_sizes(self) -> (usize, usize) {
        match self {
            NumberLocale::Indian => (3, 2),
            NumberLocale::Western => (3, 3),
        }
    }
}

impl FromStr for NumberLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en-in" | "indian" => Ok(NumberLocale::Indian),
            "en-us" | "en-gb" | "western" => Ok(NumberLocale::Western),
            other => Err(format!("unsupported price locale: {}", other)),
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLocale::Indian => write!(f, "en-IN"),
            NumberLocale::Western => write!(f, "en-US"),
        }
    }
}

/// Formats a price for display, or `"N/A"` when it is not a positive amount.
pub fn display_price(amount: f64, locale: NumberLocale) -> String {
    if amount.is_finite() && amount > 0.0 {
        format_amount(amount, locale)
    } else {
        PRICE_UNAVAILABLE.to_string()
    }
}

/// Groups the integer digits of `amount` with commas. Fraction digits are the
/// shortest ones that read back as the same `f64`, so no precision is lost.
pub fn format_amount(amount: f64, locale: NumberLocale) -> String {
    // `Display` for f64 never switches to exponent notation.
    let digits = amount.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if amount < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(whole, locale));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, locale: NumberLocale) -> String {
    let (first, rest) = locale.group_sizes();
    if digits.len() <= first {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut remaining = head;
    while remaining.len() > rest {
        let (left, right) = remaining.split_at(remaining.len() - rest);
        groups.push(right);
        remaining = left;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(",")
}

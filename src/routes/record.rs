//! Route record and numeric coercion of the text columns.

use serde::{Deserialize, Serialize};

/// One row of the route table.
///
/// `star_rating` and `price` are `None` when the stored value could not be
/// read as a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub route_name: String,
    /// Operator category, the `Bus_Type` column.
    pub bus_type: String,
    pub star_rating: Option<f64>,
    pub price: Option<f64>,
    /// Remaining columns in table order, rendered as text.
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

impl RouteRecord {
    pub fn new(
        route_name: impl Into<String>,
        bus_type: impl Into<String>,
        star_rating: Option<f64>,
        price: Option<f64>,
    ) -> Self {
        Self {
            route_name: route_name.into(),
            bus_type: bus_type.into(),
            star_rating,
            price,
            extra: Vec::new(),
        }
    }
}

/// Parse a price such as `"INR 450.00"`, stripping `currency_prefix` first.
pub fn parse_price(text: &str, currency_prefix: &str) -> Option<f64> {
    let trimmed = text.trim();
    let amount = if currency_prefix.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(currency_prefix).unwrap_or(trimmed)
    };
    parse_number(amount)
}

/// Parse a star rating such as `"4.5"`.
pub fn parse_rating(text: &str) -> Option<f64> {
    parse_number(text)
}

/// Finite numbers only; `"NaN"` and `"inf"` count as missing.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().and_then(finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_with_prefix() {
        assert_eq!(parse_price("INR 450.00", "INR"), Some(450.0));
        assert_eq!(parse_price("INR 450", "INR"), Some(450.0));
        assert_eq!(parse_price("  INR  1299.5 ", "INR"), Some(1299.5));
    }

    #[test]
    fn test_price_without_prefix() {
        assert_eq!(parse_price("300", "INR"), Some(300.0));
        assert_eq!(parse_price("INR 75", ""), None);
    }

    #[test]
    fn test_price_garbage_is_missing() {
        assert_eq!(parse_price("garbage", "INR"), None);
        assert_eq!(parse_price("INR", "INR"), None);
        assert_eq!(parse_price("", "INR"), None);
        assert_eq!(parse_price("INR 1,200", "INR"), None);
    }

    #[test]
    fn test_non_finite_is_missing() {
        assert_eq!(parse_price("INR NaN", "INR"), None);
        assert_eq!(parse_rating("inf"), None);
        assert_eq!(finite(f64::NAN), None);
        assert_eq!(finite(3.5), Some(3.5));
    }

    #[test]
    fn test_rating() {
        assert_eq!(parse_rating("4.5"), Some(4.5));
        assert_eq!(parse_rating(" 4 "), Some(4.0));
        assert_eq!(parse_rating("New"), None);
    }
}

//! Tabular views handed to the presentation surface.

use serde::{Deserialize, Serialize};

use crate::routes::record::RouteRecord;

/// Shown in place of a value that could not be parsed.
pub const MISSING: &str = "-";

/// `₹450.00`
pub fn format_price(price: Option<f64>, currency_symbol: &str) -> String {
    match price {
        Some(value) => format!("{currency_symbol}{value:.2}"),
        None => MISSING.to_string(),
    }
}

/// `4.5`
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{value:.1}"),
        None => MISSING.to_string(),
    }
}

/// One displayed row. Raw numbers travel next to their formatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub route_name: String,
    pub bus_type: String,
    pub star_rating: String,
    pub price: String,
    pub star_rating_value: Option<f64>,
    pub price_value: Option<f64>,
    pub extra: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableView {
    pub rows: Vec<RowView>,
}

impl TableView {
    pub fn from_records(records: &[RouteRecord], currency_symbol: &str) -> Self {
        let rows = records
            .iter()
            .map(|r| RowView {
                route_name: r.route_name.clone(),
                bus_type: r.bus_type.clone(),
                star_rating: format_rating(r.star_rating),
                price: format_price(r.price, currency_symbol),
                star_rating_value: r.star_rating,
                price_value: r.price,
                extra: r.extra.clone(),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(format_price(Some(450.0), "₹"), "₹450.00");
        assert_eq!(format_price(Some(99.999), "INR "), "INR 100.00");
        assert_eq!(format_price(None, "₹"), MISSING);
        assert_eq!(format_rating(Some(4.0)), "4.0");
        assert_eq!(format_rating(Some(3.26)), "3.3");
        assert_eq!(format_rating(None), MISSING);
    }

    #[test]
    fn test_table_view() {
        let mut record = RouteRecord::new("Beta Cargo", "Seater", Some(3.0), None);
        record.extra.push(("Seats_Available".into(), "12".into()));

        let table = TableView::from_records(&[record], "₹");
        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.star_rating, "3.0");
        assert_eq!(row.price, MISSING);
        assert_eq!(row.extra, vec![("Seats_Available".to_string(), "12".to_string())]);
    }
}

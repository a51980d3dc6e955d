//! Price sort direction and the in-memory ordering of fetched rows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routes::record::RouteRecord;

/// Direction of the price sort. The only values that ever reach SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "Low to High", alias = "asc", alias = "ascending")]
    LowToHigh,
    #[serde(alias = "High to Low", alias = "desc", alias = "descending")]
    HighToLow,
}

impl SortOrder {
    /// Literal `ORDER BY` keyword for the price column.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            SortOrder::LowToHigh => "ASC",
            SortOrder::HighToLow => "DESC",
        }
    }

    /// Label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::LowToHigh => "Low to High",
            SortOrder::HighToLow => "High to Low",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOrder(pub String);

impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order {:?}", self.0)
    }
}

impl std::error::Error for UnknownSortOrder {}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low to high" | "low_to_high" | "low-to-high" | "asc" | "ascending" => {
                Ok(SortOrder::LowToHigh)
            }
            "high to low" | "high_to_low" | "high-to-low" | "desc" | "descending" => {
                Ok(SortOrder::HighToLow)
            }
            _ => Err(UnknownSortOrder(s.to_string())),
        }
    }
}

/// Missing values sort after present ones regardless of direction.
fn missing_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.total_cmp(&x)
            } else {
                x.total_cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order by rating descending, then price in `order`. Stable.
pub fn sort_records(records: &mut [RouteRecord], order: SortOrder) {
    let price_descending = order == SortOrder::HighToLow;
    records.sort_by(|a, b| {
        missing_last(a.star_rating, b.star_rating, true)
            .then_with(|| missing_last(a.price, b.price, price_descending))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(rating: Option<f64>, price: Option<f64>) -> RouteRecord {
        RouteRecord::new("Alpha Express", "Sleeper", rating, price)
    }

    fn prices(records: &[RouteRecord]) -> Vec<Option<f64>> {
        records.iter().map(|r| r.price).collect()
    }

    #[test]
    fn test_sql_keyword_is_closed_set() {
        assert_eq!(SortOrder::LowToHigh.sql_keyword(), "ASC");
        assert_eq!(SortOrder::HighToLow.sql_keyword(), "DESC");
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Low to High".parse::<SortOrder>(), Ok(SortOrder::LowToHigh));
        assert_eq!("high_to_low".parse::<SortOrder>(), Ok(SortOrder::HighToLow));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::HighToLow));
        assert!("ASC; DROP TABLE bus_routes".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let order: SortOrder = serde_json::from_str("\"Low to High\"").unwrap();
        assert_eq!(order, SortOrder::LowToHigh);
        assert_eq!(serde_json::to_string(&SortOrder::HighToLow).unwrap(), "\"high_to_low\"");
    }

    #[test]
    fn test_rating_then_price() {
        let mut records = vec![
            rec(Some(3.0), Some(100.0)),
            rec(Some(4.0), Some(300.0)),
            rec(Some(4.0), Some(150.0)),
        ];
        sort_records(&mut records, SortOrder::LowToHigh);
        assert_eq!(prices(&records), vec![Some(150.0), Some(300.0), Some(100.0)]);

        sort_records(&mut records, SortOrder::HighToLow);
        assert_eq!(prices(&records), vec![Some(300.0), Some(150.0), Some(100.0)]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let mut records = vec![
            rec(None, Some(50.0)),
            rec(Some(4.0), None),
            rec(Some(4.0), Some(500.0)),
            rec(Some(2.0), Some(10.0)),
        ];

        sort_records(&mut records, SortOrder::HighToLow);
        assert_eq!(records[0].price, Some(500.0));
        assert_eq!(records[1].price, None);
        assert_eq!(records[2].star_rating, Some(2.0));
        assert_eq!(records[3].star_rating, None);

        sort_records(&mut records, SortOrder::LowToHigh);
        assert_eq!(records[0].price, Some(500.0));
        assert_eq!(records[1].price, None);
        assert_eq!(records[3].star_rating, None);
    }

    #[test]
    fn test_stable_for_ties() {
        let mut a = rec(Some(4.0), Some(200.0));
        a.bus_type = "first".into();
        let mut b = rec(Some(4.0), Some(200.0));
        b.bus_type = "second".into();
        let mut records = vec![a, b];
        sort_records(&mut records, SortOrder::HighToLow);
        assert_eq!(records[0].bus_type, "first");
        assert_eq!(records[1].bus_type, "second");
    }
}

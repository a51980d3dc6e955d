//! Parameterized queries against the route table.
//!
//! # Responsibilities
//! - Route index lookup: distinct names sharing a first character
//! - Route data fetch: every row of one route, ordered for display
//! - Coerce rating and price cells to numbers, degrading to missing values
//!
//! # Design Decisions
//! - User values are always bound parameters
//! - The table name is interpolated, but only after config validation
//!   restricted it to identifier characters
//! - The price direction comes from `SortOrder::sql_keyword`, a closed set
//! - Rows are re-sorted numerically after parsing because the source columns
//!   may hold text, where SQL ordering is lexicographic

use rusqlite::types::ValueRef;
use rusqlite::Row;

use crate::db::connection::RouteConnection;
use crate::db::error::{DbError, DbResult};
use crate::routes::record::{finite, parse_price, parse_rating, RouteRecord};
use crate::routes::sort::{sort_records, SortOrder};

pub const ROUTE_NAME: &str = "Route_Name";
pub const BUS_TYPE: &str = "Bus_Type";
pub const STAR_RATING: &str = "Star_Rating";
pub const PRICE: &str = "Price";

/// Distinct route names whose first character is `letter`, ascending.
///
/// Anything other than exactly one character matches nothing and issues no
/// query. Comparison is case-sensitive and `%`/`_` are plain characters.
pub fn list_routes_starting_with(conn: &RouteConnection, letter: &str) -> DbResult<Vec<String>> {
    if letter.chars().count() != 1 {
        tracing::debug!(letter = %letter, "Route lookup skipped, not a single character");
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT DISTINCT {ROUTE_NAME} FROM {table} \
         WHERE substr({ROUTE_NAME}, 1, 1) = ?1 \
         ORDER BY {ROUTE_NAME} ASC",
        table = conn.table(),
    );
    let mut stmt = conn.raw().prepare(&sql)?;
    let names = stmt
        .query_map([letter], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(letter = %letter, routes = names.len(), "Route index loaded");
    Ok(names)
}

/// Every row of `route_name`, rating descending then price in `order`.
pub fn fetch_route(
    conn: &RouteConnection,
    route_name: &str,
    order: SortOrder,
) -> DbResult<Vec<RouteRecord>> {
    let sql = format!(
        "SELECT * FROM {table} WHERE {ROUTE_NAME} = ?1 \
         ORDER BY {STAR_RATING} DESC, {PRICE} {direction}",
        table = conn.table(),
        direction = order.sql_keyword(),
    );
    let mut stmt = conn.raw().prepare(&sql)?;

    let column = |name: &'static str| {
        stmt.column_index(name).map_err(|_| DbError::MissingColumn {
            table: conn.table().to_string(),
            column: name,
        })
    };
    let layout = ColumnLayout {
        route_name: column(ROUTE_NAME)?,
        bus_type: column(BUS_TYPE)?,
        star_rating: column(STAR_RATING)?,
        price: column(PRICE)?,
        names: stmt.column_names().into_iter().map(String::from).collect(),
    };

    let prefix = conn.currency_prefix();
    let mut records = stmt
        .query_map([route_name], |row| layout.read(row, prefix))?
        .collect::<Result<Vec<_>, _>>()?;

    sort_records(&mut records, order);

    tracing::debug!(route = %route_name, sort = %order, rows = records.len(), "Route data loaded");
    Ok(records)
}

struct ColumnLayout {
    route_name: usize,
    bus_type: usize,
    star_rating: usize,
    price: usize,
    names: Vec<String>,
}

impl ColumnLayout {
    fn read(&self, row: &Row<'_>, currency_prefix: &str) -> rusqlite::Result<RouteRecord> {
        let mut extra = Vec::new();
        for (idx, name) in self.names.iter().enumerate() {
            if [self.route_name, self.bus_type, self.star_rating, self.price].contains(&idx) {
                continue;
            }
            extra.push((name.clone(), text_cell(row.get_ref(idx)?)));
        }

        Ok(RouteRecord {
            route_name: text_cell(row.get_ref(self.route_name)?),
            bus_type: text_cell(row.get_ref(self.bus_type)?),
            star_rating: numeric_cell(row.get_ref(self.star_rating)?, parse_rating),
            price: numeric_cell(row.get_ref(self.price)?, |text| {
                parse_price(text, currency_prefix)
            }),
            extra,
        })
    }
}

fn numeric_cell(value: ValueRef<'_>, parse_text: impl Fn(&str) -> Option<f64>) -> Option<f64> {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => finite(i as f64),
        ValueRef::Real(f) => finite(f),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_text),
    }
}

fn text_cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

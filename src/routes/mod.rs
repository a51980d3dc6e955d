//! Route domain: records, ordering, filtering and display.
//!
//! # Data Flow
//! ```text
//! db rows
//!     → record.rs (numeric coercion, missing values)
//!     → sort.rs (rating desc, price by SortOrder)
//!     → filter.rs (rating and bus type membership)
//!     → view.rs (formatted tables)
//! ```

pub mod filter;
pub mod record;
pub mod sort;
pub mod view;

pub use filter::{distinct_categories, distinct_ratings, filter_records, RatingSet};
pub use record::{parse_price, parse_rating, RouteRecord};
pub use sort::{sort_records, SortOrder};
pub use view::{format_price, format_rating, RowView, TableView};

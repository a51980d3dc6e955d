//! Query result caching.
//!
//! # Design Decisions
//! - Explicit caches keyed by call arguments, owned by the service
//! - Keys include the data source identity, not the handle instance
//! - No invalidation; staleness for the process lifetime is accepted

pub mod catalog;
pub mod memo;

pub use catalog::{CatalogStats, RouteCatalog};
pub use memo::{CacheStats, MemoCache};

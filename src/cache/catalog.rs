//! Memoized route lookups.

use std::sync::Arc;

use serde::Serialize;

use crate::cache::memo::{CacheStats, MemoCache};
use crate::db::{self, DbResult, RouteConnection, SourceId};
use crate::routes::{RouteRecord, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteIndexKey {
    pub source: SourceId,
    pub letter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteDataKey {
    pub source: SourceId,
    pub route_name: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogStats {
    pub route_index: CacheStats,
    pub route_data: CacheStats,
}

/// Route index and route data lookups, each memoized by its arguments.
///
/// The source data is assumed not to change while the process runs; there is
/// no invalidation, so edits to the table are not seen until restart.
#[derive(Clone)]
pub struct RouteCatalog {
    route_index: MemoCache<RouteIndexKey, Vec<String>>,
    route_data: MemoCache<RouteDataKey, Vec<RouteRecord>>,
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self {
            route_index: MemoCache::new("route_index"),
            route_data: MemoCache::new("route_data"),
        }
    }

    pub fn list_routes_starting_with(
        &self,
        conn: &RouteConnection,
        letter: &str,
    ) -> DbResult<Arc<Vec<String>>> {
        let key = RouteIndexKey {
            source: conn.source_id().clone(),
            letter: letter.to_string(),
        };
        self.route_index
            .get_or_try_insert_with(key, || db::list_routes_starting_with(conn, letter))
    }

    pub fn fetch_route(
        &self,
        conn: &RouteConnection,
        route_name: &str,
        order: SortOrder,
    ) -> DbResult<Arc<Vec<RouteRecord>>> {
        let key = RouteDataKey {
            source: conn.source_id().clone(),
            route_name: route_name.to_string(),
            order,
        };
        self.route_data
            .get_or_try_insert_with(key, || db::fetch_route(conn, route_name, order))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            route_index: self.route_index.stats(),
            route_data: self.route_data.stats(),
        }
    }
}

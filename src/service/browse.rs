//! The browse handler.
//!
//! # Responsibilities
//! - Turn one `Selection` into one `RenderState`
//! - Chain index lookup → data fetch → filter, stopping at the first step
//!   that leaves nothing to show
//! - Convert every failure into a notice; nothing escapes as a panic
//!
//! # Design Decisions
//! - One handle per call, released when the call returns
//! - Caches live in the shared `RouteCatalog`, not in the handler

use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{CatalogStats, RouteCatalog};
use crate::config::{BrowserConfig, DisplayConfig};
use crate::db::{ConnectionProvider, DbError, DbResult, RouteConnection};
use crate::observability::metrics;
use crate::routes::{
    distinct_categories, distinct_ratings, filter_records, RatingSet, RouteRecord, SortOrder,
    TableView,
};
use crate::service::state::{RenderState, Selection};

pub const NO_ROUTES: &str = "No routes found starting with the specified letter.";
pub const CONNECTION_FAILED: &str = "Failed to establish database connection.";

#[derive(Clone)]
pub struct BrowseService {
    provider: ConnectionProvider,
    catalog: RouteCatalog,
    display: Arc<DisplayConfig>,
}

impl BrowseService {
    pub fn new(provider: ConnectionProvider, catalog: RouteCatalog, display: DisplayConfig) -> Self {
        Self {
            provider,
            catalog,
            display: Arc::new(display),
        }
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(
            ConnectionProvider::from_config(&config.database),
            RouteCatalog::new(),
            config.display.clone(),
        )
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn cache_stats(&self) -> CatalogStats {
        self.catalog.stats()
    }

    /// Route index lookup on a fresh handle. `letter` is used as supplied.
    pub fn route_index(&self, letter: &str) -> DbResult<Arc<Vec<String>>> {
        self.provider
            .with_connection(|conn| self.catalog.list_routes_starting_with(conn, letter))
            .inspect_err(|e| metrics::record_db_error(e.kind()))
    }

    /// Route data fetch on a fresh handle.
    pub fn route_data(&self, route_name: &str, order: SortOrder) -> DbResult<Arc<Vec<RouteRecord>>> {
        self.provider
            .with_connection(|conn| self.catalog.fetch_route(conn, route_name, order))
            .inspect_err(|e| metrics::record_db_error(e.kind()))
    }

    /// Build the screen for `selection`.
    pub fn handle(&self, selection: &Selection) -> RenderState {
        let mut state = RenderState::new(selection.sort);

        let letter = selection
            .letter
            .as_deref()
            .unwrap_or(self.display.default_letter.as_str())
            .trim()
            .to_uppercase();
        if letter.is_empty() {
            return state;
        }
        state.letter = Some(letter.clone());

        let conn = match self.provider.open() {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed");
                metrics::record_db_error(e.kind());
                state.error(format!("Error connecting to database: {e}"));
                state.error(CONNECTION_FAILED);
                return state;
            }
        };

        if let Err(e) = self.render(&conn, &letter, selection, &mut state) {
            tracing::error!(error = %e, letter = %letter, "Browse query failed");
            metrics::record_db_error(e.kind());
            state.error(format!("Error querying database: {e}"));
        }
        state
    }

    fn render(
        &self,
        conn: &RouteConnection,
        letter: &str,
        selection: &Selection,
        state: &mut RenderState,
    ) -> Result<(), DbError> {
        let routes = self.catalog.list_routes_starting_with(conn, letter)?;
        state.routes = routes.to_vec();

        let route = match selection
            .route
            .as_ref()
            .filter(|r| routes.contains(r))
            .or_else(|| routes.first())
        {
            Some(route) => route.clone(),
            None => {
                state.warn(NO_ROUTES);
                return Ok(());
            }
        };
        state.selected_route = Some(route.clone());

        let records = self.catalog.fetch_route(conn, &route, selection.sort)?;
        if records.is_empty() {
            state.warn(format!(
                "No data found for Route: {route} with the specified price sort order."
            ));
            return Ok(());
        }

        let symbol = &self.display.currency_symbol;
        state.table = Some(TableView::from_records(&records, symbol));
        state.rating_options = distinct_ratings(&records);
        state.bus_type_options = distinct_categories(&records);
        state.selected_ratings = selection
            .ratings
            .clone()
            .unwrap_or_else(|| state.rating_options.clone());
        state.selected_bus_types = selection
            .bus_types
            .clone()
            .unwrap_or_else(|| state.bus_type_options.clone());

        if !state.selected_ratings.is_empty() && !state.selected_bus_types.is_empty() {
            let ratings: RatingSet = state.selected_ratings.iter().copied().collect();
            let bus_types: HashSet<String> = state.selected_bus_types.iter().cloned().collect();
            let filtered = filter_records(&records, &ratings, &bus_types);
            state.filtered = Some(TableView::from_records(&filtered, symbol));
        }

        tracing::debug!(
            route = %route,
            sort = %selection.sort,
            rows = records.len(),
            filtered = state.filtered.as_ref().map(TableView::len).unwrap_or(0),
            "Browse rendered"
        );
        Ok(())
    }
}

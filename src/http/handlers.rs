//! Endpoint handlers.
//!
//! Database work runs on the blocking pool; handlers only translate between
//! HTTP and the browse service.

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::cache::CatalogStats;
use crate::http::error::ApiError;
use crate::http::request::{
    request_id, ApiPath, ApiQuery, BrowseQuery, RouteDataQuery, RouteIndexQuery,
};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routes::{SortOrder, TableView};
use crate::service::{RenderState, Selection};

#[derive(Debug, Serialize)]
pub struct RouteIndexResponse {
    pub letter: String,
    pub routes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteDataResponse {
    pub route: String,
    pub sort: SortOrder,
    pub records: TableView,
}

/// Run `f` on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

fn finish<T: IntoResponse>(
    endpoint: &'static str,
    start: Instant,
    result: Result<T, ApiError>,
) -> axum::response::Response {
    let response = result.into_response();
    metrics::record_request(endpoint, response.status().as_u16(), start);
    response
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn list_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<RouteIndexQuery>,
) -> impl IntoResponse {
    let start = Instant::now();
    let request_id = request_id(&headers);
    tracing::debug!(request_id = %request_id, letter = %query.letter, "Route index request");

    let service = state.service.clone();
    let result = run_blocking(move || {
        let routes = service.route_index(&query.letter)?;
        Ok(Json(RouteIndexResponse {
            letter: query.letter,
            routes: routes.to_vec(),
        }))
    })
    .await
    .inspect_err(|e| tracing::warn!(request_id = %request_id, error = %e, "Route index failed"));

    finish("routes", start, result)
}

pub async fn route_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(route): ApiPath<String>,
    ApiQuery(query): ApiQuery<RouteDataQuery>,
) -> impl IntoResponse {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match query.sort_order() {
        Ok(order) => {
            tracing::debug!(request_id = %request_id, route = %route, sort = %order, "Route data request");
            let service = state.service.clone();
            run_blocking(move || {
                let records = service.route_data(&route, order)?;
                let table = TableView::from_records(&records, &service.display().currency_symbol);
                Ok(Json(RouteDataResponse {
                    route,
                    sort: order,
                    records: table,
                }))
            })
            .await
        }
        Err(e) => Err(e),
    }
    .inspect_err(|e| tracing::warn!(request_id = %request_id, error = %e, "Route data failed"));

    finish("route_data", start, result)
}

pub async fn browse(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(query): ApiQuery<BrowseQuery>,
) -> impl IntoResponse {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match Selection::try_from(query) {
        Ok(selection) => {
            tracing::debug!(request_id = %request_id, selection = ?selection, "Browse request");
            let service = state.service.clone();
            run_blocking(move || Ok(Json::<RenderState>(service.handle(&selection)))).await
        }
        Err(e) => Err(e),
    };

    if let Ok(Json(render)) = &result {
        for notice in &render.notices {
            tracing::info!(request_id = %request_id, level = ?notice.level, message = %notice.message, "Browse notice");
        }
    }

    finish("browse", start, result)
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.service.cache_stats())
}

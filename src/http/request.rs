//! Request identification and query parameter parsing.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, and echoed back
//! - Query and path rejections become `ApiError::BadRequest`, so every
//!   error body is JSON
//! - List parameters are comma separated; an empty value is an explicit
//!   empty selection, an absent one means "all"

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::{request::Parts, HeaderMap, HeaderName};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::http::error::ApiError;
use crate::routes::SortOrder;
use crate::service::Selection;

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// The request ID set by `set_request_id_layer`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// `Query<T>` whose rejection is a JSON `ApiError`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// `Path<T>` whose rejection is a JSON `ApiError`.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteIndexQuery {
    pub letter: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteDataQuery {
    pub sort: Option<String>,
}

impl RouteDataQuery {
    pub fn sort_order(&self) -> Result<SortOrder, ApiError> {
        parse_sort(self.sort.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub letter: Option<String>,
    pub route: Option<String>,
    pub sort: Option<String>,
    pub ratings: Option<String>,
    pub bus_types: Option<String>,
}

impl TryFrom<BrowseQuery> for Selection {
    type Error = ApiError;

    fn try_from(query: BrowseQuery) -> Result<Self, Self::Error> {
        let ratings = query
            .ratings
            .as_deref()
            .map(parse_ratings)
            .transpose()?;
        let bus_types = query.bus_types.as_deref().map(split_list);

        Ok(Selection {
            letter: query.letter,
            route: query.route.filter(|r| !r.is_empty()),
            sort: parse_sort(query.sort.as_deref())?,
            ratings,
            bus_types,
        })
    }
}

fn parse_sort(raw: Option<&str>) -> Result<SortOrder, ApiError> {
    match raw {
        None | Some("") => Ok(SortOrder::default()),
        Some(s) => s
            .parse::<SortOrder>()
            .map_err(|e| ApiError::BadRequest(format!("{e}"))),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_ratings(raw: &str) -> Result<Vec<f64>, ApiError> {
    split_list(raw)
        .iter()
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ApiError::BadRequest(format!("invalid rating {s:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_query_defaults() {
        let selection = Selection::try_from(BrowseQuery::default()).unwrap();
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_browse_query_lists() {
        let selection = Selection::try_from(BrowseQuery {
            letter: Some("a".into()),
            route: Some("Alpha Express".into()),
            sort: Some("high_to_low".into()),
            ratings: Some("4, 4.5".into()),
            bus_types: Some("A/C Sleeper,Seater".into()),
        })
        .unwrap();

        assert_eq!(selection.sort, SortOrder::HighToLow);
        assert_eq!(selection.ratings, Some(vec![4.0, 4.5]));
        assert_eq!(
            selection.bus_types,
            Some(vec!["A/C Sleeper".to_string(), "Seater".to_string()])
        );
    }

    #[test]
    fn test_empty_list_is_explicit_empty_selection() {
        let selection = Selection::try_from(BrowseQuery {
            ratings: Some(String::new()),
            ..BrowseQuery::default()
        })
        .unwrap();
        assert_eq!(selection.ratings, Some(Vec::new()));
    }

    #[test]
    fn test_bad_values_rejected() {
        let bad_rating = Selection::try_from(BrowseQuery {
            ratings: Some("4,five".into()),
            ..BrowseQuery::default()
        });
        assert!(matches!(bad_rating, Err(ApiError::BadRequest(_))));

        let bad_sort = Selection::try_from(BrowseQuery {
            sort: Some("sideways".into()),
            ..BrowseQuery::default()
        });
        assert!(matches!(bad_sort, Err(ApiError::BadRequest(_))));
    }

    fn parts(uri: &str) -> Parts {
        let (parts, _) = axum::http::Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_malformed_query_is_bad_request() {
        let mut missing = parts("/api/routes");
        let err = ApiQuery::<RouteIndexQuery>::from_request_parts(&mut missing, &())
            .await
            .unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(msg) if msg.contains("letter")));

        let mut present = parts("/api/routes?letter=A");
        let ApiQuery(query) = ApiQuery::<RouteIndexQuery>::from_request_parts(&mut present, &())
            .await
            .unwrap();
        assert_eq!(query.letter, "A");
    }

    #[test]
    fn test_request_id_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");
        headers.insert(X_REQUEST_ID, "abc".parse().unwrap());
        assert_eq!(request_id(&headers), "abc");
    }
}

//! Request extractors shared by the collection endpoints.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::AppError;
use crate::paging::PagingQuery;

/// Paging query parameters.
///
/// Unparseable values (`page=abc`, `desc=yes`) are reported as
/// `InvalidPageRequest`, so they get the same JSON error body as out-of-range
/// values instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct PagingParams(pub PagingQuery);

impl<S> FromRequestParts<S> for PagingParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PagingQuery>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::InvalidPageRequest(rejection.body_text()))?;
        Ok(Self(query))
    }
}

//! Query-string extraction for the listing endpoint.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use explorer_core::listing::{ListParams, ListQuery};

use crate::error::AppError;

/// Validated listing parameters extracted from the query string.
///
/// Rejects with a 400 [`AppError`] when the query string cannot be
/// deserialized (non-integer `page`, unknown `sort_by`, ...) or when paging
/// values are out of range. Runs before the handler, so an invalid request
/// never reaches the record store.
#[derive(Debug, Clone)]
pub struct ListRecordsQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListRecordsQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<ListQuery>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ListRecordsQuery(raw.validate()?))
    }
}

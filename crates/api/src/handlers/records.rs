//! Handlers for the `/records` resource.

use axum::extract::State;
use axum::Json;
use explorer_core::listing::RecordFilter;
use explorer_db::models::record::Record;

use crate::error::AppResult;
use crate::query::ListRecordsQuery;
use crate::response::PaginatedResponse;
use crate::state::AppState;

/// GET /api/records
///
/// List records with optional search, category/status/price/date filters,
/// sorting and pagination. `total_records` counts every matching row;
/// `data` holds only the requested page.
pub async fn list_records(
    State(state): State<AppState>,
    ListRecordsQuery(params): ListRecordsQuery,
) -> AppResult<Json<PaginatedResponse<Record>>> {
    let filter = RecordFilter::from_params(&params, chrono::Utc::now());
    tracing::debug!(
        page = params.page,
        limit = params.limit,
        sort = ?params.sort,
        ?filter,
        "Listing records"
    );

    let total_records = state.store.count(&filter).await?;
    let data = state
        .store
        .query(&filter, params.sort, params.offset(), params.limit)
        .await?;

    Ok(Json(PaginatedResponse::new(data, total_records, &params)))
}

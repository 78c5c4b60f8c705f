//! Route definitions for the record listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Record routes mounted under `/api`.
///
/// ```text
/// GET /records -> list_records
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/records", get(records::list_records))
}

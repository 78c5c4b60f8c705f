pub mod health;
pub mod records;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /records                                         paginated listing (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(records::router())
}

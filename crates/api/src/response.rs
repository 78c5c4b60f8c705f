//! Response envelope types for API handlers.

use explorer_core::listing::{total_pages, ListParams};
use serde::Serialize;

/// One page of results plus the metadata needed to page through the rest.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Rows matching the filters, ignoring pagination.
    pub total_records: i64,
    /// `0` when nothing matches, otherwise `ceil(total_records / limit)`.
    pub total_pages: i64,
    pub current_page: i64,
    pub limit: i64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total_records: i64, params: &ListParams) -> Self {
        Self {
            data,
            total_records,
            total_pages: total_pages(total_records, params.limit),
            current_page: params.page,
            limit: params.limit,
        }
    }
}

/// `{ "message": ... }` payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

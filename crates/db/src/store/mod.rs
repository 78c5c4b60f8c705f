//! The record store abstraction.
//!
//! The listing pipeline only ever needs two read operations: count the rows
//! matching a filter, and fetch one sorted page of them. Both backends
//! ([`PgRecordStore`] and [`MemoryRecordStore`]) implement exactly that.

use async_trait::async_trait;
use explorer_core::listing::{RecordFilter, RecordSort};

use crate::models::record::Record;

mod memory;
mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Errors surfaced by a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only access to the `records` collection.
///
/// `count` and `query` are independent round-trips; callers must not assume
/// they observe the same snapshot.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of records matching `filter`, ignoring pagination.
    async fn count(&self, filter: &RecordFilter) -> Result<i64, StoreError>;

    /// One page of records matching `filter`, ordered by `sort`.
    async fn query(
        &self,
        filter: &RecordFilter,
        sort: RecordSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Record>, StoreError>;

    /// Confirm the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

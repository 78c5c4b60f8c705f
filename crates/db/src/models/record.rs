//! Record entity model and insert DTO.
//!
//! Records are immutable once created (no `updated_at`, no update path).

use explorer_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `records` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Record {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub status: String,
    pub price: f64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new record. The store assigns `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub name: String,
    pub category: String,
    pub status: String,
    pub price: f64,
    pub created_at: Timestamp,
}

impl NewRecord {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: DbId) -> Record {
        Record {
            id,
            name: self.name,
            category: self.category,
            status: self.status,
            price: self.price,
            created_at: self.created_at,
        }
    }
}

//! Persistence layer for the record explorer.
//!
//! Provides the [`store::RecordStore`] abstraction consumed by the API, a
//! PostgreSQL implementation backed by a sqlx pool, an in-memory
//! implementation with identical semantics, and the seed data generator.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod seed;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// How long a request may wait for a pooled connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `records` table and its indexes if they do not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("../schema.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

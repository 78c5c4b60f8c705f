use std::sync::Arc;

use explorer_db::seed;
use explorer_db::store::{MemoryRecordStore, PgRecordStore, RecordStore};

use crate::config::StoreBackend;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store the listing and health endpoints read from.
    pub store: Arc<dyn RecordStore>,
}

/// Open the record store selected by `backend`.
///
/// For PostgreSQL this creates the pool, checks connectivity and makes sure
/// the `records` table exists.
pub async fn connect_store(backend: &StoreBackend) -> Result<Arc<dyn RecordStore>, sqlx::Error> {
    match backend {
        StoreBackend::Postgres {
            url,
            max_connections,
        } => {
            let pool = explorer_db::create_pool(url, *max_connections).await?;
            tracing::info!(max_connections, "Database connection pool created");

            explorer_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            explorer_db::ensure_schema(&pool).await?;
            tracing::info!("Records table ready");

            Ok(Arc::new(PgRecordStore::new(pool)))
        }
        StoreBackend::Memory { seed_count } => {
            let records =
                seed::generate_records(&mut rand::rng(), *seed_count, chrono::Utc::now());
            tracing::info!(count = records.len(), "Using in-memory record store");
            Ok(Arc::new(MemoryRecordStore::from_new(records)))
        }
    }
}

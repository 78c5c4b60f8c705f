#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use explorer_core::listing::{RecordFilter, RecordSort};
use explorer_core::types::Timestamp;
use explorer_db::models::record::{NewRecord, Record};
use explorer_db::store::{MemoryRecordStore, RecordStore, StoreError};
use http_body_util::BodyExt;
use tower::ServiceExt;

use explorer_api::config::{CorsOrigins, ServerConfig, StoreBackend};
use explorer_api::router::build_app_router;
use explorer_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and a 30-second
/// request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static(
            "http://localhost:5173",
        )]),
        request_timeout_secs: 30,
        store: StoreBackend::Memory { seed_count: 0 },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn RecordStore>) -> Router {
    build_test_app_with_config(store, &test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn RecordStore>, config: &ServerConfig) -> Router {
    build_app_router(AppState { store }, config)
}

/// Router over an in-memory store holding `records`.
pub fn memory_app(records: Vec<NewRecord>) -> Router {
    build_test_app(Arc::new(MemoryRecordStore::from_new(records)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn new_record(name: &str, category: &str, status: &str, price: f64) -> NewRecord {
    new_record_at(name, category, status, price, fixed_time())
}

pub fn new_record_at(
    name: &str,
    category: &str,
    status: &str,
    price: f64,
    created_at: Timestamp,
) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        category: category.to_string(),
        status: status.to_string(),
        price,
        created_at,
    }
}

pub fn fixed_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// `count` records named `Item 1..=count`, priced 1.0, 2.0, ...
pub fn numbered_records(count: u32) -> Vec<NewRecord> {
    (1..=count)
        .map(|n| new_record(&format!("Item {n}"), "Books", "In Stock", f64::from(n)))
        .collect()
}

/// Extract a field from every element of the response's `data` array.
pub fn data_field(json: &serde_json::Value, field: &str) -> Vec<serde_json::Value> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|row| row[field].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Test stores
// ---------------------------------------------------------------------------

/// The sqlx error a dropped database connection produces.
pub fn connection_reset() -> StoreError {
    StoreError::Database(sqlx::Error::Io(io::Error::new(
        io::ErrorKind::ConnectionReset,
        "connection to 10.0.0.5:5432 reset by peer",
    )))
}

/// A store whose every call fails, as if the database connection dropped.
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn count(&self, _filter: &RecordFilter) -> Result<i64, StoreError> {
        Err(connection_reset())
    }

    async fn query(
        &self,
        _filter: &RecordFilter,
        _sort: RecordSort,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        Err(connection_reset())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(connection_reset())
    }
}

/// A store that panics on every listing call.
pub struct PanickingStore;

#[async_trait]
impl RecordStore for PanickingStore {
    async fn count(&self, _filter: &RecordFilter) -> Result<i64, StoreError> {
        panic!("row decoder hit an unexpected NULL at 10.0.0.5");
    }

    async fn query(
        &self,
        _filter: &RecordFilter,
        _sort: RecordSort,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        panic!("row decoder hit an unexpected NULL at 10.0.0.5");
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store that answers listing calls only after `delay`.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl RecordStore for SlowStore {
    async fn count(&self, _filter: &RecordFilter) -> Result<i64, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn query(
        &self,
        _filter: &RecordFilter,
        _sort: RecordSort,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Wraps another store and counts how many queries reach it.
pub struct CountingStore<S> {
    inner: S,
    calls: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for CountingStore<S> {
    async fn count(&self, filter: &RecordFilter) -> Result<i64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count(filter).await
    }

    async fn query(
        &self,
        filter: &RecordFilter,
        sort: RecordSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Record>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.query(filter, sort, offset, limit).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

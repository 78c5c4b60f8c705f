//! Random sample data for local development.

use chrono::TimeDelta;
use explorer_core::types::Timestamp;
use rand::Rng;

use crate::models::record::NewRecord;
use crate::store::{PgRecordStore, StoreError};

/// Number of records the seed tool inserts by default.
pub const DEFAULT_SEED_COUNT: usize = 120;

/// Records committed per transaction while seeding.
pub const SEED_BATCH_SIZE: usize = 20;

pub const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Home Goods", "Books", "Tools"];

pub const STATUSES: &[&str] = &["In Stock", "Out of Stock", "Discontinued", "On Order"];

const ADJECTIVES: &[&str] = &[
    "Amber", "Bold", "Classic", "Compact", "Deluxe", "Eco", "Golden", "Handy", "Lunar", "Modern",
    "Nimble", "Prime", "Quiet", "Rustic", "Smart", "Swift",
];

const NOUNS: &[&str] = &[
    "Anchor", "Beacon", "Canvas", "Compass", "Falcon", "Harbor", "Lantern", "Meadow", "Orbit",
    "Pebble", "Quill", "Ridge", "Summit", "Timber", "Voyage", "Willow",
];

/// Seconds in the two-year window `created_at` values are drawn from.
const CREATED_WINDOW_SECS: i64 = 2 * 365 * 24 * 60 * 60;

/// Generate `count` random records created within two years before `now`.
///
/// Names end in a 1-based sequence number so they stay unique.
pub fn generate_records<R: Rng>(rng: &mut R, count: usize, now: Timestamp) -> Vec<NewRecord> {
    (1..=count)
        .map(|n| NewRecord {
            name: format!("{} {} Product {n}", pick(rng, ADJECTIVES), pick(rng, NOUNS)),
            category: pick(rng, CATEGORIES).to_string(),
            status: pick(rng, STATUSES).to_string(),
            price: f64::from(rng.random_range(0..10_000u32)) / 100.0,
            created_at: now - TimeDelta::seconds(rng.random_range(0..CREATED_WINDOW_SECS)),
        })
        .collect()
}

/// Replace the contents of the `records` table with `records`.
///
/// Inserts in batches of [`SEED_BATCH_SIZE`], each in its own transaction.
pub async fn reseed(store: &PgRecordStore, records: &[NewRecord]) -> Result<u64, StoreError> {
    let removed = store.clear().await?;
    tracing::info!(removed, "Cleared existing records");

    let mut inserted = 0;
    for batch in records.chunks(SEED_BATCH_SIZE) {
        inserted += store.insert_batch(batch).await?;
        tracing::info!(inserted, total = records.len(), "Committed seed batch");
    }
    Ok(inserted)
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options[rng.random_range(0..options.len())]
}

//! Populate the `records` table with random sample data.
//!
//! Reads `DATABASE_URL` and `SEED_COUNT` (default 120), creates the table if
//! needed, deletes existing rows and inserts fresh ones in batches.

use anyhow::Context;
use explorer_db::seed::{self, DEFAULT_SEED_COUNT};
use explorer_db::store::PgRecordStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "explorer_seed=info,explorer_db=info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let count = match std::env::var("SEED_COUNT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("SEED_COUNT must be a non-negative integer, got '{raw}'"))?,
        Err(_) => DEFAULT_SEED_COUNT,
    };

    let pool = explorer_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    explorer_db::ensure_schema(&pool)
        .await
        .context("Failed to create records table")?;

    let records = seed::generate_records(&mut rand::rng(), count, chrono::Utc::now());
    let inserted = seed::reseed(&PgRecordStore::new(pool), &records)
        .await
        .context("Seeding failed")?;

    tracing::info!(inserted, "Database seeding complete");
    Ok(())
}
